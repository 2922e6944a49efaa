use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use crate::models::system::responses::PortalStatsResponse;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, AppStartTime, ErrorCode};

use super::SystemService;

/// 管理员概览：学生、教师、作业和提交总数
pub async fn get_stats(service: &SystemService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let counts = tokio::try_join!(
        storage.count_users_by_role(UserRole::Student),
        storage.count_users_by_role(UserRole::Teacher),
        storage.count_assignments(),
        storage.count_submissions(),
    );

    let uptime_seconds = request
        .app_data::<web::Data<AppStartTime>>()
        .map(|start| {
            chrono::Utc::now()
                .signed_duration_since(start.start_datetime)
                .num_seconds()
        })
        .unwrap_or_default();

    match counts {
        Ok((total_students, total_teachers, total_assignments, total_submissions)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                PortalStatsResponse {
                    total_students,
                    total_teachers,
                    total_assignments,
                    total_submissions,
                    uptime_seconds,
                },
                "获取统计信息成功",
            )))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("获取统计信息失败: {e}"),
            )),
        ),
    }
}
