use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::collaborators::AnalyticsRequest;
use crate::errors::PortalError;
use crate::models::analytics::StudentAnalyticsResponse;
use crate::models::submissions::entities::SubmissionStatus;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, portal_error_response};

use super::StudentService;

/// 获取学生的学情分析
///
/// 学生只能查看自己的分析，教师和管理员可以查看任意学生。
pub async fn get_analytics(
    service: &StudentService,
    request: &HttpRequest,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    if user.role == UserRole::Student && user.id != student_id {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "只能查看自己的学情分析",
        )));
    }

    let storage = service.get_storage(request);
    let student = match storage.get_user_by_id(student_id).await {
        Ok(Some(student)) if student.role == UserRole::Student => student,
        Ok(_) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::UserNotFound,
                "学生不存在",
            )));
        }
        Err(e) => return Ok(portal_error_response(&e)),
    };

    let submissions = match storage.list_submissions_for_student(student_id).await {
        Ok(submissions) => submissions,
        Err(e) => return Ok(portal_error_response(&e)),
    };
    let graded_submissions = submissions
        .iter()
        .filter(|s| s.status == SubmissionStatus::Graded)
        .count();

    let analyst = service.get_analyst(request);
    let analyst = &analyst;
    let analysis = AnalyticsRequest {
        student: student.clone(),
        submissions,
    };
    let analysis = &analysis;
    let analytics = match service
        .get_call_policy(request)
        .run(
            "analytics",
            PortalError::analytics_failed::<String>,
            move || analyst.analyze(analysis),
        )
        .await
    {
        Ok(analytics) => analytics,
        Err(e) => {
            tracing::warn!("Analytics for student {} failed: {}", student_id, e);
            return Ok(portal_error_response(&e));
        }
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        StudentAnalyticsResponse {
            student,
            graded_submissions,
            analytics,
        },
        "获取学情分析成功",
    )))
}
