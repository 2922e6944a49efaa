use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::assignments::requests::{AssignmentListQuery, AssignmentStatusQuery};
use crate::models::users::entities::UserRole;
use crate::services::AssignmentService;

// 懒加载的全局 AssignmentService 实例
static ASSIGNMENT_SERVICE: Lazy<AssignmentService> = Lazy::new(AssignmentService::new_lazy);

// 列出作业
pub async fn list_assignments(
    req: HttpRequest,
    query: web::Query<AssignmentListQuery>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .list_assignments(&req, query.into_inner())
        .await
}

// 创建作业（multipart）
pub async fn create_assignment(req: HttpRequest, payload: Multipart) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.create_assignment(&req, payload).await
}

// 获取作业详情
pub async fn get_assignment(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .get_assignment(&req, path.into_inner())
        .await
}

// 当前学生的提交状态
pub async fn get_statuses(
    req: HttpRequest,
    query: web::Query<AssignmentStatusQuery>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .get_statuses(&req, query.into_inner())
        .await
}

// 某作业的全部提交
pub async fn list_submissions(
    req: HttpRequest,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .list_submissions(&req, path.into_inner())
        .await
}

// 当前学生在某作业上的提交
pub async fn my_submission(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .my_submission(&req, path.into_inner())
        .await
}

// 配置路由
pub fn configure_assignments_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/assignments")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    // 列出作业 - 所有登录用户可访问
                    .route(web::get().to(list_assignments))
                    // 创建作业 - 仅教师和管理员
                    .route(
                        web::post()
                            .to(create_assignment)
                            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                    ),
            )
            // 提交状态 - 仅学生（需在 /{id} 之前注册）
            .service(
                web::resource("/statuses")
                    .route(web::get().to(get_statuses))
                    .wrap(middlewares::RequireRole::new_any(UserRole::student_roles())),
            )
            .service(web::resource("/{id}").route(web::get().to(get_assignment)))
            // 提交列表 - 仅教师和管理员
            .service(
                web::resource("/{id}/submissions")
                    .route(web::get().to(list_submissions))
                    .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
            )
            .service(
                web::resource("/{id}/submissions/my")
                    .route(web::get().to(my_submission))
                    .wrap(middlewares::RequireRole::new_any(UserRole::student_roles())),
            ),
    );
}
