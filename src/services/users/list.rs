use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::users::{entities::UserRole, responses::UserListResponse};
use crate::models::{ApiResponse, ErrorCode};

use super::UserService;

pub async fn list_users(
    service: &UserService,
    request: &HttpRequest,
    role: UserRole,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_users_by_role(role).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            UserListResponse { items },
            "获取用户列表成功",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("获取用户列表失败: {e}"),
            )),
        ),
    }
}
