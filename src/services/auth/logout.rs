use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::cache::session_key;
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;

use super::AuthService;

/// 处理用户登出
/// 删除会话缓存中的条目，之后同一令牌不再被接受
pub async fn handle_logout(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Some(token) = RequireJWT::extract_token(request) {
        service.get_cache(request).remove(&session_key(&token)).await;
    }
    if let Some(user_id) = RequireJWT::extract_user_id(request) {
        tracing::info!("User {} logged out", user_id);
    }

    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty("登出成功")))
}
