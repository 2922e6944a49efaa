use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::cache::session_key;
use crate::models::{
    ApiResponse, ErrorCode,
    auth::{LoginRequest, LoginResponse},
};

use super::AuthService;

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let config = service.get_config();

    // 1. 按登录身份和用户名查找用户
    match storage
        .get_user_by_role_and_username(login_request.role, &login_request.username)
        .await
    {
        Ok(Some(user)) => {
            // 2. 校验口令（演示环境统一口令）
            if login_request.password != config.auth.demo_password {
                return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                    ErrorCode::AuthFailed,
                    "用户名或密码错误",
                )));
            }

            // 3. 生成令牌并写入会话缓存
            match user.generate_access_token() {
                Ok(access_token) => {
                    let cache = service.get_cache(request);
                    cache.insert(session_key(&access_token), &user).await;

                    tracing::info!("User {} ({}) logged in", user.username, user.role);

                    let response = LoginResponse {
                        access_token,
                        expires_in: config.jwt.access_token_expiry * 60, // 转换为秒
                        user,
                        created_at: chrono::Utc::now(),
                    };
                    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "登录成功")))
                }
                Err(e) => {
                    tracing::error!("Failed to generate JWT token: {}", e);
                    Ok(
                        HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                            ErrorCode::InternalServerError,
                            "登录失败，无法生成令牌",
                        )),
                    )
                }
            }
        }
        Ok(None) => Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::AuthFailed,
            "用户名或密码错误",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("登录失败: {e}"),
            )),
        ),
    }
}
