use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::doubts::requests::AskDoubtRequest;
use crate::models::users::entities::UserRole;
use crate::services::DoubtService;

// 懒加载的全局 DoubtService 实例
static DOUBT_SERVICE: Lazy<DoubtService> = Lazy::new(DoubtService::new_lazy);

// 答疑记录
pub async fn get_history(req: HttpRequest) -> ActixResult<HttpResponse> {
    DOUBT_SERVICE.get_history(&req).await
}

// 提问
pub async fn ask(req: HttpRequest, body: web::Json<AskDoubtRequest>) -> ActixResult<HttpResponse> {
    DOUBT_SERVICE.ask(&req, body.into_inner()).await
}

// 配置路由
pub fn configure_doubts_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/doubts")
            .wrap(middlewares::RequireRole::new_any(UserRole::student_roles()))
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(get_history))
            .route("", web::post().to(ask)),
    );
}
