use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::ApiResponse;
use crate::services::current_user;

use super::WorksheetService;

pub async fn get_form(
    service: &WorksheetService,
    request: &HttpRequest,
    assignment_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let opened = match service.open(request, user.id, assignment_id).await {
        Ok(opened) => opened,
        Err(resp) => return Ok(resp),
    };

    let view = opened.with_session(service.get_sessions(request), |session| opened.view(session));

    Ok(HttpResponse::Ok().json(ApiResponse::success(view, "获取工作表成功")))
}
