use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::ApiResponse;
use crate::models::doubts::{DoubtHistoryResponse, DoubtMessage, DoubtSender};
use crate::services::{current_user, portal_error_response};

use super::{DOUBT_GREETING, DoubtService};

/// 获取当前学生的答疑记录，开头总是一条问候
pub async fn get_history(
    service: &DoubtService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    let stored = match service.get_storage(request).list_doubt_messages(user.id).await {
        Ok(items) => items,
        Err(e) => return Ok(portal_error_response(&e)),
    };

    // 问候不落库，id 固定为 0
    let greeting = DoubtMessage {
        id: 0,
        student_id: user.id,
        sender: DoubtSender::Ai,
        message: DOUBT_GREETING.to_string(),
        created_at: stored
            .first()
            .map(|m| m.created_at)
            .unwrap_or_else(chrono::Utc::now),
    };
    let mut items = Vec::with_capacity(stored.len() + 1);
    items.push(greeting);
    items.extend(stored);

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        DoubtHistoryResponse { items },
        "获取答疑记录成功",
    )))
}
