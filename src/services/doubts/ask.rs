use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::collaborators::ChatRequest;
use crate::errors::PortalError;
use crate::models::ApiResponse;
use crate::models::doubts::{
    AskDoubtRequest, CreateDoubtMessageRequest, DoubtReplyResponse, DoubtSender,
};
use crate::services::{current_user, portal_error_response};

use super::DoubtService;

/// 学生提问
///
/// 先取得回复再写入问答两条记录，回复失败时什么都不保存。
pub async fn ask(
    service: &DoubtService,
    request: &HttpRequest,
    body: AskDoubtRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let message = match body.validate() {
        Ok(message) => message,
        Err(e) => return Ok(portal_error_response(&e)),
    };

    let storage = service.get_storage(request);
    let history = match storage.list_doubt_messages(user.id).await {
        Ok(history) => history,
        Err(e) => return Ok(portal_error_response(&e)),
    };

    let chatter = service.get_chatter(request);
    let chatter = &chatter;
    let chat = ChatRequest {
        message: message.clone(),
        history,
    };
    let chat = &chat;
    let reply = match service
        .get_call_policy(request)
        .run("chat", PortalError::chat_failed::<String>, move || {
            chatter.reply(chat)
        })
        .await
    {
        Ok(reply) => reply,
        Err(e) => {
            tracing::warn!("Doubt reply for student {} failed: {}", user.id, e);
            return Ok(portal_error_response(&e));
        }
    };

    let question = match storage
        .create_doubt_message(CreateDoubtMessageRequest {
            student_id: user.id,
            sender: DoubtSender::Student,
            message,
        })
        .await
    {
        Ok(question) => question,
        Err(e) => return Ok(portal_error_response(&e)),
    };
    let reply = match storage
        .create_doubt_message(CreateDoubtMessageRequest {
            student_id: user.id,
            sender: DoubtSender::Ai,
            message: reply,
        })
        .await
    {
        Ok(reply) => reply,
        Err(e) => return Ok(portal_error_response(&e)),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        DoubtReplyResponse { question, reply },
        "已收到回复",
    )))
}
