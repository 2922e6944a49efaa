use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::ApiResponse;
use crate::models::submissions::{requests::AnswerBatchRequest, responses::AnswerBatchResponse};
use crate::services::current_user;

use super::WorksheetService;

/// 批量应用输入事件，返回每个事件的结果和最新表单
pub async fn update_answers(
    service: &WorksheetService,
    request: &HttpRequest,
    assignment_id: i64,
    batch: AnswerBatchRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let opened = match service.open(request, user.id, assignment_id).await {
        Ok(opened) => opened,
        Err(resp) => return Ok(resp),
    };

    // 已提交的作业使用临时会话，所有事件都会得到只读结果
    let response = opened.with_session(service.get_sessions(request), |session| {
        let outcomes = session.apply(&batch.events);
        AnswerBatchResponse {
            outcomes,
            form: opened.view(session),
        }
    });

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "答案已更新")))
}
