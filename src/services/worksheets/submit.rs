use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::ApiResponse;
use crate::models::submissions::responses::SubmitResponse;
use crate::services::{current_user, portal_error_response};

use super::WorksheetService;

/// 提交工作表
///
/// 会话在评分期间保持只读；成功后会话被丢弃，失败时答案保留、可再次提交。
pub async fn submit_worksheet(
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

    let sessions = service.get_sessions(request);
    let snapshot = match opened.with_session(sessions, |session| session.begin_submit()) {
        Ok(snapshot) => snapshot,
        Err(e) => return Ok(portal_error_response(&e)),
    };

    let result = service
        .get_assembler(request)
        .submit_worksheet(assignment_id, user.id, &snapshot)
        .await;
    sessions.finish(&opened.key, result.is_ok());

    match result {
        Ok(submission) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            SubmitResponse { submission },
            "工作表已提交并完成评分",
        ))),
        Err(e) => {
            tracing::warn!(
                "Worksheet submission of student {} for assignment {} failed: {}",
                user.id,
                assignment_id,
                e
            );
            Ok(portal_error_response(&e))
        }
    }
}
