use std::collections::HashMap;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::assignments::{
    requests::AssignmentStatusQuery, responses::AssignmentStatusesResponse,
};
use crate::models::submissions::entities::SubmissionStatus;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, portal_error_response};

use super::AssignmentService;

/// 当前学生在一组作业上的提交状态，没有提交记录的为 pending
pub async fn get_statuses(
    service: &AssignmentService,
    request: &HttpRequest,
    query: AssignmentStatusQuery,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let ids = match query.parse_ids() {
        Ok(ids) => ids,
        Err(e) => return Ok(portal_error_response(&e)),
    };

    let storage = service.get_storage(request);
    let latest = match storage
        .list_latest_submissions_for_student(user.id, &ids)
        .await
    {
        Ok(list) => list,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("获取提交状态失败: {e}"),
                )),
            );
        }
    };

    let mut statuses: HashMap<i64, SubmissionStatus> = ids
        .iter()
        .map(|id| (*id, SubmissionStatus::Pending))
        .collect();
    for submission in latest {
        statuses.insert(submission.assignment_id, submission.status);
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        AssignmentStatusesResponse { statuses },
        "获取提交状态成功",
    )))
}
