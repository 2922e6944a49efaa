use std::collections::HashMap;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::submissions::responses::{
    MySubmissionResponse, SubmissionListItem, SubmissionListResponse,
};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_user;

use super::AssignmentService;

/// 教师查看某作业的全部提交（附学生姓名）
pub async fn list_submissions(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_assignment_by_id(assignment_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AssignmentNotFound,
                "作业不存在",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("获取作业失败: {e}"),
                )),
            );
        }
    }

    let (submissions, students) = match tokio::try_join!(
        storage.list_submissions_for_assignment(assignment_id),
        storage.list_users_by_role(UserRole::Student)
    ) {
        Ok(pair) => pair,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("获取提交列表失败: {e}"),
                )),
            );
        }
    };

    let students: HashMap<i64, _> = students.into_iter().map(|u| (u.id, u)).collect();
    let items = submissions
        .into_iter()
        .map(|submission| {
            let (student_name, student_username) = students
                .get(&submission.student_id)
                .map(|u| (u.name.clone(), u.username.clone()))
                .unwrap_or_else(|| ("Unknown Student".to_string(), String::new()));
            SubmissionListItem {
                submission,
                student_name,
                student_username,
            }
        })
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        SubmissionListResponse { items },
        "获取提交列表成功",
    )))
}

/// 当前学生在某作业上的最新提交
pub async fn my_submission(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match storage
        .get_submission_for_assignment(assignment_id, user.id)
        .await
    {
        Ok(submission) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            MySubmissionResponse { submission },
            "获取提交成功",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("获取提交失败: {e}"),
            )),
        ),
    }
}
