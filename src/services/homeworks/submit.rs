use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::config::AppConfig;
use crate::errors::PortalError;
use crate::models::submissions::{entities::SubmissionStatus, responses::SubmitResponse};
use crate::models::users::entities::User;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, portal_error_response};
use crate::utils::upload::{MultipartForm, UploadPolicy, keep_upload_on_success, receive_multipart};

use super::HomeworkService;

/// 提交视频作业
///
/// 视频保存后以文件名作为内容引用送去评分，没有提交成功时删除已保存的视频。
pub async fn submit_homework(
    service: &HomeworkService,
    request: &HttpRequest,
    assignment_id: i64,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match storage.get_assignment_by_id(assignment_id).await {
        Ok(Some(assignment)) if !assignment.is_worksheet() => {}
        Ok(Some(_)) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::BadRequest,
                "该作业不是视频作业",
            )));
        }
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AssignmentNotFound,
                "作业不存在",
            )));
        }
        Err(e) => return Ok(portal_error_response(&e)),
    }

    match storage
        .get_submission_for_assignment(assignment_id, user.id)
        .await
    {
        Ok(Some(prior)) if prior.status != SubmissionStatus::Pending => {
            return Ok(portal_error_response(&PortalError::already_submitted(
                "该作业已经提交过",
            )));
        }
        Ok(_) => {}
        Err(e) => return Ok(portal_error_response(&e)),
    }

    let config = AppConfig::get();
    let policy = UploadPolicy {
        dir: &config.upload.dir,
        allowed_types: &config.upload.video_types,
        max_size: config.upload.max_size,
    };
    let form = match receive_multipart(payload, &policy).await {
        Ok(form) => form,
        Err(rejection) => return Ok(rejection.into_response()),
    };

    let response = grade_upload(service, request, &user, assignment_id, &form).await;
    Ok(keep_upload_on_success(response, policy.dir, form.file.as_ref()).await)
}

async fn grade_upload(
    service: &HomeworkService,
    request: &HttpRequest,
    user: &User,
    assignment_id: i64,
    form: &MultipartForm,
) -> HttpResponse {
    let Some(video) = &form.file else {
        return HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "必须上传视频文件",
        ));
    };

    match service
        .get_assembler(request)
        .submit_homework(assignment_id, user.id, &video.stored_name)
        .await
    {
        Ok(submission) => HttpResponse::Ok().json(ApiResponse::success(
            SubmitResponse { submission },
            "视频作业已提交并完成评分",
        )),
        Err(e) => {
            tracing::warn!(
                "Homework submission of student {} for assignment {} failed: {}",
                user.id,
                assignment_id,
                e
            );
            portal_error_response(&e)
        }
    }
}
