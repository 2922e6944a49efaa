use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::collaborators::ingest_schema;
use crate::config::AppConfig;
use crate::models::assignments::{
    entities::AssignmentKind, requests::CreateAssignmentForm, responses::AssignmentResponse,
};
use crate::models::users::entities::User;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, portal_error_response};
use crate::utils::upload::{MultipartForm, UploadPolicy, keep_upload_on_success, receive_multipart};

use super::AssignmentService;

/// 创建作业
///
/// 工作表必须附带 PDF，PDF 经导入协作方转换为表单结构并校验后一并保存。
/// 作业没有创建成功时，已上传的文件会被删除。
pub async fn create_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    let config = AppConfig::get();
    let policy = UploadPolicy {
        dir: &config.upload.dir,
        allowed_types: &config.upload.document_types,
        max_size: config.upload.max_size,
    };
    let multipart = match receive_multipart(payload, &policy).await {
        Ok(form) => form,
        Err(rejection) => return Ok(rejection.into_response()),
    };

    let response = create_from_form(service, request, &user, &multipart).await;
    Ok(keep_upload_on_success(response, policy.dir, multipart.file.as_ref()).await)
}

async fn create_from_form(
    service: &AssignmentService,
    request: &HttpRequest,
    user: &User,
    multipart: &MultipartForm,
) -> HttpResponse {
    let mut form = CreateAssignmentForm::default();
    for (name, value) in &multipart.fields {
        form.set_field(name, value.clone());
    }
    let mut create_request = match form.validate() {
        Ok(req) => req,
        Err(e) => return portal_error_response(&e),
    };

    if let Some(file) = &multipart.file {
        create_request.source_document = Some(file.stored_name.clone());
    }

    if create_request.kind == AssignmentKind::Worksheet {
        let Some(document) = &multipart.file else {
            return HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::BadRequest,
                "创建工作表必须上传 PDF 文件",
            ));
        };

        let ingestor = service.get_ingestor(request);
        let call_policy = service.get_call_policy(request);
        match ingest_schema(ingestor.as_ref(), &call_policy, document).await {
            Ok(schema) => {
                tracing::info!(
                    "Ingested worksheet {} with {} questions",
                    document.original_name,
                    schema.questions().len()
                );
                create_request.form_schema = Some(schema);
            }
            Err(e) => {
                tracing::warn!("Worksheet ingestion for {} failed: {}", document.original_name, e);
                return portal_error_response(&e);
            }
        }
    }

    let storage = service.get_storage(request);
    match storage.create_assignment(user.id, create_request).await {
        Ok(assignment) => {
            tracing::info!(
                "Assignment {} ({}) created by {}",
                assignment.id,
                assignment.kind,
                user.username
            );
            HttpResponse::Created().json(ApiResponse::success(
                AssignmentResponse { assignment },
                "作业创建成功",
            ))
        }
        Err(e) => HttpResponse::InternalServerError().json(ApiResponse::error_empty(
            ErrorCode::AssignmentCreationFailed,
            format!("创建作业失败: {e}"),
        )),
    }
}
