//! multipart 上传处理
//!
//! 作业创建（PDF）和视频作业提交共用：文本字段收集到表里，
//! 唯一的 `file` 字段按扩展名和大小校验后写入上传目录。

use std::collections::HashMap;
use std::path::Path;

use actix_multipart::Multipart;
use actix_web::HttpResponse;
use futures_util::TryStreamExt;
use futures_util::stream::StreamExt;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::errors::PortalError;
use crate::models::files::UploadedFile;
use crate::models::{ApiResponse, ErrorCode};

/// 文本字段的最大长度
const MAX_TEXT_FIELD_SIZE: usize = 64 * 1024;

/// 上传限制
#[derive(Debug, Clone)]
pub struct UploadPolicy<'a> {
    pub dir: &'a str,
    pub allowed_types: &'a [String],
    pub max_size: usize,
}

/// 解析后的 multipart 请求
#[derive(Debug, Default)]
pub struct MultipartForm {
    pub fields: HashMap<String, String>,
    pub file: Option<UploadedFile>,
}

/// 上传被拒绝的原因
#[derive(Debug)]
pub enum UploadRejection {
    TypeNotAllowed,
    SizeExceeded,
    MultipleFiles,
    BadPayload(String),
    Io(PortalError),
}

impl UploadRejection {
    pub fn into_response(self) -> HttpResponse {
        match self {
            UploadRejection::TypeNotAllowed => HttpResponse::BadRequest().json(
                ApiResponse::error_empty(ErrorCode::FileTypeNotAllowed, "不支持的文件类型"),
            ),
            UploadRejection::SizeExceeded => HttpResponse::BadRequest().json(
                ApiResponse::error_empty(ErrorCode::FileSizeExceeded, "文件大小超出限制"),
            ),
            UploadRejection::MultipleFiles => {
                HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::MultifileUploadNotAllowed,
                    "一次只能上传一个文件",
                ))
            }
            UploadRejection::BadPayload(msg) => HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::BadRequest, msg)),
            UploadRejection::Io(e) => {
                tracing::error!("{}", e);
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::FileUploadFailed,
                    "文件保存失败",
                ))
            }
        }
    }
}

/// 取小写扩展名，带点，例如 ".pdf"
pub fn file_extension(file_name: &str) -> String {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
        .unwrap_or_default()
}

pub fn is_allowed_type(extension: &str, allowed_types: &[String]) -> bool {
    !extension.is_empty() && allowed_types.iter().any(|t| t.to_lowercase() == extension)
}

/// 删除已保存的上传文件（后续处理失败时调用）
pub async fn discard_upload(dir: &str, file: &UploadedFile) {
    let path = Path::new(dir).join(&file.stored_name);
    if let Err(e) = tokio::fs::remove_file(&path).await {
        tracing::warn!("Failed to remove upload {}: {}", path.display(), e);
    }
}

/// 处理结果不是成功响应时删除本次上传的文件
pub async fn keep_upload_on_success(
    response: HttpResponse,
    dir: &str,
    file: Option<&UploadedFile>,
) -> HttpResponse {
    if !response.status().is_success() {
        if let Some(file) = file {
            discard_upload(dir, file).await;
        }
    }
    response
}

/// 读取整个 multipart 请求
///
/// 任何一步被拒绝时，已经保存的文件会先被删除。
pub async fn receive_multipart(
    mut payload: Multipart,
    policy: &UploadPolicy<'_>,
) -> Result<MultipartForm, UploadRejection> {
    let mut form = MultipartForm::default();
    match read_fields(&mut payload, policy, &mut form).await {
        Ok(()) => Ok(form),
        Err(rejection) => {
            if let Some(file) = &form.file {
                discard_upload(policy.dir, file).await;
            }
            Err(rejection)
        }
    }
}

async fn read_fields(
    payload: &mut Multipart,
    policy: &UploadPolicy<'_>,
    form: &mut MultipartForm,
) -> Result<(), UploadRejection> {
    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| UploadRejection::BadPayload(format!("multipart 解析失败: {e}")))?
    {
        let content_disposition = field.content_disposition();
        let name = content_disposition
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();
        let file_name = content_disposition
            .and_then(|cd| cd.get_filename())
            .map(|s| s.to_string());

        if name == "file" {
            if form.file.is_some() {
                return Err(UploadRejection::MultipleFiles);
            }
            let original_name = file_name.unwrap_or_default();
            form.file = Some(save_file(&mut field, original_name, policy).await?);
            continue;
        }

        let mut buf = Vec::new();
        while let Some(chunk) = field.next().await {
            let data =
                chunk.map_err(|e| UploadRejection::BadPayload(format!("字段读取失败: {e}")))?;
            if buf.len() + data.len() > MAX_TEXT_FIELD_SIZE {
                return Err(UploadRejection::BadPayload(format!("字段 {name} 过长")));
            }
            buf.extend_from_slice(&data);
        }
        let value = String::from_utf8(buf)
            .map_err(|_| UploadRejection::BadPayload(format!("字段 {name} 不是有效的 UTF-8")))?;
        form.fields.insert(name, value);
    }

    Ok(())
}

async fn save_file(
    field: &mut actix_multipart::Field,
    original_name: String,
    policy: &UploadPolicy<'_>,
) -> Result<UploadedFile, UploadRejection> {
    let extension = file_extension(&original_name);
    if !is_allowed_type(&extension, policy.allowed_types) {
        return Err(UploadRejection::TypeNotAllowed);
    }

    tokio::fs::create_dir_all(policy.dir)
        .await
        .map_err(|e| UploadRejection::Io(PortalError::file_operation(format!("创建上传目录失败: {e}"))))?;

    let stored_name = format!("{}{}", Uuid::new_v4(), extension);
    let file_path = Path::new(policy.dir).join(&stored_name);
    let mut f = tokio::fs::File::create(&file_path)
        .await
        .map_err(|e| UploadRejection::Io(PortalError::file_operation(format!("文件创建失败: {e}"))))?;

    let mut total_size: usize = 0;
    while let Some(chunk) = field.next().await {
        let data = match chunk {
            Ok(data) => data,
            Err(e) => {
                let _ = tokio::fs::remove_file(&file_path).await;
                return Err(UploadRejection::BadPayload(format!("文件读取失败: {e}")));
            }
        };

        total_size += data.len();
        // 校验大小
        if total_size > policy.max_size {
            let _ = tokio::fs::remove_file(&file_path).await;
            return Err(UploadRejection::SizeExceeded);
        }
        if let Err(e) = f.write_all(&data).await {
            let _ = tokio::fs::remove_file(&file_path).await;
            return Err(UploadRejection::Io(PortalError::from(e)));
        }
    }
    f.flush().await.map_err(|e| UploadRejection::Io(PortalError::from(e)))?;

    tracing::info!(
        "Stored upload {} as {} ({} bytes)",
        original_name,
        stored_name,
        total_size
    );

    Ok(UploadedFile {
        stored_name,
        original_name,
        file_size: total_size as i64,
        file_type: extension,
        uploaded_at: chrono::Utc::now(),
    })
}
