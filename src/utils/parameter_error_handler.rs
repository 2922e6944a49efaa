use actix_web::{
    Error, HttpRequest, HttpResponse,
    error::{InternalError, JsonPayloadError, PathError, QueryPayloadError},
};

use crate::models::{ApiResponse, ErrorCode};

fn bad_request(message: String, err: impl Into<Error>) -> Error {
    let response = HttpResponse::BadRequest()
        .json(ApiResponse::error_empty(ErrorCode::BadRequest, message));
    InternalError::from_response(err.into(), response).into()
}

/// JSON 请求体解析失败
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> Error {
    tracing::debug!("JSON payload error on {}: {}", req.path(), err);
    bad_request(format!("请求体格式错误: {err}"), err)
}

/// 查询参数解析失败
pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> Error {
    tracing::debug!("Query payload error on {}: {}", req.path(), err);
    bad_request(format!("查询参数错误: {err}"), err)
}

/// 路径参数解析失败
pub fn path_error_handler(err: PathError, req: &HttpRequest) -> Error {
    tracing::debug!("Path error on {}: {}", req.path(), err);
    bad_request(format!("路径参数错误: {err}"), err)
}
