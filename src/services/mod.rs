pub mod assignments;
pub mod auth;
pub mod doubts;
pub mod homeworks;
pub mod students;
pub mod system;
pub mod users;
pub mod worksheets;

pub use assignments::AssignmentService;
pub use auth::AuthService;
pub use doubts::DoubtService;
pub use homeworks::HomeworkService;
pub use students::StudentService;
pub use system::SystemService;
pub use users::UserService;
pub use worksheets::WorksheetService;

use actix_web::{HttpRequest, HttpResponse};

use crate::errors::PortalError;
use crate::middlewares::RequireJWT;
use crate::models::users::entities::User;
use crate::models::{ApiResponse, ErrorCode};

/// 领域错误转换为 HTTP 响应
///
/// 可重试的失败只返回统一提示，详细信息写入日志。
pub(crate) fn portal_error_response(err: &PortalError) -> HttpResponse {
    let body = ApiResponse::<()>::from_portal_error(err);
    match err {
        PortalError::Validation(_) | PortalError::DateParse(_) | PortalError::MalformedSchema(_) => {
            HttpResponse::BadRequest().json(body)
        }
        PortalError::NotFound(_) => HttpResponse::NotFound().json(body),
        PortalError::Authentication(_) => HttpResponse::Unauthorized().json(body),
        PortalError::Authorization(_) => HttpResponse::Forbidden().json(body),
        PortalError::SubmissionInProgress(_) | PortalError::AlreadySubmitted(_) => {
            HttpResponse::Conflict().json(body)
        }
        _ => {
            tracing::error!("{}", err);
            HttpResponse::InternalServerError().json(body)
        }
    }
}

/// 取出当前登录用户，未登录时直接给出 401 响应
pub(crate) fn current_user(request: &HttpRequest) -> Result<User, HttpResponse> {
    RequireJWT::extract_user_claims(request).ok_or_else(|| {
        HttpResponse::Unauthorized().json(ApiResponse::<()>::error_empty(
            ErrorCode::Unauthorized,
            "未登录",
        ))
    })
}
