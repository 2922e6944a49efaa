/// 业务错误码，随 ApiResponse 一起返回给前端
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    Conflict = 1009,
    InternalServerError = 1500,

    // 认证
    AuthFailed = 2000,

    // 用户
    UserNotFound = 3000,

    // 作业
    AssignmentNotFound = 4000,
    AssignmentCreationFailed = 4001,
    WorksheetUnavailable = 4002,
    SchemaMalformed = 4003,

    // 提交
    SubmissionNotFound = 5000,
    SubmissionAlreadyExists = 5001,
    SubmissionInProgress = 5002,
    SubmissionFailed = 5003,

    // 文件
    FileUploadFailed = 6000,
    FileTypeNotAllowed = 6001,
    FileSizeExceeded = 6002,
    MultifileUploadNotAllowed = 6003,
    IngestionFailed = 6004,

    // 答疑与学情分析
    DoubtReplyFailed = 7000,
    AnalyticsFailed = 7100,
}

impl ErrorCode {
    /// 将领域错误映射到接口错误码
    pub fn from_portal_error(err: &crate::errors::PortalError) -> Self {
        use crate::errors::PortalError;

        match err {
            PortalError::Validation(_) => ErrorCode::BadRequest,
            PortalError::NotFound(_) => ErrorCode::NotFound,
            PortalError::Authentication(_) => ErrorCode::Unauthorized,
            PortalError::Authorization(_) => ErrorCode::Forbidden,
            PortalError::MalformedSchema(_) => ErrorCode::SchemaMalformed,
            PortalError::GradingFailed(_) | PortalError::PersistenceFailed(_) => {
                ErrorCode::SubmissionFailed
            }
            PortalError::IngestionFailed(_) => ErrorCode::IngestionFailed,
            PortalError::SubmissionInProgress(_) => ErrorCode::SubmissionInProgress,
            PortalError::AlreadySubmitted(_) => ErrorCode::SubmissionAlreadyExists,
            PortalError::ChatFailed(_) => ErrorCode::DoubtReplyFailed,
            PortalError::AnalyticsFailed(_) => ErrorCode::AnalyticsFailed,
            _ => ErrorCode::InternalServerError,
        }
    }
}
