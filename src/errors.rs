//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。
//! 协作方（评分 / 导入）与持久化失败被视为可重试错误，
//! 面向学生时只给出统一的 "请重试" 提示，不暴露内部细节。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_portal_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone, PartialEq)]
        pub enum PortalError {
            $($variant(String),)*
        }

        impl PortalError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(PortalError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(PortalError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(PortalError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl PortalError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        PortalError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_portal_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    DatabaseConfig("E003", "Database Configuration Error"),
    DatabaseConnection("E004", "Database Connection Error"),
    DatabaseOperation("E005", "Database Operation Error"),
    FileOperation("E006", "File Operation Error"),
    Validation("E007", "Validation Error"),
    NotFound("E008", "Resource Not Found"),
    Serialization("E009", "Serialization Error"),
    DateParse("E011", "Date Parse Error"),
    Authentication("E012", "Authentication Error"),
    Authorization("E013", "Authorization Error"),
    MalformedSchema("E101", "Malformed Worksheet Schema"),
    GradingFailed("E102", "Grading Failed"),
    IngestionFailed("E103", "Ingestion Failed"),
    PersistenceFailed("E104", "Persistence Failed"),
    SubmissionInProgress("E105", "Submission In Progress"),
    AlreadySubmitted("E106", "Already Submitted"),
    ChatFailed("E107", "Chat Failed"),
    AnalyticsFailed("E108", "Analytics Failed"),
}

/// 面向学生的统一重试提示
pub const RETRY_MESSAGE: &str = "Something went wrong while processing your work. Please try again.";

impl PortalError {
    /// 是否为可重试的协作方 / 持久化失败
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            PortalError::GradingFailed(_)
                | PortalError::IngestionFailed(_)
                | PortalError::PersistenceFailed(_)
                | PortalError::ChatFailed(_)
                | PortalError::AnalyticsFailed(_)
        )
    }

    /// 返回可以直接展示给学生的提示
    pub fn user_message(&self) -> String {
        if self.is_retryable() {
            RETRY_MESSAGE.to_string()
        } else {
            self.message().to_string()
        }
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for PortalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for PortalError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for PortalError {
    fn from(err: sea_orm::DbErr) -> Self {
        PortalError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for PortalError {
    fn from(err: std::io::Error) -> Self {
        PortalError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for PortalError {
    fn from(err: serde_json::Error) -> Self {
        PortalError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for PortalError {
    fn from(err: chrono::ParseError) -> Self {
        PortalError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PortalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(PortalError::cache_connection("test").code(), "E001");
        assert_eq!(PortalError::database_config("test").code(), "E003");
        assert_eq!(PortalError::validation("test").code(), "E007");
        assert_eq!(PortalError::malformed_schema("test").code(), "E101");
        assert_eq!(PortalError::grading_failed("test").code(), "E102");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            PortalError::persistence_failed("test").error_type(),
            "Persistence Failed"
        );
        assert_eq!(
            PortalError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_retryable_errors_hide_details() {
        let err = PortalError::grading_failed("upstream returned 502 from 10.0.0.7");
        assert!(err.is_retryable());
        assert_eq!(err.user_message(), RETRY_MESSAGE);

        let err = PortalError::persistence_failed("disk I/O error");
        assert!(err.is_retryable());
        assert!(!err.user_message().contains("disk"));

        assert!(PortalError::chat_failed("chat backend down").is_retryable());
        assert!(PortalError::analytics_failed("timeout").is_retryable());
    }

    #[test]
    fn test_non_retryable_errors_keep_message() {
        let err = PortalError::malformed_schema("题目编号 3 重复");
        assert!(!err.is_retryable());
        assert_eq!(err.user_message(), "题目编号 3 重复");
    }

    #[test]
    fn test_format_simple() {
        let err = PortalError::validation("Invalid URL");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("Invalid URL"));
    }
}
