pub mod analytics;
pub mod assignments;
pub mod auth;
pub mod common;
pub mod doubts;
pub mod files;
pub mod submissions;
pub mod system;
pub mod users;

pub use common::error_code::ErrorCode;
pub use common::response::ApiResponse;

/// 应用启动时间，用于健康检查和统计
#[derive(Debug, Clone, Copy)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
