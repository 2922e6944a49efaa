use serde::Deserialize;
use ts_rs::TS;

use super::entities::DoubtSender;
use crate::errors::{PortalError, Result};

/// 单条提问的最大字符数
pub const MAX_DOUBT_LENGTH: usize = 2000;

// 学生提问
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/doubt.ts")]
pub struct AskDoubtRequest {
    pub message: String,
}

impl AskDoubtRequest {
    /// 去掉首尾空白后返回问题文本
    pub fn validate(&self) -> Result<String> {
        let message = self.message.trim();
        if message.is_empty() {
            return Err(PortalError::validation("问题不能为空"));
        }
        if message.chars().count() > MAX_DOUBT_LENGTH {
            return Err(PortalError::validation(format!(
                "问题长度不能超过 {MAX_DOUBT_LENGTH} 个字符"
            )));
        }
        Ok(message.to_string())
    }
}

/// 答疑消息创建请求（用于存储层）
#[derive(Debug, Clone, PartialEq)]
pub struct CreateDoubtMessageRequest {
    pub student_id: i64,
    pub sender: DoubtSender,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ask_validate() {
        let ask = |message: &str| AskDoubtRequest {
            message: message.to_string(),
        };
        assert_eq!(ask("  What is a noun? ").validate().unwrap(), "What is a noun?");
        assert!(matches!(ask("   ").validate(), Err(PortalError::Validation(_))));
        assert!(ask(&"a".repeat(MAX_DOUBT_LENGTH + 1)).validate().is_err());
    }
}
