use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 答疑消息的发送方
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/doubt.ts")]
pub enum DoubtSender {
    Student, // 学生提问
    Ai,      // AI 回复
}

impl DoubtSender {
    pub const STUDENT: &'static str = "student";
    pub const AI: &'static str = "ai";

    pub fn as_str(&self) -> &'static str {
        match self {
            DoubtSender::Student => Self::STUDENT,
            DoubtSender::Ai => Self::AI,
        }
    }
}

impl std::fmt::Display for DoubtSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DoubtSender {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            Self::STUDENT => Ok(DoubtSender::Student),
            Self::AI => Ok(DoubtSender::Ai),
            _ => Err(format!("无效的消息发送方: {s}")),
        }
    }
}

// 答疑消息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/doubt.ts")]
pub struct DoubtMessage {
    pub id: i64,
    pub student_id: i64,
    pub sender: DoubtSender,
    pub message: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
