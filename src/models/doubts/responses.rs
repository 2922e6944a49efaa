use serde::Serialize;
use ts_rs::TS;

use super::entities::DoubtMessage;

// 答疑记录
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/doubt.ts")]
pub struct DoubtHistoryResponse {
    pub items: Vec<DoubtMessage>,
}

// 一问一答
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/doubt.ts")]
pub struct DoubtReplyResponse {
    pub question: DoubtMessage,
    pub reply: DoubtMessage,
}
