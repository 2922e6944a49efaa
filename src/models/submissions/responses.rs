use serde::Serialize;
use ts_rs::TS;

use super::entities::{Feedback, Submission};
use crate::worksheet::{InputOutcome, RenderedForm, SubmissionState};

/// 提交列表项（教师查看）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionListItem {
    pub submission: Submission,
    pub student_name: String,
    pub student_username: String,
}

/// 提交列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionListResponse {
    pub items: Vec<SubmissionListItem>,
}

/// 学生自己的提交
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct MySubmissionResponse {
    pub submission: Option<Submission>,
}

/// 工作表页面视图
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct WorksheetFormResponse {
    pub assignment_id: i64,
    pub title: String,
    pub due_date: chrono::DateTime<chrono::Utc>,
    pub state: SubmissionState,
    // 提交处理中（评分进行时）
    pub processing: bool,
    pub form: RenderedForm,
    pub feedback: Option<Feedback>,
}

/// 批量作答结果
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct AnswerBatchResponse {
    pub outcomes: Vec<InputOutcome>,
    pub form: WorksheetFormResponse,
}

/// 提交完成后的结果
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmitResponse {
    pub submission: Submission,
}
