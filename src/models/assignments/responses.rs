use std::collections::HashMap;

use serde::Serialize;
use ts_rs::TS;

use super::entities::Assignment;
use crate::models::submissions::entities::SubmissionStatus;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct AssignmentResponse {
    pub assignment: Assignment,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct AssignmentListResponse {
    pub items: Vec<Assignment>,
}

/// 当前学生在各作业上的提交状态
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct AssignmentStatusesResponse {
    pub statuses: HashMap<i64, SubmissionStatus>,
}
