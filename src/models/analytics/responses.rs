use serde::Serialize;
use ts_rs::TS;

use super::entities::StudentAnalytics;
use crate::models::users::entities::User;

// 学情分析响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/analytics.ts")]
pub struct StudentAnalyticsResponse {
    pub student: User,
    pub graded_submissions: usize,
    pub analytics: StudentAnalytics,
}
