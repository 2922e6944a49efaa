use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 某月的平均分
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/analytics.ts")]
pub struct MonthlyScore {
    pub month: String,
    pub homework_score: i32,
    pub worksheet_score: i32,
}

// 学情分析结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/analytics.ts")]
pub struct StudentAnalytics {
    pub summary: String,
    pub monthly_scores: Vec<MonthlyScore>,
}
