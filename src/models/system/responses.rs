use serde::Serialize;
use ts_rs::TS;

/// 管理员首页统计
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/system.ts")]
pub struct PortalStatsResponse {
    pub total_students: u64,
    pub total_teachers: u64,
    pub total_assignments: u64,
    pub total_submissions: u64,
    pub uptime_seconds: i64,
}
