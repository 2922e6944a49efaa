use serde::Deserialize;
use ts_rs::TS;

use crate::models::users::entities::UserRole;

// 用户登录请求（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct LoginRequest {
    /// 登录身份
    pub role: UserRole,
    /// 学号 / 工号 / 管理员账号
    pub username: String,
    /// 密码
    pub password: String,
}
