use super::entities::UserRole;
use serde::Deserialize;

// 用户创建请求（用于存储层，演示数据初始化时使用）
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub name: String,
    pub role: UserRole,
    pub roll_no: Option<String>,
    pub class_name: Option<String>,
    pub section: Option<String>,
    pub register_no: Option<String>,
}

impl CreateUserRequest {
    pub fn staff(role: UserRole, username: &str, name: &str) -> Self {
        Self {
            username: username.to_string(),
            name: name.to_string(),
            role,
            roll_no: None,
            class_name: None,
            section: None,
            register_no: (role == UserRole::Teacher).then(|| username.to_string()),
        }
    }

    pub fn student(username: &str, name: &str, roll_no: &str, class_name: &str, section: &str) -> Self {
        Self {
            username: username.to_string(),
            name: name.to_string(),
            role: UserRole::Student,
            roll_no: Some(roll_no.to_string()),
            class_name: Some(class_name.to_string()),
            section: Some(section.to_string()),
            register_no: None,
        }
    }
}
