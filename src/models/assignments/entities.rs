use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::errors::Result;
use crate::worksheet::WorksheetSchema;

// 作业类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub enum AssignmentKind {
    #[serde(alias = "video")]
    Homework, // 视频作业
    Worksheet, // 工作表
}

impl AssignmentKind {
    pub const HOMEWORK: &'static str = "homework";
    pub const WORKSHEET: &'static str = "worksheet";

    pub fn as_str(&self) -> &'static str {
        match self {
            AssignmentKind::Homework => Self::HOMEWORK,
            AssignmentKind::Worksheet => Self::WORKSHEET,
        }
    }
}

impl std::fmt::Display for AssignmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AssignmentKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            Self::HOMEWORK | "video" => Ok(AssignmentKind::Homework),
            Self::WORKSHEET => Ok(AssignmentKind::Worksheet),
            _ => Err(format!("无效的作业类型: {s}")),
        }
    }
}

// 作业实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct Assignment {
    pub id: i64,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: AssignmentKind,
    pub class_name: String,
    pub section: String,
    pub instructions: String,
    pub created_by: i64,
    pub due_date: chrono::DateTime<chrono::Utc>,
    // 工作表结构（线上格式），视频作业或尚未导入时为空
    pub form_schema: Option<serde_json::Value>,
    // 导入来源的 PDF 文件名
    pub source_document: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Assignment {
    pub fn is_worksheet(&self) -> bool {
        self.kind == AssignmentKind::Worksheet
    }

    /// 解析并校验工作表结构；没有结构时返回 None
    pub fn worksheet_schema(&self) -> Result<Option<WorksheetSchema>> {
        match &self.form_schema {
            Some(value) => Ok(Some(WorksheetSchema::from_json(&value.to_string())?)),
            None => Ok(None),
        }
    }
}
