use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use ts_rs::TS;

use super::entities::AssignmentKind;
use crate::errors::{PortalError, Result};
use crate::worksheet::WorksheetSchema;

// 作业列表查询参数（来自HTTP请求）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct AssignmentListQuery {
    #[serde(rename = "type", alias = "kind")]
    pub kind: Option<AssignmentKind>,
    pub class_name: Option<String>,
    pub section: Option<String>,
}

// 批量状态查询参数，ids 为逗号分隔的作业 ID
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct AssignmentStatusQuery {
    pub ids: String,
}

impl AssignmentStatusQuery {
    pub fn parse_ids(&self) -> Result<Vec<i64>> {
        self.ids
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<i64>()
                    .map_err(|_| PortalError::validation(format!("无效的作业 ID: {s}")))
            })
            .collect()
    }
}

/// 作业创建表单（multipart 文本字段）
#[derive(Debug, Clone, Default)]
pub struct CreateAssignmentForm {
    pub title: Option<String>,
    pub kind: Option<String>,
    pub class_name: Option<String>,
    pub section: Option<String>,
    pub instructions: Option<String>,
    pub due_date: Option<String>,
}

impl CreateAssignmentForm {
    /// 记录一个文本字段，未知字段忽略
    pub fn set_field(&mut self, name: &str, value: String) {
        let slot = match name {
            "title" => &mut self.title,
            "type" => &mut self.kind,
            "class_name" | "class" => &mut self.class_name,
            "section" => &mut self.section,
            "instructions" => &mut self.instructions,
            "due_date" => &mut self.due_date,
            _ => return,
        };
        *slot = Some(value);
    }

    /// 校验并转换为存储层请求，结构和来源文件由调用方在导入后补充
    pub fn validate(self) -> Result<CreateAssignmentRequest> {
        let required = |value: Option<String>, field: &str| -> Result<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| PortalError::validation(format!("缺少字段: {field}")))
        };

        let kind = required(self.kind, "type")?
            .parse::<AssignmentKind>()
            .map_err(PortalError::validation)?;
        let due_date = parse_due_date(&required(self.due_date, "due_date")?)?;

        Ok(CreateAssignmentRequest {
            title: required(self.title, "title")?,
            kind,
            class_name: required(self.class_name, "class_name")?,
            section: required(self.section, "section")?,
            instructions: self.instructions.unwrap_or_default().trim().to_string(),
            due_date,
            form_schema: None,
            source_document: None,
        })
    }
}

/// 截止日期支持 RFC 3339 和 YYYY-MM-DD（当天结束）
pub fn parse_due_date(value: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")?;
    date.and_hms_opt(23, 59, 59)
        .map(|dt| dt.and_utc())
        .ok_or_else(|| PortalError::date_parse(format!("截止日期无效: {value}")))
}

// 作业创建请求（用于存储层）
#[derive(Debug, Clone)]
pub struct CreateAssignmentRequest {
    pub title: String,
    pub kind: AssignmentKind,
    pub class_name: String,
    pub section: String,
    pub instructions: String,
    pub due_date: DateTime<Utc>,
    pub form_schema: Option<WorksheetSchema>,
    pub source_document: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> CreateAssignmentForm {
        let mut form = CreateAssignmentForm::default();
        form.set_field("title", "Grammar Worksheet 1".into());
        form.set_field("type", "worksheet".into());
        form.set_field("class", "5".into());
        form.set_field("section", "A".into());
        form.set_field("due_date", "2025-10-20".into());
        form.set_field("unrelated", "ignored".into());
        form
    }

    #[test]
    fn test_form_validate() {
        let req = form().validate().unwrap();
        assert_eq!(req.kind, AssignmentKind::Worksheet);
        assert_eq!(req.class_name, "5");
        assert_eq!(req.instructions, "");
        assert_eq!(req.due_date.to_rfc3339(), "2025-10-20T23:59:59+00:00");
    }

    #[test]
    fn test_form_missing_title() {
        let mut f = form();
        f.title = Some("   ".into());
        assert!(matches!(f.validate(), Err(PortalError::Validation(_))));
    }

    #[test]
    fn test_form_bad_kind() {
        let mut f = form();
        f.set_field("type", "quiz".into());
        assert!(f.validate().is_err());
    }

    #[test]
    fn test_due_date_formats() {
        assert!(parse_due_date("2025-10-20T10:00:00Z").is_ok());
        assert!(matches!(
            parse_due_date("20/10/2025"),
            Err(PortalError::DateParse(_))
        ));
    }

    #[test]
    fn test_status_query_ids() {
        let q = AssignmentStatusQuery {
            ids: "1, 2,,3".into(),
        };
        assert_eq!(q.parse_ids().unwrap(), vec![1, 2, 3]);
        let q = AssignmentStatusQuery { ids: "1,x".into() };
        assert!(q.parse_ids().is_err());
    }
}
