//! 工作表结构定义
//!
//! 线上格式（导入服务产出、数据库存储）为 [`RawWorksheetSchema`]，
//! 经过校验后得到不可变的 [`WorksheetSchema`]，后续渲染与作答都只依赖校验后的结构。

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::errors::{PortalError, Result};

/// 填空题题干中的空位标记
pub const BLANK_MARKER: &str = "____";
/// 简答题默认行数
pub const DEFAULT_SHORT_ANSWER_LINES: u32 = 3;
/// 论述题默认行数
pub const DEFAULT_LONG_ANSWER_LINES: u32 = 6;

/// 题目的线上格式
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/worksheet.ts")]
pub struct RawQuestion {
    pub id: i64,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(rename = "question", default)]
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lines: Option<i64>,
}

/// 工作表的线上格式
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/worksheet.ts")]
pub struct RawWorksheetSchema {
    pub title: String,
    #[serde(default)]
    pub instructions: String,
    #[serde(default)]
    pub questions: Vec<RawQuestion>,
}

/// 题型及其专属字段
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionBody {
    FillBlank,
    MultipleChoice { options: Vec<String> },
    TrueFalse,
    ShortAnswer { lines: u32 },
    LongAnswer { lines: u32 },
    /// 无法识别的题型，保留原始标签用于展示
    Unsupported { kind: String },
}

impl QuestionBody {
    pub const FILL_BLANK: &'static str = "fill-blank";
    pub const MULTIPLE_CHOICE: &'static str = "multiple-choice";
    pub const TRUE_FALSE: &'static str = "true-false";
    pub const SHORT_ANSWER: &'static str = "short-answer";
    pub const LONG_ANSWER: &'static str = "long-answer";

    /// 题型标签（规范写法）
    pub fn kind(&self) -> &str {
        match self {
            QuestionBody::FillBlank => Self::FILL_BLANK,
            QuestionBody::MultipleChoice { .. } => Self::MULTIPLE_CHOICE,
            QuestionBody::TrueFalse => Self::TRUE_FALSE,
            QuestionBody::ShortAnswer { .. } => Self::SHORT_ANSWER,
            QuestionBody::LongAnswer { .. } => Self::LONG_ANSWER,
            QuestionBody::Unsupported { kind } => kind,
        }
    }
}

/// 把题型标签归一化，兼容下划线写法和旧的 "fill-in-the-blank"
fn normalize_kind(tag: &str) -> Option<&'static str> {
    match tag.trim().to_ascii_lowercase().replace('_', "-").as_str() {
        "fill-blank" | "fill-in-the-blank" => Some(QuestionBody::FILL_BLANK),
        "multiple-choice" => Some(QuestionBody::MULTIPLE_CHOICE),
        "true-false" => Some(QuestionBody::TRUE_FALSE),
        "short-answer" => Some(QuestionBody::SHORT_ANSWER),
        "long-answer" => Some(QuestionBody::LONG_ANSWER),
        _ => None,
    }
}

/// 校验后的题目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: i64,
    pub prompt: String,
    pub body: QuestionBody,
}

impl TryFrom<RawQuestion> for Question {
    type Error = PortalError;

    fn try_from(raw: RawQuestion) -> Result<Self> {
        let id = raw.id;
        if raw.kind.trim().is_empty() {
            return Err(PortalError::malformed_schema(format!(
                "第 {id} 题缺少题型"
            )));
        }

        let lines = match raw.lines {
            None => None,
            Some(n) if n > 0 && n <= u32::MAX as i64 => Some(n as u32),
            Some(n) => {
                return Err(PortalError::malformed_schema(format!(
                    "第 {id} 题的行数 {n} 无效"
                )));
            }
        };

        let body = match normalize_kind(&raw.kind) {
            Some(QuestionBody::FILL_BLANK) => {
                if !raw.prompt.contains(BLANK_MARKER) {
                    return Err(PortalError::malformed_schema(format!(
                        "填空题 {id} 缺少空格标记"
                    )));
                }
                QuestionBody::FillBlank
            }
            Some(QuestionBody::MULTIPLE_CHOICE) => match raw.options {
                Some(options) if !options.is_empty() => {
                    QuestionBody::MultipleChoice { options }
                }
                _ => {
                    return Err(PortalError::malformed_schema(format!(
                        "选择题 {id} 没有选项"
                    )));
                }
            },
            Some(QuestionBody::TRUE_FALSE) => QuestionBody::TrueFalse,
            Some(QuestionBody::SHORT_ANSWER) => QuestionBody::ShortAnswer {
                lines: lines.unwrap_or(DEFAULT_SHORT_ANSWER_LINES),
            },
            Some(QuestionBody::LONG_ANSWER) => QuestionBody::LongAnswer {
                lines: lines.unwrap_or(DEFAULT_LONG_ANSWER_LINES),
            },
            _ => QuestionBody::Unsupported { kind: raw.kind },
        };

        Ok(Question {
            id,
            prompt: raw.prompt,
            body,
        })
    }
}

impl From<Question> for RawQuestion {
    fn from(question: Question) -> Self {
        let kind = question.body.kind().to_string();
        let (options, lines) = match question.body {
            QuestionBody::MultipleChoice { options } => (Some(options), None),
            QuestionBody::ShortAnswer { lines } | QuestionBody::LongAnswer { lines } => {
                (None, Some(lines as i64))
            }
            _ => (None, None),
        };
        RawQuestion {
            id: question.id,
            kind,
            prompt: question.prompt,
            options,
            lines,
        }
    }
}

/// 校验后的工作表，创建后不可变
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawWorksheetSchema", into = "RawWorksheetSchema")]
pub struct WorksheetSchema {
    title: String,
    instructions: String,
    questions: Vec<Question>,
}

impl WorksheetSchema {
    /// 从 JSON 文本解析并校验
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawWorksheetSchema = serde_json::from_str(json)
            .map_err(|e| PortalError::malformed_schema(format!("工作表结构 JSON 无效: {e}")))?;
        Self::try_from(raw)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&RawWorksheetSchema::from(self.clone()))?)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    /// 按原始顺序返回题目
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question(&self, id: i64) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }
}

impl TryFrom<RawWorksheetSchema> for WorksheetSchema {
    type Error = PortalError;

    fn try_from(raw: RawWorksheetSchema) -> Result<Self> {
        let mut seen = HashSet::with_capacity(raw.questions.len());
        let mut questions = Vec::with_capacity(raw.questions.len());
        for question in raw.questions {
            if !seen.insert(question.id) {
                return Err(PortalError::malformed_schema(format!(
                    "题目编号 {} 重复",
                    question.id
                )));
            }
            questions.push(Question::try_from(question)?);
        }

        Ok(WorksheetSchema {
            title: raw.title,
            instructions: raw.instructions,
            questions,
        })
    }
}

impl From<WorksheetSchema> for RawWorksheetSchema {
    fn from(schema: WorksheetSchema) -> Self {
        RawWorksheetSchema {
            title: schema.title,
            instructions: schema.instructions,
            questions: schema.questions.into_iter().map(RawQuestion::from).collect(),
        }
    }
}
