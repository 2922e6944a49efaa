use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::errors::{PortalError, Result};
use crate::worksheet::AnswerStore;

/// 提交状态
///
/// `Pending` 只出现在状态查询中，表示学生尚未提交。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub enum SubmissionStatus {
    Pending,
    Submitted,
    Graded,
}

impl SubmissionStatus {
    pub const PENDING: &'static str = "pending";
    pub const SUBMITTED: &'static str = "submitted";
    pub const GRADED: &'static str = "graded";

    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::Pending => Self::PENDING,
            SubmissionStatus::Submitted => Self::SUBMITTED,
            SubmissionStatus::Graded => Self::GRADED,
        }
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SubmissionStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            Self::PENDING => Ok(SubmissionStatus::Pending),
            Self::SUBMITTED => Ok(SubmissionStatus::Submitted),
            Self::GRADED => Ok(SubmissionStatus::Graded),
            _ => Err(format!("无效的提交状态: {s}")),
        }
    }
}

/// 评分反馈
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct Feedback {
    pub score: i32,
    pub summary: String,
    pub detailed_feedback: String,
}

impl Feedback {
    pub const MAX_SCORE: i32 = 100;

    /// 分数必须在 0..=100 之间
    pub fn validate(&self) -> Result<()> {
        if (0..=Self::MAX_SCORE).contains(&self.score) {
            Ok(())
        } else {
            Err(PortalError::grading_failed(format!(
                "分数 {} 超出 0..={} 范围",
                self.score,
                Self::MAX_SCORE
            )))
        }
    }
}

/// 提交记录（仅追加）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct Submission {
    pub id: i64,
    pub assignment_id: i64,
    pub student_id: i64,
    pub status: SubmissionStatus,
    // 视频作业的文件名
    pub content_ref: Option<String>,
    // 工作表作答，键为 q-{id}
    #[ts(type = "Record<string, string> | null")]
    pub text_answers: Option<AnswerStore>,
    pub feedback: Option<Feedback>,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    pub graded_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feedback_score_range() {
        let mut feedback = Feedback {
            score: 100,
            summary: "Great".into(),
            detailed_feedback: "All correct".into(),
        };
        assert!(feedback.validate().is_ok());
        feedback.score = 0;
        assert!(feedback.validate().is_ok());
        feedback.score = 101;
        assert!(matches!(
            feedback.validate(),
            Err(PortalError::GradingFailed(_))
        ));
        feedback.score = -1;
        assert!(feedback.validate().is_err());
    }

    #[test]
    fn test_status_strings() {
        for status in [
            SubmissionStatus::Pending,
            SubmissionStatus::Submitted,
            SubmissionStatus::Graded,
        ] {
            assert_eq!(status.as_str().parse::<SubmissionStatus>().unwrap(), status);
        }
        assert!("late".parse::<SubmissionStatus>().is_err());
    }
}
