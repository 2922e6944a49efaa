use serde::Deserialize;
use ts_rs::TS;

use super::entities::{Feedback, SubmissionStatus};
use crate::worksheet::{AnswerStore, InputEvent};

/// 提交创建请求（用于存储层）
///
/// 组装时状态为 `Submitted`，附上评分反馈后变为 `Graded`。
#[derive(Debug, Clone, PartialEq)]
pub struct CreateSubmissionRequest {
    pub assignment_id: i64,
    pub student_id: i64,
    pub status: SubmissionStatus,
    pub content_ref: Option<String>,
    pub text_answers: Option<AnswerStore>,
    pub feedback: Option<Feedback>,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    pub graded_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl CreateSubmissionRequest {
    fn new(assignment_id: i64, student_id: i64) -> Self {
        Self {
            assignment_id,
            student_id,
            status: SubmissionStatus::Submitted,
            content_ref: None,
            text_answers: None,
            feedback: None,
            submitted_at: chrono::Utc::now(),
            graded_at: None,
        }
    }

    pub fn worksheet(assignment_id: i64, student_id: i64, answers: AnswerStore) -> Self {
        Self {
            text_answers: Some(answers),
            ..Self::new(assignment_id, student_id)
        }
    }

    pub fn homework(assignment_id: i64, student_id: i64, content_ref: impl Into<String>) -> Self {
        Self {
            content_ref: Some(content_ref.into()),
            ..Self::new(assignment_id, student_id)
        }
    }

    /// 附上评分反馈，状态变为已评分
    pub fn attach_feedback(&mut self, feedback: Feedback) {
        self.feedback = Some(feedback);
        self.status = SubmissionStatus::Graded;
        self.graded_at = Some(chrono::Utc::now());
    }
}

/// 工作表答案批量更新
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct AnswerBatchRequest {
    pub events: Vec<InputEvent>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_becomes_graded_only_with_feedback() {
        let mut draft = CreateSubmissionRequest::worksheet(1, 2, AnswerStore::new());
        assert_eq!(draft.status, SubmissionStatus::Submitted);
        assert!(draft.feedback.is_none());
        assert!(draft.graded_at.is_none());

        draft.attach_feedback(Feedback {
            score: 88,
            summary: "Good".into(),
            detailed_feedback: "Watch your prepositions.".into(),
        });
        assert_eq!(draft.status, SubmissionStatus::Graded);
        assert!(draft.graded_at.is_some());
    }

    #[test]
    fn test_homework_draft_carries_content_ref() {
        let draft = CreateSubmissionRequest::homework(3, 4, "clip.mp4");
        assert_eq!(draft.content_ref.as_deref(), Some("clip.mp4"));
        assert!(draft.text_answers.is_none());
    }
}
