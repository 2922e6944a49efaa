//! 提交组装
//!
//! 把答案快照（或视频文件引用）送去评分，拿到合法反馈后写入一条新的提交记录。
//! 评分失败时不写任何记录；写入失败时反馈被丢弃，学生可以重新提交。

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::collaborators::{CallPolicy, Grader, GradingRequest};
use crate::errors::{PortalError, Result};
use crate::models::submissions::{CreateSubmissionRequest, Submission};
use crate::storage::Storage;

use super::answers::AnswerStore;

#[derive(Clone)]
pub struct SubmissionAssembler {
    grader: Arc<dyn Grader>,
    storage: Arc<dyn Storage>,
    policy: CallPolicy,
}

impl SubmissionAssembler {
    pub fn new(grader: Arc<dyn Grader>, storage: Arc<dyn Storage>, policy: CallPolicy) -> Self {
        Self {
            grader,
            storage,
            policy,
        }
    }

    /// 提交工作表答案
    pub async fn submit_worksheet(
        &self,
        assignment_id: i64,
        student_id: i64,
        answers: &AnswerStore,
    ) -> Result<Submission> {
        let snapshot = answers.snapshot();
        let draft = CreateSubmissionRequest::worksheet(assignment_id, student_id, snapshot.clone());
        self.grade_and_persist(draft, GradingRequest::Worksheet { answers: snapshot })
            .await
    }

    /// 提交视频作业
    pub async fn submit_homework(
        &self,
        assignment_id: i64,
        student_id: i64,
        content_ref: &str,
    ) -> Result<Submission> {
        let draft = CreateSubmissionRequest::homework(assignment_id, student_id, content_ref);
        let request = GradingRequest::Video {
            content_ref: content_ref.to_string(),
        };
        self.grade_and_persist(draft, request).await
    }

    async fn grade_and_persist(
        &self,
        mut draft: CreateSubmissionRequest,
        request: GradingRequest,
    ) -> Result<Submission> {
        let grader = &self.grader;
        let request = &request;
        let feedback = self
            .policy
            .run("grading", PortalError::grading_failed::<String>, move || {
                grader.grade(request)
            })
            .await?;

        if let Err(e) = feedback.validate() {
            warn!(
                assignment_id = draft.assignment_id,
                student_id = draft.student_id,
                score = feedback.score,
                "grader returned an out-of-range score"
            );
            return Err(e);
        }

        draft.attach_feedback(feedback);
        let (assignment_id, student_id) = (draft.assignment_id, draft.student_id);

        match self.storage.create_submission(draft).await {
            Ok(submission) => {
                info!(
                    submission_id = submission.id,
                    assignment_id,
                    student_id,
                    kind = request.label(),
                    "submission graded and stored"
                );
                Ok(submission)
            }
            Err(e) => {
                error!(assignment_id, student_id, "failed to store graded submission: {e}");
                Err(PortalError::persistence_failed(e.message()))
            }
        }
    }
}
