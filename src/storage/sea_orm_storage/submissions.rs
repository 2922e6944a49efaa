use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::submissions::{ActiveModel, Column, Entity as Submissions};
use crate::errors::{PortalError, Result};
use crate::models::submissions::{entities::Submission, requests::CreateSubmissionRequest};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建提交（只插入，不更新已有记录）
    pub async fn create_submission_impl(&self, req: CreateSubmissionRequest) -> Result<Submission> {
        let text_answers = req.text_answers.map(|a| a.to_json()).transpose()?;
        let (score, summary, detailed_feedback) = match req.feedback {
            Some(f) => (Some(f.score), Some(f.summary), Some(f.detailed_feedback)),
            None => (None, None, None),
        };

        let model = ActiveModel {
            assignment_id: Set(req.assignment_id),
            student_id: Set(req.student_id),
            status: Set(req.status.to_string()),
            content_ref: Set(req.content_ref),
            text_answers: Set(text_answers),
            score: Set(score),
            summary: Set(summary),
            detailed_feedback: Set(detailed_feedback),
            submitted_at: Set(req.submitted_at.timestamp()),
            graded_at: Set(req.graded_at.map(|t| t.timestamp())),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("创建提交失败: {e}")))?;

        Ok(result.into_submission())
    }

    /// 获取学生在某作业上的最新提交
    pub async fn get_submission_for_assignment_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>> {
        let result = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .filter(Column::StudentId.eq(student_id))
            .order_by_desc(Column::Id)
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 获取学生在多个作业上的最新提交，每个作业最多一条
    pub async fn list_latest_submissions_for_student_impl(
        &self,
        student_id: i64,
        assignment_ids: &[i64],
    ) -> Result<Vec<Submission>> {
        if assignment_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = Submissions::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::AssignmentId.is_in(assignment_ids.iter().copied()))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询提交失败: {e}")))?;

        // 按 id 升序遍历，后出现的覆盖先出现的
        let mut latest: HashMap<i64, Submission> = HashMap::new();
        for row in rows {
            let submission = row.into_submission();
            latest.insert(submission.assignment_id, submission);
        }

        Ok(latest.into_values().collect())
    }

    /// 列出某作业的全部提交
    pub async fn list_submissions_for_assignment_impl(
        &self,
        assignment_id: i64,
    ) -> Result<Vec<Submission>> {
        let rows = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .order_by_desc(Column::SubmittedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询提交列表失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_submission()).collect())
    }

    /// 列出学生的全部提交（按提交时间升序）
    pub async fn list_submissions_for_student_impl(
        &self,
        student_id: i64,
    ) -> Result<Vec<Submission>> {
        let rows = Submissions::find()
            .filter(Column::StudentId.eq(student_id))
            .order_by_asc(Column::SubmittedAt)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询学生提交失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_submission()).collect())
    }

    /// 统计提交数量
    pub async fn count_submissions_impl(&self) -> Result<u64> {
        let count = Submissions::find()
            .count(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("统计提交数量失败: {e}")))?;

        Ok(count)
    }
}
