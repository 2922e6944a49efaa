//! 测试辅助：预置数据和总是失败的存储

use async_trait::async_trait;

use super::Storage;
use crate::errors::{PortalError, Result};
use crate::models::{
    assignments::{
        entities::{Assignment, AssignmentKind},
        requests::{AssignmentListQuery, CreateAssignmentRequest},
    },
    doubts::{entities::DoubtMessage, requests::CreateDoubtMessageRequest},
    submissions::{entities::Submission, requests::CreateSubmissionRequest},
    users::{
        entities::{User, UserRole},
        requests::CreateUserRequest,
    },
};
use crate::worksheet::WorksheetSchema;

pub const GRAMMAR_SCHEMA: &str = r#"{
    "title": "Grammar Worksheet 1",
    "instructions": "Complete the sentences and answer the questions.",
    "questions": [
        {"id": 1, "type": "fill-blank", "question": "The cat is sleeping ____ the table."},
        {"id": 2, "type": "multiple-choice", "question": "Choose the correct sentence.",
         "options": ["She go to school.", "She goes to school.", "She going to school."]},
        {"id": 3, "type": "true-false", "question": "'Its' and 'It's' mean the same thing."}
    ]
}"#;

/// 创建一名教师、一名学生和一份工作表作业，返回 (作业 ID, 学生 ID)
pub async fn seed_assignment(storage: &dyn Storage) -> (i64, i64) {
    let teacher = storage
        .create_user(CreateUserRequest::staff(
            UserRole::Teacher,
            "T001",
            "Mr. Smith",
        ))
        .await
        .unwrap();
    let student = storage
        .create_user(CreateUserRequest::student("S001", "Alice", "1", "5", "A"))
        .await
        .unwrap();
    let assignment = storage
        .create_assignment(
            teacher.id,
            CreateAssignmentRequest {
                title: "Grammar Worksheet 1".into(),
                kind: AssignmentKind::Worksheet,
                class_name: "5".into(),
                section: "A".into(),
                instructions: "Complete the worksheet.".into(),
                due_date: chrono::Utc::now() + chrono::TimeDelta::days(7),
                form_schema: Some(WorksheetSchema::from_json(GRAMMAR_SCHEMA).unwrap()),
                source_document: None,
            },
        )
        .await
        .unwrap();
    (assignment.id, student.id)
}

/// 所有操作都失败的存储
pub struct FailingStorage;

fn unavailable<T>() -> Result<T> {
    Err(PortalError::database_operation("database is unavailable"))
}

#[async_trait]
impl Storage for FailingStorage {
    async fn create_user(&self, _user: CreateUserRequest) -> Result<User> {
        unavailable()
    }

    async fn get_user_by_id(&self, _id: i64) -> Result<Option<User>> {
        unavailable()
    }

    async fn get_user_by_role_and_username(
        &self,
        _role: UserRole,
        _username: &str,
    ) -> Result<Option<User>> {
        unavailable()
    }

    async fn list_users_by_role(&self, _role: UserRole) -> Result<Vec<User>> {
        unavailable()
    }

    async fn count_users_by_role(&self, _role: UserRole) -> Result<u64> {
        unavailable()
    }

    async fn create_assignment(
        &self,
        _created_by: i64,
        _assignment: CreateAssignmentRequest,
    ) -> Result<Assignment> {
        unavailable()
    }

    async fn get_assignment_by_id(&self, _id: i64) -> Result<Option<Assignment>> {
        unavailable()
    }

    async fn list_assignments(&self, _query: AssignmentListQuery) -> Result<Vec<Assignment>> {
        unavailable()
    }

    async fn count_assignments(&self) -> Result<u64> {
        unavailable()
    }

    async fn create_submission(&self, _submission: CreateSubmissionRequest) -> Result<Submission> {
        unavailable()
    }

    async fn get_submission_for_assignment(
        &self,
        _assignment_id: i64,
        _student_id: i64,
    ) -> Result<Option<Submission>> {
        unavailable()
    }

    async fn list_latest_submissions_for_student(
        &self,
        _student_id: i64,
        _assignment_ids: &[i64],
    ) -> Result<Vec<Submission>> {
        unavailable()
    }

    async fn list_submissions_for_assignment(
        &self,
        _assignment_id: i64,
    ) -> Result<Vec<Submission>> {
        unavailable()
    }

    async fn list_submissions_for_student(&self, _student_id: i64) -> Result<Vec<Submission>> {
        unavailable()
    }

    async fn count_submissions(&self) -> Result<u64> {
        unavailable()
    }

    async fn create_doubt_message(
        &self,
        _message: CreateDoubtMessageRequest,
    ) -> Result<DoubtMessage> {
        unavailable()
    }

    async fn list_doubt_messages(&self, _student_id: i64) -> Result<Vec<DoubtMessage>> {
        unavailable()
    }
}
