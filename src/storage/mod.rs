use crate::models::{
    assignments::{
        entities::Assignment,
        requests::{AssignmentListQuery, CreateAssignmentRequest},
    },
    doubts::{entities::DoubtMessage, requests::CreateDoubtMessageRequest},
    submissions::{entities::Submission, requests::CreateSubmissionRequest},
    users::{
        entities::{User, UserRole},
        requests::CreateUserRequest,
    },
};

use crate::errors::Result;
use std::sync::Arc;

pub mod sea_orm_storage;

#[cfg(test)]
pub(crate) mod test_support;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 按登录身份和用户名获取用户
    async fn get_user_by_role_and_username(
        &self,
        role: UserRole,
        username: &str,
    ) -> Result<Option<User>>;
    // 列出某个角色的全部用户
    async fn list_users_by_role(&self, role: UserRole) -> Result<Vec<User>>;
    // 统计某个角色的用户数
    async fn count_users_by_role(&self, role: UserRole) -> Result<u64>;

    /// 作业管理方法
    // 创建作业
    async fn create_assignment(
        &self,
        created_by: i64,
        assignment: CreateAssignmentRequest,
    ) -> Result<Assignment>;
    // 通过ID获取作业
    async fn get_assignment_by_id(&self, id: i64) -> Result<Option<Assignment>>;
    // 列出作业（按截止日期升序）
    async fn list_assignments(&self, query: AssignmentListQuery) -> Result<Vec<Assignment>>;
    // 统计作业数
    async fn count_assignments(&self) -> Result<u64>;

    /// 提交管理方法（仅追加）
    // 创建提交
    async fn create_submission(&self, submission: CreateSubmissionRequest) -> Result<Submission>;
    // 获取学生在某作业上的最新提交
    async fn get_submission_for_assignment(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>>;
    // 获取学生在多个作业上的最新提交
    async fn list_latest_submissions_for_student(
        &self,
        student_id: i64,
        assignment_ids: &[i64],
    ) -> Result<Vec<Submission>>;
    // 列出某作业的全部提交
    async fn list_submissions_for_assignment(&self, assignment_id: i64)
    -> Result<Vec<Submission>>;
    // 列出学生的全部提交
    async fn list_submissions_for_student(&self, student_id: i64) -> Result<Vec<Submission>>;
    // 统计提交数
    async fn count_submissions(&self) -> Result<u64>;

    /// 答疑记录（仅追加）
    // 追加一条消息
    async fn create_doubt_message(&self, message: CreateDoubtMessageRequest)
    -> Result<DoubtMessage>;
    // 按发送顺序列出学生的答疑记录
    async fn list_doubt_messages(&self, student_id: i64) -> Result<Vec<DoubtMessage>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
