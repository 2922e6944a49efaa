use super::SeaOrmStorage;
use crate::entity::doubt_messages::{ActiveModel, Column, Entity as DoubtMessages};
use crate::errors::{PortalError, Result};
use crate::models::doubts::{entities::DoubtMessage, requests::CreateDoubtMessageRequest};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 追加一条答疑消息
    pub async fn create_doubt_message_impl(
        &self,
        req: CreateDoubtMessageRequest,
    ) -> Result<DoubtMessage> {
        let model = ActiveModel {
            student_id: Set(req.student_id),
            sender: Set(req.sender.to_string()),
            message: Set(req.message),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("保存答疑消息失败: {e}")))?;

        Ok(result.into_doubt_message())
    }

    /// 按发送顺序列出学生的答疑记录
    pub async fn list_doubt_messages_impl(&self, student_id: i64) -> Result<Vec<DoubtMessage>> {
        let rows = DoubtMessages::find()
            .filter(Column::StudentId.eq(student_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询答疑记录失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_doubt_message()).collect())
    }
}
