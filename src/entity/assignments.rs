//! 作业实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "assignments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    pub kind: String,
    pub class_name: String,
    pub section: String,
    #[sea_orm(column_type = "Text")]
    pub instructions: String,
    pub created_by: i64,
    pub due_date: i64,
    #[sea_orm(column_type = "Text", nullable)]
    pub form_schema: Option<String>,
    pub source_document: Option<String>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::CreatedBy",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    Creator,
    #[sea_orm(has_many = "super::submissions::Entity")]
    Submissions,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Creator.def()
    }
}

impl Related<super::submissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submissions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_assignment(self) -> crate::models::assignments::entities::Assignment {
        use crate::models::assignments::entities::{Assignment, AssignmentKind};
        use chrono::{DateTime, Utc};

        let form_schema = self.form_schema.and_then(|json| {
            serde_json::from_str(&json)
                .map_err(|e| {
                    tracing::warn!("作业 {} 的表单结构无法解析: {}", self.id, e);
                })
                .ok()
        });

        Assignment {
            id: self.id,
            title: self.title,
            kind: self
                .kind
                .parse::<AssignmentKind>()
                .unwrap_or(AssignmentKind::Worksheet),
            class_name: self.class_name,
            section: self.section,
            instructions: self.instructions,
            created_by: self.created_by,
            due_date: DateTime::<Utc>::from_timestamp(self.due_date, 0).unwrap_or_default(),
            form_schema,
            source_document: self.source_document,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}
