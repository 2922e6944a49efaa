use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建答疑记录表（学生提问与 AI 回复按 id 顺序排列）
        manager
            .create_table(
                Table::create()
                    .table(DoubtMessages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DoubtMessages::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(DoubtMessages::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(DoubtMessages::Sender).string().not_null())
                    .col(ColumnDef::new(DoubtMessages::Message).text().not_null())
                    .col(
                        ColumnDef::new(DoubtMessages::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(DoubtMessages::Table, DoubtMessages::StudentId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_doubt_messages_student")
                    .table(DoubtMessages::Table)
                    .col(DoubtMessages::StudentId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DoubtMessages::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    #[sea_orm(iden = "users")]
    Table,
    Id,
}

#[derive(DeriveIden)]
enum DoubtMessages {
    #[sea_orm(iden = "doubt_messages")]
    Table,
    Id,
    StudentId,
    Sender,
    Message,
    CreatedAt,
}
