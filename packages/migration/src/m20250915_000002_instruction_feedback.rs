use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKey, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum InstructionFeedback {
    Table,
    Id,
    InstructionId,
    UserId,
    IsHelpful,
    Comment,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum InstructionSteps {
    Table,
    Id,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(InstructionFeedback::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(InstructionFeedback::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(
                        ColumnDef::new(InstructionFeedback::InstructionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InstructionFeedback::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InstructionFeedback::IsHelpful)
                            .boolean()
                            .not_null(),
                    )
                    .col(ColumnDef::new(InstructionFeedback::Comment).text().null())
                    .col(
                        ColumnDef::new(InstructionFeedback::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InstructionFeedback::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_instruction_feedback_instruction_id")
                            .from(InstructionFeedback::Table, InstructionFeedback::InstructionId)
                            .to(InstructionSteps::Table, InstructionSteps::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_instruction_feedback_user_id")
                            .from(InstructionFeedback::Table, InstructionFeedback::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One opinion per reader per instruction; resubmitting overwrites it.
        manager
            .create_index(
                Index::create()
                    .name("idx_instruction_feedback_unique")
                    .table(InstructionFeedback::Table)
                    .col(InstructionFeedback::InstructionId)
                    .col(InstructionFeedback::UserId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(InstructionFeedback::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await
    }
}
