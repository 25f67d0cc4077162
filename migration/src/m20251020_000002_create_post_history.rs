use sea_orm_migration::prelude::*;

use crate::m20251020_000001_create_scraping_tasks::ScrapingTasks;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PostHistory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PostHistory::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PostHistory::TaskId).integer().not_null())
                    .col(ColumnDef::new(PostHistory::NoteUrl).string().not_null())
                    .col(ColumnDef::new(PostHistory::NoteId).string().not_null())
                    .col(ColumnDef::new(PostHistory::Title).string().not_null())
                    .col(
                        ColumnDef::new(PostHistory::PostedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_post_history_task_id")
                            .from(PostHistory::Table, PostHistory::TaskId)
                            .to(ScrapingTasks::Table, ScrapingTasks::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PostHistory::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum PostHistory {
    Table,
    Id,
    TaskId,
    NoteUrl,
    NoteId,
    Title,
    PostedAt,
}
