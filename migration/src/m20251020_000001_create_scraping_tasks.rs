use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ScrapingTasks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ScrapingTasks::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ScrapingTasks::Url).string().not_null())
                    .col(
                        ColumnDef::new(ScrapingTasks::Status)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(ScrapingTasks::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(ScrapingTasks::CompletedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(ScrapingTasks::ErrorMessage).text())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_task_status")
                    .table(ScrapingTasks::Table)
                    .col(ScrapingTasks::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_task_created")
                    .table(ScrapingTasks::Table)
                    .col(ScrapingTasks::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ScrapingTasks::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum ScrapingTasks {
    Table,
    Id,
    Url,
    Status,
    CreatedAt,
    CompletedAt,
    ErrorMessage,
}
