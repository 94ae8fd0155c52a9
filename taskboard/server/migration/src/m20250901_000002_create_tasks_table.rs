use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Tasks::Table)
                    .if_not_exists()
                    .col(pk_auto(Tasks::Id))
                    .col(string(Tasks::Status))
                    .col(string(Tasks::TaskName))
                    .col(string(Tasks::AssignedTo))
                    .col(text(Tasks::TaskDescription))
                    .col(boolean(Tasks::IsUrgent).default(false))
                    .col(string(Tasks::DueDate))
                    .col(string(Tasks::CreatedBy))
                    .to_owned(),
            )
            .await?;

        // The profile page looks tasks up by due date.
        manager
            .create_index(
                Index::create()
                    .name("idx_tasks_due_date")
                    .table(Tasks::Table)
                    .col(Tasks::DueDate)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_tasks_due_date")
                    .table(Tasks::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Tasks::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Tasks {
    Table,
    Id,
    Status,
    TaskName,
    AssignedTo,
    TaskDescription,
    IsUrgent,
    DueDate,
    CreatedBy,
}
