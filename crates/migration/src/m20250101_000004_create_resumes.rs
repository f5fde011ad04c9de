//! Create `resumes` table with FK to `employees`.
//!
//! The file itself lives in external storage; only its id is kept here.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Resumes::Table)
                    .if_not_exists()
                    .col(uuid(Resumes::Id).primary_key())
                    .col(uuid(Resumes::EmployeeId).not_null())
                    .col(string_len(Resumes::FileId, 255).not_null())
                    .col(timestamp_with_time_zone(Resumes::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Resumes::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_resume_employee")
                            .from(Resumes::Table, Resumes::EmployeeId)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Resumes::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Resumes { Table, Id, EmployeeId, FileId, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum Employees { Table, Id }
