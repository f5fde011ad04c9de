//! Create `employees` table with FK to `users`.
//!
//! One job-seeker profile per user (`user_id` is unique).
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Employees::Table)
                    .if_not_exists()
                    .col(uuid(Employees::Id).primary_key())
                    .col(uuid(Employees::UserId).unique_key().not_null())
                    .col(ColumnDef::new(Employees::Tags).array(ColumnType::Text).not_null())
                    .col(timestamp_with_time_zone(Employees::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Employees::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employee_user")
                            .from(Employees::Table, Employees::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Employees::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Employees { Table, Id, UserId, Tags, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum Users { Table, Id }
