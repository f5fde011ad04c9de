//! Create `users` table.
//!
//! `role` is stored as free text; the service layer decides which values it understands.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(uuid(Users::Id).primary_key())
                    .col(string_len(Users::Username, 255).not_null())
                    .col(string_len(Users::ChatId, 64).not_null())
                    .col(boolean(Users::IsActive).not_null())
                    .col(boolean(Users::IsPremium).not_null())
                    .col(string_len(Users::Role, 32).not_null())
                    .col(ColumnDef::new(Users::PasswordHash).string().null())
                    .col(timestamp_with_time_zone(Users::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Users::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Users::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Users { Table, Id, Username, ChatId, IsActive, IsPremium, Role, PasswordHash, CreatedAt, UpdatedAt }
