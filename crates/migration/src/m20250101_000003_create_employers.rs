//! Create `employers` table with FK to `users`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Employers::Table)
                    .if_not_exists()
                    .col(uuid(Employers::Id).primary_key())
                    .col(uuid(Employers::UserId).unique_key().not_null())
                    .col(string_len(Employers::CompanyName, 255).not_null())
                    .col(text(Employers::CompanyDescription).not_null())
                    .col(string_len(Employers::CompanyWebsite, 512).not_null())
                    .col(string_len(Employers::CompanyLocation, 255).not_null())
                    .col(string_len(Employers::CompanySize, 32).not_null())
                    .col(timestamp_with_time_zone(Employers::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Employers::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employer_user")
                            .from(Employers::Table, Employers::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Employers::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Employers {
    Table,
    Id,
    UserId,
    CompanyName,
    CompanyDescription,
    CompanyWebsite,
    CompanyLocation,
    CompanySize,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Users { Table, Id }
