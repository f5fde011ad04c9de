//! Create `vacancies` table with FK to `employers`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Vacancies::Table)
                    .if_not_exists()
                    .col(uuid(Vacancies::Id).primary_key())
                    .col(uuid(Vacancies::EmployerId).not_null())
                    .col(ColumnDef::new(Vacancies::Tags).array(ColumnType::Text).not_null())
                    .col(string_len(Vacancies::Title, 255).not_null())
                    .col(text(Vacancies::Description).not_null())
                    .col(string_len(Vacancies::Location, 255).not_null())
                    .col(string_len(Vacancies::Salary, 128).not_null())
                    .col(timestamp_with_time_zone(Vacancies::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Vacancies::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_vacancy_employer")
                            .from(Vacancies::Table, Vacancies::EmployerId)
                            .to(Employers::Table, Employers::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Vacancies::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Vacancies { Table, Id, EmployerId, Tags, Title, Description, Location, Salary, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum Employers { Table, Id }
