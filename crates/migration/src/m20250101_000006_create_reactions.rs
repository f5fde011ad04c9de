//! Create `reactions` table with FKs to `employees` and `vacancies`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reactions::Table)
                    .if_not_exists()
                    .col(uuid(Reactions::Id).primary_key())
                    .col(uuid(Reactions::EmployeeId).not_null())
                    .col(uuid(Reactions::VacancyId).not_null())
                    .col(string_len(Reactions::Kind, 16).not_null())
                    .col(timestamp_with_time_zone(Reactions::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Reactions::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reaction_employee")
                            .from(Reactions::Table, Reactions::EmployeeId)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reaction_vacancy")
                            .from(Reactions::Table, Reactions::VacancyId)
                            .to(Vacancies::Table, Vacancies::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Reactions::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Reactions { Table, Id, EmployeeId, VacancyId, Kind, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum Employees { Table, Id }

#[derive(DeriveIden)]
enum Vacancies { Table, Id }
