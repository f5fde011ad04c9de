use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Resumes: lookup by owning employee
        manager
            .create_index(
                Index::create()
                    .name("idx_resume_employee")
                    .table(Resumes::Table)
                    .col(Resumes::EmployeeId)
                    .to_owned(),
            )
            .await?;

        // Vacancies: owner-scoped listing, newest first
        manager
            .create_index(
                Index::create()
                    .name("idx_vacancy_employer_created")
                    .table(Vacancies::Table)
                    .col(Vacancies::EmployerId)
                    .col(Vacancies::CreatedAt)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_vacancy_created")
                    .table(Vacancies::Table)
                    .col(Vacancies::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // Reactions: owner-scoped listing
        manager
            .create_index(
                Index::create()
                    .name("idx_reaction_employee_created")
                    .table(Reactions::Table)
                    .col(Reactions::EmployeeId)
                    .col(Reactions::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // Reactions: one reaction per (employee, vacancy)
        manager
            .create_index(
                Index::create()
                    .name("uniq_reaction_employee_vacancy")
                    .table(Reactions::Table)
                    .col(Reactions::EmployeeId)
                    .col(Reactions::VacancyId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_resume_employee").table(Resumes::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_vacancy_employer_created").table(Vacancies::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_vacancy_created").table(Vacancies::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_reaction_employee_created").table(Reactions::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("uniq_reaction_employee_vacancy").table(Reactions::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Resumes { Table, EmployeeId }

#[derive(DeriveIden)]
enum Vacancies { Table, EmployerId, CreatedAt }

#[derive(DeriveIden)]
enum Reactions { Table, EmployeeId, VacancyId, CreatedAt }
