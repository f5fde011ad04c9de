//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20250101_000001_create_users;
mod m20250101_000002_create_employees;
mod m20250101_000003_create_employers;
mod m20250101_000004_create_resumes;
mod m20250101_000005_create_vacancies;
mod m20250101_000006_create_reactions;
mod m20250101_000010_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_users::Migration),
            Box::new(m20250101_000002_create_employees::Migration),
            Box::new(m20250101_000003_create_employers::Migration),
            Box::new(m20250101_000004_create_resumes::Migration),
            Box::new(m20250101_000005_create_vacancies::Migration),
            Box::new(m20250101_000006_create_reactions::Migration),
            // Indexes should always be applied last
            Box::new(m20250101_000010_add_indexes::Migration),
        ]
    }
}
