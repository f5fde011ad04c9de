//! Service layer of the recruiting backend.
//! - Generic CRUD over six entity types with server-owned ids and timestamps.
//! - Role-based profile resolution and ownership-scoped listings.
//! - Request conversion and validation at the boundary.
//! - Repository contracts with SeaORM and in-memory implementations.

pub mod context;
pub mod converter;
pub mod domain;
pub mod entity_service;
pub mod errors;
pub mod hashing;
pub mod listing;
pub mod profile;
pub mod repo;
pub mod repository;
pub mod user_service;
#[cfg(test)]
pub mod test_support;

use domain::{Employee, Employer, Reaction, Resume, Vacancy};
use entity_service::EntityService;
use repository::{ForeignKeyLookup, OwnedListing};

pub type EmployeeService = EntityService<Employee, dyn ForeignKeyLookup<Employee>>;
pub type EmployerService = EntityService<Employer, dyn ForeignKeyLookup<Employer>>;
pub type ResumeService = EntityService<Resume, dyn ForeignKeyLookup<Resume>>;
pub type VacancyService = EntityService<Vacancy, dyn OwnedListing<Vacancy>>;
pub type ReactionService = EntityService<Reaction, dyn OwnedListing<Reaction>>;

pub use context::RequestContext;
pub use errors::ServiceError;
pub use profile::ProfileResolver;
pub use user_service::UserService;
