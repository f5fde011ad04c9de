use thiserror::Error;

use crate::repository::RepoError;

/// Error categories surfaced by every service operation.
///
/// Callers pick a transport status from the variant alone; messages are for
/// logs and humans.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0} already exists")]
    AlreadyExists(&'static str),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("unknown role: {0:?}")]
    UnknownRole(String),
    #[error("{op} {entity} failed: {message}")]
    Persistence { op: &'static str, entity: &'static str, message: String },
    #[error("request cancelled")]
    Cancelled,
    #[error("deadline exceeded")]
    DeadlineExceeded,
}

impl ServiceError {
    /// Translate a repository outcome. `NotFound` and `AlreadyExists` keep
    /// their kind, a dangling reference reports the missing parent, anything
    /// else is wrapped with the failing operation.
    pub fn from_repo(op: &'static str, entity: &'static str, err: RepoError) -> Self {
        match err {
            RepoError::NotFound => ServiceError::NotFound(entity),
            RepoError::AlreadyExists => ServiceError::AlreadyExists(entity),
            RepoError::MissingParent(parent) => ServiceError::NotFound(parent),
            RepoError::Backend(message) => ServiceError::Persistence { op, entity, message },
        }
    }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::Validation(_) => 1001,
            ServiceError::AlreadyExists(_) => 1002,
            ServiceError::NotFound(_) => 1003,
            ServiceError::UnknownRole(_) => 1004,
            ServiceError::Cancelled => 1101,
            ServiceError::DeadlineExceeded => 1102,
            ServiceError::Persistence { .. } => 1200,
        }
    }
}

impl From<models::errors::ModelError> for ServiceError {
    fn from(err: models::errors::ModelError) -> Self {
        match err {
            models::errors::ModelError::Validation(msg) => ServiceError::Validation(msg),
            other @ models::errors::ModelError::NotOneOf { .. } => ServiceError::Validation(other.to_string()),
        }
    }
}
