use thiserror::Error;

/// Rejections raised by the column validators before a row is written.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("{field} must be one of {}", .allowed.join(", "))]
    NotOneOf { field: &'static str, allowed: &'static [&'static str] },
}
