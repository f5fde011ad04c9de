//! Boundary between wire shapes and domain entities.
//!
//! Requests are validated here, once, before any persistence call. Update
//! requests follow one rule for every entity: a field that is absent or
//! `null` leaves the stored value unchanged, any other value replaces it.

pub mod requests;
pub mod responses;

use uuid::Uuid;

use crate::errors::ServiceError;

/// Parse an identifier supplied as text, naming the offending field.
pub fn parse_id(field: &str, raw: &str) -> Result<Uuid, ServiceError> {
    Uuid::parse_str(raw.trim()).map_err(|_| ServiceError::Validation(format!("{field} is not a valid identifier: {raw:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_accepts_uuid_and_names_field_on_error() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id("user_id", &id.to_string()), Ok(id));
        match parse_id("employer_id", "42") {
            Err(ServiceError::Validation(msg)) => assert!(msg.starts_with("employer_id")),
            other => panic!("unexpected {other:?}"),
        }
    }
}
