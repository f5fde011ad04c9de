use argon2::password_hash::{PasswordHasher, SaltString};
use argon2::Argon2;
use rand::rngs::OsRng;

use crate::errors::ServiceError;

/// Turns a plaintext password into the stored credential string.
pub trait CredentialHasher: Send + Sync {
    fn hash(&self, plain: &str) -> Result<String, ServiceError>;
}

/// Argon2id with a random salt per password (PHC string output).
#[derive(Debug, Clone, Default)]
pub struct Argon2Hasher;

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, plain: &str) -> Result<String, ServiceError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(plain.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| ServiceError::Persistence { op: "hash", entity: "user", message: e.to_string() })
    }
}
