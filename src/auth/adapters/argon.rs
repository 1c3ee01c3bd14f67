//! Argon2id credential hasher.

use crate::auth::{domain::HashingError, ports::CredentialHasher};
use crate::user::domain::{PasswordHash, PlainPassword};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use password_hash::{PasswordHash as PhcString, SaltString};

const SALT_LEN: usize = 16;

/// Argon2id hasher with the crate's default, fixed cost parameters.
///
/// Digests are PHC strings, so the salt and parameters travel with them.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2CredentialHasher;

impl Argon2CredentialHasher {
    /// Creates a hasher.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl CredentialHasher for Argon2CredentialHasher {
    fn hash(&self, password: &PlainPassword) -> Result<PasswordHash, HashingError> {
        let mut salt_bytes = [0_u8; SALT_LEN];
        getrandom::getrandom(&mut salt_bytes).map_err(|err| HashingError(err.to_string()))?;
        let salt = SaltString::encode_b64(&salt_bytes).map_err(|err| HashingError(err.to_string()))?;

        let phc = Argon2::default()
            .hash_password(password.expose().as_bytes(), &salt)
            .map_err(|err| HashingError(err.to_string()))?
            .to_string();
        Ok(PasswordHash::new(phc))
    }

    fn verify(&self, password: &str, hash: &PasswordHash) -> Result<bool, HashingError> {
        let parsed = PhcString::new(hash.as_str()).map_err(|err| HashingError(err.to_string()))?;
        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(err) => Err(HashingError(err.to_string())),
        }
    }
}
