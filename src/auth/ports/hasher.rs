//! Credential hashing port.

use crate::auth::domain::HashingError;
use crate::user::domain::{PasswordHash, PlainPassword};

/// One-way, salted, adaptive password hashing.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialHasher: Send + Sync {
    /// Produces a salted digest for a policy-validated password.
    ///
    /// # Errors
    ///
    /// Returns [`HashingError`] when the primitive rejects the input.
    fn hash(&self, password: &PlainPassword) -> Result<PasswordHash, HashingError>;

    /// Checks `password` against a stored digest in constant time.
    ///
    /// Returns `Ok(false)` on mismatch.
    ///
    /// # Errors
    ///
    /// Returns [`HashingError`] when the stored digest cannot be parsed.
    fn verify(&self, password: &str, hash: &PasswordHash) -> Result<bool, HashingError>;
}
