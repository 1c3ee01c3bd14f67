//! Error types for credential hashing and session tokens.

use thiserror::Error;

/// The password hashing primitive rejected its input or a stored digest.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("password hashing failed: {0}")]
pub struct HashingError(pub String);

/// Errors returned while issuing or verifying session tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// The token is malformed, its signature or algorithm is wrong, or its
    /// claims are unusable.
    #[error("invalid session token: {0}")]
    Invalid(String),

    /// The token verified but its expiry instant has passed.
    #[error("session token has expired")]
    Expired,

    /// The token could not be signed.
    #[error("failed to sign session token: {0}")]
    Signing(String),

    /// The token service was configured with unusable parameters.
    #[error("invalid token configuration: {0}")]
    Configuration(String),
}
