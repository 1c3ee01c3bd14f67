//! Error types for user domain validation.

use thiserror::Error;

/// Errors returned while constructing user domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserDomainError {
    /// The display name is outside the accepted length range.
    #[error("name must be between {min} and {max} characters, got {actual}")]
    InvalidName {
        /// Minimum accepted length.
        min: usize,
        /// Maximum accepted length.
        max: usize,
        /// Length of the rejected value.
        actual: usize,
    },

    /// The email address is not syntactically valid.
    #[error("invalid email address '{0}'")]
    InvalidEmail(String),

    /// The password is shorter than the minimum policy length.
    #[error("password must be at least {min} characters")]
    PasswordTooShort {
        /// Minimum accepted length.
        min: usize,
    },

    /// The role slug is empty or contains unsupported characters.
    #[error("invalid role slug '{0}'")]
    InvalidRoleSlug(String),

    /// A role label is empty after trimming.
    #[error("role label must not be empty")]
    EmptyRoleLabel,

    /// No role was supplied for a new account.
    #[error("a role must be assigned")]
    MissingRole,

    /// The user identifier could not be parsed.
    #[error("invalid user identifier '{0}'")]
    InvalidUserId(String),
}
