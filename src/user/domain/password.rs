//! Plaintext password candidates and stored password hashes.
//!
//! Neither type implements `Serialize`, and both redact their contents from
//! `Debug` output.

use super::UserDomainError;
use std::fmt;

/// Password supplied by a caller, validated against the length policy.
#[derive(Clone, PartialEq, Eq)]
pub struct PlainPassword(String);

impl PlainPassword {
    /// Shortest password accepted at account creation.
    pub const MIN_LENGTH: usize = 8;

    /// Creates a password candidate that satisfies the length policy.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::PasswordTooShort`] when the value has fewer
    /// than [`Self::MIN_LENGTH`] characters.
    pub fn new(value: impl Into<String>) -> Result<Self, UserDomainError> {
        let value = value.into();
        if value.chars().count() < Self::MIN_LENGTH {
            return Err(UserDomainError::PasswordTooShort {
                min: Self::MIN_LENGTH,
            });
        }
        Ok(Self(value))
    }

    /// Returns the plaintext for hashing or verification.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PlainPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PlainPassword(<redacted>)")
    }
}

/// One-way password digest in PHC string format.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wraps a digest produced by a credential hasher or read from storage.
    #[must_use]
    pub const fn new(value: String) -> Self {
        Self(value)
    }

    /// Returns the digest for verification or persistence.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}
