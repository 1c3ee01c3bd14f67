//! Validated email address value.

use super::UserDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalized email address used as the unique login identifier.
///
/// Addresses are trimmed and lowercased so that uniqueness checks are
/// case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Longest address accepted, matching the storage column width.
    pub const MAX_LENGTH: usize = 320;

    /// Creates a validated email address.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::InvalidEmail`] when the value does not have a
    /// single `@` separating a non-empty local part from a dotted domain, or
    /// exceeds [`Self::MAX_LENGTH`].
    pub fn new(value: impl Into<String>) -> Result<Self, UserDomainError> {
        let raw = value.into();
        let normalized = raw.trim().to_lowercase();

        let mut parts = normalized.split('@');
        let local = parts.next().unwrap_or_default();
        let domain = parts.next().unwrap_or_default();
        let has_more_parts = parts.next().is_some();

        let domain_is_valid = domain.contains('.')
            && !domain.starts_with('.')
            && !domain.ends_with('.')
            && !domain.contains("..");
        let is_valid = !local.is_empty()
            && domain_is_valid
            && !has_more_parts
            && normalized.len() <= Self::MAX_LENGTH
            && !normalized.chars().any(char::is_whitespace);

        if !is_valid {
            return Err(UserDomainError::InvalidEmail(raw));
        }

        Ok(Self(normalized))
    }

    /// Returns the address as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
