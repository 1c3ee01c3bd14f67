//! Boundary error taxonomy.
//!
//! Service errors carry their own detail; callers that translate them into a
//! transport response only need the coarse [`AccessErrorKind`].

use std::fmt;

/// Coarse classification of a failed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessErrorKind {
    /// Missing, invalid or expired credentials.
    Unauthenticated,
    /// Authenticated but not entitled.
    Forbidden,
    /// The resource does not exist.
    NotFound,
    /// The request collides with existing state, e.g. a duplicate email.
    Conflict,
    /// The input is malformed.
    Validation,
    /// Encryption or decryption failed.
    Confidentiality,
    /// Anything else, including repository failures.
    Internal,
}

impl AccessErrorKind {
    /// Returns the canonical snake-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unauthenticated => "unauthenticated",
            Self::Forbidden => "forbidden",
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::Validation => "validation",
            Self::Confidentiality => "confidentiality",
            Self::Internal => "internal",
        }
    }

    /// Returns the HTTP status code conventionally used for the kind.
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::Unauthenticated => 401,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::Conflict => 409,
            Self::Validation => 400,
            Self::Confidentiality | Self::Internal => 500,
        }
    }
}

impl fmt::Display for AccessErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
