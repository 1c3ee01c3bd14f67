//! Session claims and the opaque token that carries them.

use super::Actor;
use crate::user::domain::{RoleSlug, UserId};
use chrono::{DateTime, TimeDelta, Utc};
use std::fmt;

/// Fixed session lifetime, in seconds, measured from issuance.
pub const SESSION_LIFETIME_SECS: i64 = 2 * 60 * 60;

/// Returns the fixed session lifetime.
#[must_use]
pub fn session_lifetime() -> TimeDelta {
    TimeDelta::seconds(SESSION_LIFETIME_SECS)
}

/// Signed bearer token: three dot-separated base64url segments.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wraps an encoded token.
    #[must_use]
    pub const fn new(value: String) -> Self {
        Self(value)
    }

    /// Returns the encoded token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

/// Decoded and verified payload of a session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionClaim {
    /// Authenticated user.
    pub subject: UserId,
    /// Role slug at issuance; `None` for users without a role.
    pub role: Option<RoleSlug>,
    /// Issuer the token was minted by.
    pub issuer: String,
    /// Issuance instant, second precision.
    pub issued_at: DateTime<Utc>,
    /// Expiry instant, [`session_lifetime`] after issuance.
    pub expires_at: DateTime<Utc>,
}

impl SessionClaim {
    /// Converts the claim into the actor context used for authorization.
    #[must_use]
    pub fn into_actor(self) -> Actor {
        Actor::new(self.subject, self.role)
    }
}
