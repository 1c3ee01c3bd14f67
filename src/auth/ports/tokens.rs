//! Session token port.

use crate::auth::domain::{SessionClaim, SessionToken, TokenError};
use crate::user::domain::{RoleSlug, UserId};

/// Issues and verifies signed, time-bounded session tokens.
///
/// There is no revocation list: a leaked token stays valid until it expires
/// or the signing secret is rotated.
pub trait SessionTokens: Send + Sync {
    /// Issues a token for `subject` carrying its role slug.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Signing`] when the token cannot be signed.
    fn issue(&self, subject: UserId, role: Option<&RoleSlug>) -> Result<SessionToken, TokenError>;

    /// Verifies a token and returns its claim.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Expired`] when the expiry instant has passed and
    /// [`TokenError::Invalid`] for every other verification failure.
    fn verify(&self, token: &str) -> Result<SessionClaim, TokenError>;
}
