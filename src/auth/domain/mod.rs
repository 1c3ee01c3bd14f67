//! Domain model for authentication.

mod actor;
mod claim;
mod error;

pub use actor::Actor;
pub use claim::{SESSION_LIFETIME_SECS, SessionClaim, SessionToken, session_lifetime};
pub use error::{HashingError, TokenError};
