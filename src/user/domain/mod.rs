//! Domain model for user accounts and roles.
//!
//! Accounts own their credential digest; every outward view goes through
//! [`UserProfile`], which has no field for it.

mod email;
mod error;
mod ids;
mod password;
mod role;
mod user;

pub use email::EmailAddress;
pub use error::UserDomainError;
pub use ids::{RoleId, UserId};
pub use password::{PasswordHash, PlainPassword};
pub use role::{NewRole, Role, RoleSlug};
pub use user::{DisplayName, NewUser, PersistedUserData, User, UserProfile};
