//! Repository ports for user accounts and roles.

use crate::user::domain::{EmailAddress, NewRole, NewUser, Role, RoleId, RoleSlug, User, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for user and role repository operations.
pub type UserRepositoryResult<T> = Result<T, UserRepositoryError>;

/// User account persistence contract.
///
/// Read paths return users with their role eagerly resolved.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds a user by identifier.
    ///
    /// Returns `None` when the user does not exist.
    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>>;

    /// Finds a user by email address.
    ///
    /// Returns `None` when no account uses the address.
    async fn find_by_email(&self, email: &EmailAddress) -> UserRepositoryResult<Option<User>>;

    /// Stores a new account and returns it with its assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::DuplicateEmail`] when the address is
    /// already taken or [`UserRepositoryError::UnknownRole`] when the role
    /// reference does not exist.
    async fn create(&self, user: &NewUser) -> UserRepositoryResult<User>;
}

/// Role persistence contract used for seeding.
#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// Finds a role by slug.
    ///
    /// Returns `None` when no role uses the slug.
    async fn find_role_by_slug(&self, slug: &RoleSlug) -> UserRepositoryResult<Option<Role>>;

    /// Stores a new role and returns it with its assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::DuplicateRole`] when the slug is taken.
    async fn create_role(&self, role: &NewRole) -> UserRepositoryResult<Role>;
}

/// Errors returned by user and role repository implementations.
#[derive(Debug, Clone, Error)]
pub enum UserRepositoryError {
    /// An account with the same email already exists.
    #[error("duplicate email address: {0}")]
    DuplicateEmail(EmailAddress),

    /// The referenced role does not exist.
    #[error("unknown role: {0}")]
    UnknownRole(RoleId),

    /// A role with the same slug already exists.
    #[error("duplicate role slug: {0}")]
    DuplicateRole(RoleSlug),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl UserRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
