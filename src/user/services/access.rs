//! Registration and authorized profile reads.

use crate::auth::{
    domain::{Actor, HashingError},
    policy::{self, AccessDenied, Operation},
    ports::CredentialHasher,
};
use crate::error::AccessErrorKind;
use crate::user::{
    domain::{
        DisplayName, EmailAddress, NewUser, PlainPassword, RoleId, UserDomainError, UserId,
        UserProfile,
    },
    ports::{UserRepository, UserRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Candidate account submitted for registration.
#[derive(Clone, PartialEq, Eq)]
pub struct CreateUserRequest {
    name: String,
    email: String,
    password: String,
    role_id: Option<RoleId>,
}

impl CreateUserRequest {
    /// Creates a request with the role left unset.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            role_id: None,
        }
    }

    /// Sets the role to assign.
    #[must_use]
    pub const fn with_role(mut self, role_id: RoleId) -> Self {
        self.role_id = Some(role_id);
        self
    }
}

impl std::fmt::Debug for CreateUserRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateUserRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("role_id", &self.role_id)
            .finish_non_exhaustive()
    }
}

/// Service-level errors for user operations.
#[derive(Debug, Error)]
pub enum UserAccessError {
    /// Input validation failed.
    #[error(transparent)]
    Validation(#[from] UserDomainError),
    /// An account with the email already exists.
    #[error("a user with email {0} already exists")]
    DuplicateEmail(EmailAddress),
    /// The requested role does not exist.
    #[error("unknown role: {0}")]
    UnknownRole(RoleId),
    /// The user does not exist.
    #[error("user not found: {0}")]
    NotFound(UserId),
    /// The actor may not read the profile.
    #[error(transparent)]
    Forbidden(#[from] AccessDenied),
    /// Password hashing failed.
    #[error(transparent)]
    Hashing(#[from] HashingError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(UserRepositoryError),
}

impl UserAccessError {
    /// Returns the boundary classification of the error.
    #[must_use]
    pub const fn kind(&self) -> AccessErrorKind {
        match self {
            Self::Validation(_) | Self::UnknownRole(_) => AccessErrorKind::Validation,
            Self::DuplicateEmail(_) => AccessErrorKind::Conflict,
            Self::NotFound(_) => AccessErrorKind::NotFound,
            Self::Forbidden(_) => AccessErrorKind::Forbidden,
            Self::Hashing(_) | Self::Repository(_) => AccessErrorKind::Internal,
        }
    }
}

impl From<UserRepositoryError> for UserAccessError {
    fn from(err: UserRepositoryError) -> Self {
        match err {
            UserRepositoryError::DuplicateEmail(email) => Self::DuplicateEmail(email),
            UserRepositoryError::UnknownRole(role_id) => Self::UnknownRole(role_id),
            other => Self::Repository(other),
        }
    }
}

/// Result type for user access operations.
pub type UserAccessResult<T> = Result<T, UserAccessError>;

/// User account orchestration service.
#[derive(Clone)]
pub struct UserAccessService<R, H, C>
where
    R: UserRepository,
    H: CredentialHasher + 'static,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    hasher: Arc<H>,
    clock: Arc<C>,
}

impl<R, H, C> UserAccessService<R, H, C>
where
    R: UserRepository,
    H: CredentialHasher + 'static,
    C: Clock + Send + Sync,
{
    /// Creates a new user access service.
    #[must_use]
    pub const fn new(repository: Arc<R>, hasher: Arc<H>, clock: Arc<C>) -> Self {
        Self {
            repository,
            hasher,
            clock,
        }
    }

    /// Registers a new account.
    ///
    /// The password is hashed before it reaches the repository.
    ///
    /// # Errors
    ///
    /// Returns [`UserAccessError::Validation`] for malformed fields or a
    /// missing role, [`UserAccessError::DuplicateEmail`] when the address is
    /// taken, [`UserAccessError::UnknownRole`] when the role does not exist,
    /// and [`UserAccessError::Hashing`] or [`UserAccessError::Repository`] on
    /// infrastructure failure.
    pub async fn create_user(&self, request: CreateUserRequest) -> UserAccessResult<UserProfile> {
        let name = DisplayName::new(request.name)?;
        let email = EmailAddress::new(request.email)?;
        let password = PlainPassword::new(request.password)?;
        let role_id = request.role_id.ok_or(UserDomainError::MissingRole)?;

        if self.repository.find_by_email(&email).await?.is_some() {
            return Err(UserAccessError::DuplicateEmail(email));
        }

        let hasher = Arc::clone(&self.hasher);
        let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|err| HashingError(err.to_string()))??;

        let new_user = NewUser::new(name, email, password_hash, Some(role_id), &*self.clock);
        let user = self.repository.create(&new_user).await?;
        tracing::info!(user_id = %user.id(), role_id = %role_id, "user created");
        Ok(user.profile())
    }

    /// Returns the profile of `id`.
    ///
    /// Authorization is decided before the lookup, so callers cannot probe
    /// for the existence of accounts they may not read.
    ///
    /// # Errors
    ///
    /// Returns [`UserAccessError::Forbidden`] unless `actor` is the user or a
    /// manager, and [`UserAccessError::NotFound`] when the account does not
    /// exist.
    pub async fn get_user(&self, id: UserId, actor: &Actor) -> UserAccessResult<UserProfile> {
        policy::authorize(actor, id, Operation::ReadUser)?;
        self.repository
            .find_by_id(id)
            .await?
            .map(|user| user.profile())
            .ok_or(UserAccessError::NotFound(id))
    }
}
