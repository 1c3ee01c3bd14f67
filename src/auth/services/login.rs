//! Credential exchange: email and password for a session token.

use crate::auth::{
    domain::{HashingError, SessionToken, TokenError},
    ports::{CredentialHasher, SessionTokens},
};
use crate::error::AccessErrorKind;
use crate::user::{
    domain::EmailAddress,
    ports::{UserRepository, UserRepositoryError},
};
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for login.
#[derive(Debug, Error)]
pub enum LoginError {
    /// Unknown email or wrong password; the two are indistinguishable.
    #[error("invalid credentials")]
    InvalidCredentials,
    /// The stored digest could not be checked.
    #[error(transparent)]
    Hashing(#[from] HashingError),
    /// The token could not be issued.
    #[error(transparent)]
    Token(#[from] TokenError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] UserRepositoryError),
}

impl LoginError {
    /// Returns the boundary classification of the error.
    #[must_use]
    pub const fn kind(&self) -> AccessErrorKind {
        match self {
            Self::InvalidCredentials => AccessErrorKind::Unauthenticated,
            Self::Hashing(_) | Self::Token(_) | Self::Repository(_) => AccessErrorKind::Internal,
        }
    }
}

/// Result type for login operations.
pub type LoginResult<T> = Result<T, LoginError>;

/// Authenticates users by email and password.
#[derive(Clone)]
pub struct LoginService<R, H, T>
where
    R: UserRepository,
    H: CredentialHasher + 'static,
    T: SessionTokens,
{
    users: Arc<R>,
    hasher: Arc<H>,
    tokens: Arc<T>,
}

impl<R, H, T> LoginService<R, H, T>
where
    R: UserRepository,
    H: CredentialHasher + 'static,
    T: SessionTokens,
{
    /// Creates a login service.
    #[must_use]
    pub const fn new(users: Arc<R>, hasher: Arc<H>, tokens: Arc<T>) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }

    /// Exchanges credentials for a session token.
    ///
    /// The email is normalized the same way as at registration, so lookups
    /// are case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns [`LoginError::InvalidCredentials`] when the email is malformed
    /// or unknown or the password does not match.
    pub async fn login(&self, email: &str, password: &str) -> LoginResult<SessionToken> {
        let Ok(address) = EmailAddress::new(email) else {
            return Err(LoginError::InvalidCredentials);
        };
        let Some(user) = self.users.find_by_email(&address).await? else {
            tracing::debug!("login rejected: unknown email");
            return Err(LoginError::InvalidCredentials);
        };

        let hasher = Arc::clone(&self.hasher);
        let digest = user.password_hash().clone();
        let candidate = password.to_owned();
        let matches = tokio::task::spawn_blocking(move || hasher.verify(&candidate, &digest))
            .await
            .map_err(|err| HashingError(err.to_string()))??;
        if !matches {
            tracing::debug!(user_id = %user.id(), "login rejected: password mismatch");
            return Err(LoginError::InvalidCredentials);
        }

        let token = self
            .tokens
            .issue(user.id(), user.role().map(|role| &role.slug))?;
        tracing::info!(user_id = %user.id(), "session issued");
        Ok(token)
    }
}
