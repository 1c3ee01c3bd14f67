//! Bearer-token authentication of inbound requests.

use crate::auth::{
    domain::{Actor, TokenError},
    ports::SessionTokens,
};
use crate::error::AccessErrorKind;
use std::sync::Arc;
use thiserror::Error;

const BEARER_PREFIX: &str = "Bearer ";

/// Errors returned while authenticating a request.
#[derive(Debug, Error)]
pub enum AuthenticationError {
    /// No credentials were presented.
    #[error("missing bearer credentials")]
    MissingCredentials,
    /// The authorization value is not of the form `Bearer <token>`.
    #[error("malformed bearer credentials")]
    MalformedCredentials,
    /// The token failed verification or has expired.
    #[error(transparent)]
    Token(#[from] TokenError),
}

impl AuthenticationError {
    /// Returns the boundary classification of the error.
    #[must_use]
    pub const fn kind(&self) -> AccessErrorKind {
        AccessErrorKind::Unauthenticated
    }
}

/// Turns an `Authorization` header value into an [`Actor`].
#[derive(Clone)]
pub struct BearerAuthenticator<T>
where
    T: SessionTokens,
{
    tokens: Arc<T>,
}

impl<T> BearerAuthenticator<T>
where
    T: SessionTokens,
{
    /// Creates an authenticator backed by `tokens`.
    #[must_use]
    pub const fn new(tokens: Arc<T>) -> Self {
        Self { tokens }
    }

    /// Authenticates an optional `Authorization` header value.
    ///
    /// # Errors
    ///
    /// Returns [`AuthenticationError`] when the header is absent, malformed,
    /// or carries a token that does not verify.
    pub fn authenticate(&self, header: Option<&str>) -> Result<Actor, AuthenticationError> {
        let value = header.ok_or(AuthenticationError::MissingCredentials)?;
        let token = value
            .strip_prefix(BEARER_PREFIX)
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(AuthenticationError::MalformedCredentials)?;
        let claim = self.tokens.verify(token).inspect_err(|err| {
            tracing::debug!(error = %err, "bearer token rejected");
        })?;
        Ok(claim.into_actor())
    }
}
