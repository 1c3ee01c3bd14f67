//! HMAC-signed JWT session tokens.

use crate::auth::{
    domain::{SESSION_LIFETIME_SECS, SessionClaim, SessionToken, TokenError},
    ports::SessionTokens,
};
use crate::user::domain::{RoleSlug, UserId};
use chrono::DateTime;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Algorithms accepted on verification; anything outside the HMAC family is
/// rejected so a token cannot substitute its own algorithm.
const ACCEPTED_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

#[derive(Debug, Serialize, Deserialize)]
struct WireClaims {
    sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    iss: String,
    iat: i64,
    exp: i64,
}

/// Session token service signing HS256 JWTs with a shared secret.
///
/// Expiry is checked against the injected clock with no leeway.
pub struct JwtSessionTokens<C>
where
    C: Clock + Send + Sync,
{
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    clock: Arc<C>,
}

impl<C> JwtSessionTokens<C>
where
    C: Clock + Send + Sync,
{
    /// Creates a token service.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Configuration`] when the secret or issuer is
    /// empty.
    pub fn new(secret: &str, issuer: impl Into<String>, clock: Arc<C>) -> Result<Self, TokenError> {
        let issuer = issuer.into();
        if secret.is_empty() {
            return Err(TokenError::Configuration(
                "signing secret must not be empty".to_owned(),
            ));
        }
        if issuer.trim().is_empty() {
            return Err(TokenError::Configuration(
                "issuer must not be empty".to_owned(),
            ));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer,
            clock,
        })
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = ACCEPTED_ALGORITHMS.to_vec();
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation.set_issuer(&[self.issuer.as_str()]);
        validation
    }
}

impl<C> fmt::Debug for JwtSessionTokens<C>
where
    C: Clock + Send + Sync,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtSessionTokens")
            .field("issuer", &self.issuer)
            .finish_non_exhaustive()
    }
}

impl<C> SessionTokens for JwtSessionTokens<C>
where
    C: Clock + Send + Sync,
{
    fn issue(&self, subject: UserId, role: Option<&RoleSlug>) -> Result<SessionToken, TokenError> {
        let issued_at = self.clock.utc().timestamp();
        let claims = WireClaims {
            sub: subject.to_string(),
            role: role.map(|slug| slug.as_str().to_owned()),
            iss: self.issuer.clone(),
            iat: issued_at,
            exp: issued_at + SESSION_LIFETIME_SECS,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|err| TokenError::Signing(err.to_string()))?;
        Ok(SessionToken::new(token))
    }

    fn verify(&self, token: &str) -> Result<SessionClaim, TokenError> {
        let data = decode::<WireClaims>(token, &self.decoding_key, &self.validation())
            .map_err(|err| TokenError::Invalid(err.to_string()))?;
        let claims = data.claims;

        if self.clock.utc().timestamp() > claims.exp {
            return Err(TokenError::Expired);
        }

        let subject = claims
            .sub
            .parse::<UserId>()
            .map_err(|err| TokenError::Invalid(err.to_string()))?;
        let role = claims
            .role
            .map(RoleSlug::new)
            .transpose()
            .map_err(|err| TokenError::Invalid(err.to_string()))?;
        let issued_at = DateTime::from_timestamp(claims.iat, 0)
            .ok_or_else(|| TokenError::Invalid("issued-at out of range".to_owned()))?;
        let expires_at = DateTime::from_timestamp(claims.exp, 0)
            .ok_or_else(|| TokenError::Invalid("expiry out of range".to_owned()))?;

        Ok(SessionClaim {
            subject,
            role,
            issuer: claims.iss,
            issued_at,
            expires_at,
        })
    }
}
