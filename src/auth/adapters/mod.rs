//! Adapter implementations for credential hashing and session tokens.

mod argon;
mod jwt;

pub use argon::Argon2CredentialHasher;
pub use jwt::JwtSessionTokens;
