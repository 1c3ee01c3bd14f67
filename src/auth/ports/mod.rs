//! Port contracts for authentication.

pub mod hasher;
pub mod tokens;

pub use hasher::CredentialHasher;
#[cfg(test)]
pub use hasher::MockCredentialHasher;
pub use tokens::SessionTokens;
