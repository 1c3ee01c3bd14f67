//! Authentication and authorization.
//!
//! Credentials are hashed with Argon2id and exchanged for short-lived signed
//! session tokens. The [`policy`] module holds the role rules applied by the
//! task and user services.

pub mod adapters;
pub mod domain;
pub mod policy;
pub mod ports;
pub mod services;
