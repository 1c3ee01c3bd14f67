//! Port contracts for user account management.
//!
//! Ports define infrastructure-agnostic interfaces used by user services.

pub mod repository;

pub use repository::{RoleRepository, UserRepository, UserRepositoryError, UserRepositoryResult};
