//! `PostgreSQL` adapters for user and role persistence.

mod models;
mod repository;
mod schema;

pub use repository::{PostgresUserRepository, UserPgPool};
