//! Creates the built-in `manager` and `technician` roles.
//!
//! Usage:
//!
//! ```text
//! seed_roles
//! ```
//!
//! Reads the usual application environment (a `.env` file is honoured) and
//! requires `DATABASE_URL`. Running it repeatedly is safe; existing roles are
//! left untouched.

use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use mockable::DefaultClock;
use std::sync::Arc;
use thiserror::Error;
use workday::config::{AppConfig, ConfigError};
use workday::telemetry::{TelemetryError, init_tracing};
use workday::user::{
    adapters::postgres::PostgresUserRepository, ports::UserRepositoryError,
    services::RoleSeeder,
};

/// Errors that abort seeding.
#[derive(Debug, Error)]
enum SeedError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error("DATABASE_URL must be set to seed roles")]
    MissingDatabase,
    #[error("failed to build connection pool: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    #[error(transparent)]
    Repository(#[from] UserRepositoryError),
}

#[tokio::main]
async fn main() -> Result<(), SeedError> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    init_tracing(config.log_format())?;

    let database_url = config.database_url().ok_or(SeedError::MissingDatabase)?;
    let pool = Pool::builder().build(ConnectionManager::<PgConnection>::new(database_url))?;
    let seeder = RoleSeeder::new(
        Arc::new(PostgresUserRepository::new(pool)),
        Arc::new(DefaultClock),
    );

    for role in seeder.seed_defaults().await? {
        tracing::info!(role_id = %role.id, slug = %role.slug, "role ready");
    }
    Ok(())
}
