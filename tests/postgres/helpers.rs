//! Shared fixtures for the `PostgreSQL` repository tests.

use chrono::{DateTime, Local, TimeZone, Utc};
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use mockable::Clock;
use pg_embedded_setup_unpriv::{TestCluster, test_support::shared_test_cluster};
use rstest::fixture;
use tokio::runtime::Runtime;
use workday::confidentiality::Envelope;
use workday::task::{
    adapters::postgres::PostgresTaskRepository,
    domain::{NewTask, TaskTitle},
};
use workday::user::{
    adapters::postgres::PostgresUserRepository,
    domain::{
        DisplayName, EmailAddress, NewRole, NewUser, PasswordHash, Role, RoleId, RoleSlug, User,
        UserId,
    },
    ports::{RoleRepository, UserRepository},
};

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Schema shared by tasks, users and roles.
pub const CREATE_ACCESS_TABLES_SQL: &str =
    include_str!("../../migrations/2025-03-14-000000_create_access_tables/up.sql");

/// Template database holding the migrated schema.
pub const TEMPLATE_DB: &str = "workday_test_template";

/// Clock stopped on a whole second so timestamps survive the round trip
/// through `TIMESTAMPTZ` unchanged.
#[derive(Debug, Clone, Copy)]
pub struct StoppedClock(DateTime<Utc>);

impl StoppedClock {
    fn new() -> Self {
        Self(
            Utc.with_ymd_and_hms(2025, 3, 14, 9, 0, 0)
                .single()
                .expect("valid fixed instant"),
        )
    }
}

impl Clock for StoppedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Creates a tokio runtime for driving the async repositories.
pub fn test_runtime() -> Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to create test runtime")
}

/// Ensures the template database exists with the schema applied.
///
/// # Errors
///
/// Returns an error if template creation or migration fails.
pub fn ensure_template(cluster: &TestCluster) -> Result<(), BoxError> {
    cluster
        .ensure_template_exists(TEMPLATE_DB, |db_name| {
            let url = cluster.connection().database_url(db_name);
            let mut conn = PgConnection::establish(&url).map_err(|e| eyre::eyre!("{e}"))?;
            conn.batch_execute(CREATE_ACCESS_TABLES_SQL)
                .map_err(|e| eyre::eyre!("migration failed: {e}"))?;
            Ok(())
        })
        .map_err(|e| Box::new(e) as BoxError)?;
    Ok(())
}

/// Drops the per-test database even when the test panics.
struct CleanupGuard {
    cluster: &'static TestCluster,
    db_name: String,
}

impl Drop for CleanupGuard {
    fn drop(&mut self) {
        if let Err(e) = self.cluster.drop_database(self.db_name.as_str()) {
            eprintln!("Warning: failed to drop test database {}: {e}", self.db_name);
        }
    }
}

/// Both repositories over one freshly cloned database.
///
/// Field order matters: the repositories release their pool before the
/// guard drops the database.
pub struct RepositoryContext {
    pub tasks: PostgresTaskRepository,
    pub users: PostgresUserRepository,
    pub clock: StoppedClock,
    pub rt: Runtime,
    _guard: CleanupGuard,
}

impl RepositoryContext {
    /// Stores a role with the given slug.
    pub fn seed_role(&self, slug: RoleSlug) -> Role {
        let role = NewRole::new(slug.as_str(), slug.clone(), &self.clock).expect("valid role");
        self.rt
            .block_on(self.users.create_role(&role))
            .expect("role insert")
    }

    /// Builds an account record without storing it.
    pub fn new_user(&self, email: &str, role: Option<RoleId>) -> NewUser {
        NewUser::new(
            DisplayName::new("John Doe").expect("valid name"),
            EmailAddress::new(email).expect("valid email"),
            PasswordHash::new("$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_owned()),
            role,
            &self.clock,
        )
    }

    /// Stores an account.
    pub fn seed_user(&self, email: &str, role: Option<RoleId>) -> User {
        let user = self.new_user(email, role);
        self.rt
            .block_on(self.users.create(&user))
            .expect("user insert")
    }

    /// Builds a task owned by `owner` without storing it.
    pub fn new_task(&self, title: &str, owner: UserId) -> NewTask {
        NewTask::new(
            TaskTitle::new(title).expect("valid title"),
            Envelope::from_stored(format!("sealed:{title}")),
            self.clock.utc(),
            owner,
            &self.clock,
        )
    }
}

/// Clones the template into a uniquely named database and wires both
/// repositories to it.
#[fixture]
pub fn repositories(shared_test_cluster: &'static TestCluster) -> RepositoryContext {
    ensure_template(shared_test_cluster).expect("template setup");
    let db_name = format!("test_{}", uuid::Uuid::new_v4().simple());
    shared_test_cluster
        .create_database_from_template(db_name.as_str(), TEMPLATE_DB)
        .expect("database from template");
    let guard = CleanupGuard {
        cluster: shared_test_cluster,
        db_name: db_name.clone(),
    };

    let url = shared_test_cluster.connection().database_url(&db_name);
    let pool = Pool::builder()
        .max_size(1)
        .build(ConnectionManager::<PgConnection>::new(url))
        .expect("connection pool");

    RepositoryContext {
        tasks: PostgresTaskRepository::new(pool.clone()),
        users: PostgresUserRepository::new(pool),
        clock: StoppedClock::new(),
        rt: test_runtime(),
        _guard: guard,
    }
}
