//! Shared helpers for in-memory integration tests.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use eyre::WrapErr;
use mockable::DefaultClock;
use workday::auth::domain::Actor;
use workday::config::AppConfig;
use workday::container::{AccessServices, Collaborators};
use workday::notification::adapters::memory::InMemoryPublisher;
use workday::task::adapters::memory::InMemoryTaskRepository;
use workday::user::{
    adapters::memory::InMemoryUserRepository,
    domain::{RoleId, RoleSlug, UserProfile},
    services::CreateUserRequest,
};

/// Services wired to in-memory adapters.
pub type Services = AccessServices<
    InMemoryTaskRepository,
    InMemoryUserRepository,
    InMemoryPublisher,
    DefaultClock,
>;

/// Base64 of bytes `0..32`.
pub const ENCRYPTION_KEY: &str = "AAECAwQFBgcICQoLDA0ODxAREhMUFRYXGBkaGxwdHh8=";

/// Password shared by every account the helpers register.
pub const PASSWORD: &str = "correct horse battery staple";

/// Builds configuration with inline notification so events are observable
/// as soon as an operation returns.
///
/// # Errors
///
/// Returns an error if the configuration is rejected.
pub fn config() -> eyre::Result<AppConfig> {
    let vars: HashMap<&str, &str> = HashMap::from([
        ("APP_ENV", "test"),
        ("SECRET_KEY", "integration-secret"),
        ("ISSUER", "workday-tests"),
        ("ENCRYPTION_KEY", ENCRYPTION_KEY),
        ("NOTIFY_MODE", "inline"),
    ]);
    AppConfig::from_lookup(|key| vars.get(key).map(|value| (*value).to_owned()))
        .wrap_err("load test configuration")
}

/// A fixed performed-at date.
#[must_use]
pub fn performed_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 10, 14, 30, 0)
        .single()
        .unwrap_or_default()
}

/// Fully wired services plus handles for inspection.
pub struct Harness {
    pub services: Services,
    pub publisher: Arc<InMemoryPublisher>,
    pub manager_role: RoleId,
    pub technician_role: RoleId,
}

impl Harness {
    /// Builds the services and seeds the default roles.
    ///
    /// # Errors
    ///
    /// Returns an error if wiring or seeding fails.
    pub async fn new() -> eyre::Result<Self> {
        let publisher = Arc::new(InMemoryPublisher::new());
        let services = Services::build(
            &config()?,
            Collaborators {
                task_repository: Arc::new(InMemoryTaskRepository::new()),
                user_repository: Arc::new(InMemoryUserRepository::new()),
                publisher: Arc::clone(&publisher),
                clock: Arc::new(DefaultClock),
            },
        )
        .wrap_err("build access services")?;

        let roles = services
            .roles()
            .seed_defaults()
            .await
            .wrap_err("seed roles")?;
        let role_id = |slug: RoleSlug| {
            roles
                .iter()
                .find(|role| role.slug == slug)
                .map(|role| role.id)
                .ok_or_else(|| eyre::eyre!("role {slug} was not seeded"))
        };
        let manager_role = role_id(RoleSlug::manager())?;
        let technician_role = role_id(RoleSlug::technician())?;

        Ok(Self {
            services,
            publisher,
            manager_role,
            technician_role,
        })
    }

    /// Registers an account with [`PASSWORD`].
    ///
    /// # Errors
    ///
    /// Returns an error if registration fails.
    pub async fn register(&self, name: &str, email: &str, role: RoleId) -> eyre::Result<UserProfile> {
        self.services
            .users()
            .create_user(CreateUserRequest::new(name, email, PASSWORD).with_role(role))
            .await
            .wrap_err_with(|| format!("register {email}"))
    }

    /// Logs in and authenticates the resulting bearer header.
    ///
    /// # Errors
    ///
    /// Returns an error if login or authentication fails.
    pub async fn sign_in(&self, email: &str) -> eyre::Result<Actor> {
        let token = self
            .services
            .login()
            .login(email, PASSWORD)
            .await
            .wrap_err_with(|| format!("log in as {email}"))?;
        let header = format!("Bearer {}", token.as_str());
        self.services
            .authenticator()
            .authenticate(Some(&header))
            .wrap_err("authenticate bearer header")
    }

    /// Registers and signs in an account.
    ///
    /// # Errors
    ///
    /// Returns an error if either step fails.
    pub async fn enrol(&self, name: &str, email: &str, role: RoleId) -> eyre::Result<Actor> {
        self.register(name, email, role).await?;
        self.sign_in(email).await
    }
}
