//! Composition root wiring configuration and adapters into services.
//!
//! Repositories, the publisher and the clock are supplied by the caller, so
//! the same wiring serves production (`PostgreSQL` and AMQP) and tests
//! (in-memory adapters). Cryptographic collaborators are always built from
//! [`AppConfig`].

use crate::auth::{
    adapters::{Argon2CredentialHasher, JwtSessionTokens},
    domain::TokenError,
    services::{BearerAuthenticator, LoginService},
};
use crate::config::AppConfig;
use crate::confidentiality::{AesGcmCodec, ConfidentialityError};
use crate::notification::{ports::MessagePublisher, services::EventNotifier};
use crate::task::{ports::TaskRepository, services::TaskAccessService};
use crate::user::{
    ports::{RoleRepository, UserRepository},
    services::{RoleSeeder, UserAccessService},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Errors returned while assembling services.
#[derive(Debug, Error)]
pub enum ContainerError {
    /// The summary encryption key was rejected.
    #[error(transparent)]
    Confidentiality(#[from] ConfidentialityError),
    /// The session token service could not be configured.
    #[error(transparent)]
    Token(#[from] TokenError),
}

/// Infrastructure handed to [`AccessServices::build`].
pub struct Collaborators<TR, UR, P, C> {
    /// Task storage.
    pub task_repository: Arc<TR>,
    /// User and role storage.
    pub user_repository: Arc<UR>,
    /// Event transport.
    pub publisher: Arc<P>,
    /// Time source shared by every service.
    pub clock: Arc<C>,
}

/// Task service with the production summary codec.
pub type TaskService<TR, P, C> = TaskAccessService<TR, AesGcmCodec, P, C>;
/// User service with the production credential hasher.
pub type UserService<UR, C> = UserAccessService<UR, Argon2CredentialHasher, C>;
/// Login service with the production hasher and token service.
pub type Login<UR, C> = LoginService<UR, Argon2CredentialHasher, JwtSessionTokens<C>>;
/// Bearer authenticator backed by JWT session tokens.
pub type Authenticator<C> = BearerAuthenticator<JwtSessionTokens<C>>;

/// Every application service, sharing one set of collaborators.
pub struct AccessServices<TR, UR, P, C>
where
    TR: TaskRepository,
    UR: UserRepository + RoleRepository,
    P: MessagePublisher + 'static,
    C: Clock + Send + Sync,
{
    tasks: TaskService<TR, P, C>,
    users: UserService<UR, C>,
    login: Login<UR, C>,
    authenticator: Authenticator<C>,
    roles: RoleSeeder<UR, C>,
}

impl<TR, UR, P, C> AccessServices<TR, UR, P, C>
where
    TR: TaskRepository,
    UR: UserRepository + RoleRepository,
    P: MessagePublisher + 'static,
    C: Clock + Send + Sync,
{
    /// Builds the services from configuration and collaborators.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError`] when the encryption key or token settings
    /// are unusable.
    pub fn build(
        config: &AppConfig,
        collaborators: Collaborators<TR, UR, P, C>,
    ) -> Result<Self, ContainerError> {
        let Collaborators {
            task_repository,
            user_repository,
            publisher,
            clock,
        } = collaborators;

        let codec = Arc::new(AesGcmCodec::from_base64_key(config.encryption_key())?);
        let hasher = Arc::new(Argon2CredentialHasher::new());
        let tokens = Arc::new(JwtSessionTokens::new(
            config.secret_key(),
            config.issuer(),
            Arc::clone(&clock),
        )?);
        let notifier = EventNotifier::new(publisher, config.notification_mode());

        tracing::debug!(
            environment = config.environment(),
            notification_mode = %config.notification_mode(),
            "access services assembled"
        );

        Ok(Self {
            tasks: TaskAccessService::new(task_repository, codec, notifier, Arc::clone(&clock)),
            users: UserAccessService::new(
                Arc::clone(&user_repository),
                Arc::clone(&hasher),
                Arc::clone(&clock),
            ),
            login: LoginService::new(Arc::clone(&user_repository), hasher, Arc::clone(&tokens)),
            authenticator: BearerAuthenticator::new(tokens),
            roles: RoleSeeder::new(user_repository, clock),
        })
    }

    /// Returns the task service.
    #[must_use]
    pub const fn tasks(&self) -> &TaskService<TR, P, C> {
        &self.tasks
    }

    /// Returns the user service.
    #[must_use]
    pub const fn users(&self) -> &UserService<UR, C> {
        &self.users
    }

    /// Returns the login service.
    #[must_use]
    pub const fn login(&self) -> &Login<UR, C> {
        &self.login
    }

    /// Returns the bearer authenticator.
    #[must_use]
    pub const fn authenticator(&self) -> &Authenticator<C> {
        &self.authenticator
    }

    /// Returns the role seeder.
    #[must_use]
    pub const fn roles(&self) -> &RoleSeeder<UR, C> {
        &self.roles
    }
}
