//! Idempotent seeding of the built-in roles.

use crate::user::{
    domain::{NewRole, Role, RoleSlug},
    ports::{RoleRepository, UserRepositoryError, UserRepositoryResult},
};
use mockable::Clock;
use std::sync::Arc;

/// Ensures the `manager` and `technician` roles exist.
#[derive(Clone)]
pub struct RoleSeeder<R, C>
where
    R: RoleRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> RoleSeeder<R, C>
where
    R: RoleRepository,
    C: Clock + Send + Sync,
{
    /// Creates a seeder that stamps new roles with `clock`.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates any missing default role and returns all of them, manager
    /// first.
    ///
    /// Running it again is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError`] when a lookup or insert fails.
    pub async fn seed_defaults(&self) -> UserRepositoryResult<Vec<Role>> {
        let defaults = [
            ("Manager", RoleSlug::manager()),
            ("Technician", RoleSlug::technician()),
        ];
        let mut roles = Vec::with_capacity(defaults.len());
        for (label, slug) in defaults {
            roles.push(self.ensure(label, slug).await?);
        }
        Ok(roles)
    }

    async fn ensure(&self, label: &str, slug: RoleSlug) -> UserRepositoryResult<Role> {
        if let Some(existing) = self.repository.find_role_by_slug(&slug).await? {
            tracing::info!(slug = %slug, "role already exists");
            return Ok(existing);
        }

        let new_role = NewRole::new(label, slug.clone(), &*self.clock)
            .map_err(UserRepositoryError::persistence)?;
        match self.repository.create_role(&new_role).await {
            Ok(role) => {
                tracing::info!(slug = %slug, role_id = %role.id, "role created");
                Ok(role)
            }
            // Lost a race with a concurrent seeder.
            Err(UserRepositoryError::DuplicateRole(_)) => self
                .repository
                .find_role_by_slug(&slug)
                .await?
                .ok_or_else(|| {
                    UserRepositoryError::persistence(std::io::Error::other(format!(
                        "role {slug} vanished after a duplicate insert"
                    )))
                }),
            Err(err) => {
                tracing::error!(slug = %slug, error = %err, "failed to create role");
                Err(err)
            }
        }
    }
}
