//! In-memory user and role repository for tests and local flows.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::user::{
    domain::{EmailAddress, NewRole, NewUser, Role, RoleId, RoleSlug, User, UserId},
    ports::{RoleRepository, UserRepository, UserRepositoryError, UserRepositoryResult},
};

/// Thread-safe in-memory store for users and the roles they reference.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    state: Arc<RwLock<InMemoryUserState>>,
}

#[derive(Debug, Default)]
struct InMemoryUserState {
    users: HashMap<UserId, User>,
    email_index: HashMap<EmailAddress, UserId>,
    roles: HashMap<RoleId, Role>,
    last_user_id: i64,
    last_role_id: i64,
}

impl InMemoryUserRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read_state(&self) -> UserRepositoryResult<RwLockReadGuard<'_, InMemoryUserState>> {
        self.state.read().map_err(|err| {
            UserRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write_state(&self) -> UserRepositoryResult<RwLockWriteGuard<'_, InMemoryUserState>> {
        self.state.write().map_err(|err| {
            UserRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>> {
        let state = self.read_state()?;
        Ok(state.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> UserRepositoryResult<Option<User>> {
        let state = self.read_state()?;
        let user = state
            .email_index
            .get(email)
            .and_then(|id| state.users.get(id))
            .cloned();
        Ok(user)
    }

    async fn create(&self, user: &NewUser) -> UserRepositoryResult<User> {
        let mut state = self.write_state()?;
        if state.email_index.contains_key(user.email()) {
            return Err(UserRepositoryError::DuplicateEmail(user.email().clone()));
        }

        let role = match user.role_id() {
            Some(role_id) => Some(
                state
                    .roles
                    .get(&role_id)
                    .cloned()
                    .ok_or(UserRepositoryError::UnknownRole(role_id))?,
            ),
            None => None,
        };

        state.last_user_id += 1;
        let id = UserId::new(state.last_user_id);
        let stored = User::from_new(id, user.clone(), role);
        state.email_index.insert(user.email().clone(), id);
        state.users.insert(id, stored.clone());
        Ok(stored)
    }
}

#[async_trait]
impl RoleRepository for InMemoryUserRepository {
    async fn find_role_by_slug(&self, slug: &RoleSlug) -> UserRepositoryResult<Option<Role>> {
        let state = self.read_state()?;
        Ok(state.roles.values().find(|role| &role.slug == slug).cloned())
    }

    async fn create_role(&self, role: &NewRole) -> UserRepositoryResult<Role> {
        let mut state = self.write_state()?;
        if state.roles.values().any(|existing| &existing.slug == role.slug()) {
            return Err(UserRepositoryError::DuplicateRole(role.slug().clone()));
        }

        state.last_role_id += 1;
        let id = RoleId::new(state.last_role_id);
        let stored = Role::from_new(id, role.clone());
        state.roles.insert(id, stored.clone());
        Ok(stored)
    }
}
