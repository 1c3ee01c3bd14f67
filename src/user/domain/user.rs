//! User aggregate root and its outward projection.

use super::{EmailAddress, PasswordHash, Role, RoleId, UserDomainError, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::Serialize;

/// Validated display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DisplayName(String);

impl DisplayName {
    /// Shortest accepted name.
    pub const MIN_LENGTH: usize = 3;
    /// Longest accepted name.
    pub const MAX_LENGTH: usize = 255;

    /// Creates a validated display name.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::InvalidName`] when the trimmed value has
    /// fewer than [`Self::MIN_LENGTH`] or more than [`Self::MAX_LENGTH`]
    /// characters.
    pub fn new(value: impl Into<String>) -> Result<Self, UserDomainError> {
        let trimmed = value.into().trim().to_owned();
        let length = trimmed.chars().count();
        if !(Self::MIN_LENGTH..=Self::MAX_LENGTH).contains(&length) {
            return Err(UserDomainError::InvalidName {
                min: Self::MIN_LENGTH,
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }
        Ok(Self(trimmed))
    }

    /// Returns the name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Account data ready to be persisted; the store assigns the identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    name: DisplayName,
    email: EmailAddress,
    password_hash: PasswordHash,
    role_id: Option<RoleId>,
    created_at: DateTime<Utc>,
}

impl NewUser {
    /// Creates a new account record stamped with the current clock time.
    #[must_use]
    pub fn new(
        name: DisplayName,
        email: EmailAddress,
        password_hash: PasswordHash,
        role_id: Option<RoleId>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            name,
            email,
            password_hash,
            role_id,
            created_at: clock.utc(),
        }
    }

    /// Returns the display name.
    #[must_use]
    pub const fn name(&self) -> &DisplayName {
        &self.name
    }

    /// Returns the email address.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the password digest.
    #[must_use]
    pub const fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    /// Returns the referenced role, if any.
    #[must_use]
    pub const fn role_id(&self) -> Option<RoleId> {
        self.role_id
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// User aggregate root.
///
/// Deliberately not serializable: the password digest must never leave the
/// service boundary. Use [`User::profile`] for outward representations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    name: DisplayName,
    email: EmailAddress,
    password_hash: PasswordHash,
    role_id: Option<RoleId>,
    role: Option<Role>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted user aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedUserData {
    /// Persisted user identifier.
    pub id: UserId,
    /// Persisted display name.
    pub name: DisplayName,
    /// Persisted email address.
    pub email: EmailAddress,
    /// Persisted password digest.
    pub password_hash: PasswordHash,
    /// Persisted role reference.
    pub role_id: Option<RoleId>,
    /// Eagerly resolved role, when the reference exists.
    pub role: Option<Role>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Materializes a freshly stored account.
    #[must_use]
    pub fn from_new(id: UserId, user: NewUser, role: Option<Role>) -> Self {
        Self {
            id,
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            role_id: user.role_id,
            role,
            created_at: user.created_at,
            updated_at: user.created_at,
        }
    }

    /// Reconstructs a user from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedUserData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            email: data.email,
            password_hash: data.password_hash,
            role_id: data.role_id,
            role: data.role,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub const fn name(&self) -> &DisplayName {
        &self.name
    }

    /// Returns the email address.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the password digest.
    #[must_use]
    pub const fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    /// Returns the role reference, if any.
    #[must_use]
    pub const fn role_id(&self) -> Option<RoleId> {
        self.role_id
    }

    /// Returns the resolved role, if any.
    #[must_use]
    pub const fn role(&self) -> Option<&Role> {
        self.role.as_ref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Projects the account into its outward representation, dropping the
    /// password digest.
    #[must_use]
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            role_id: self.role_id,
            role: self.role.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Outward projection of a user account. Carries no credential material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserProfile {
    /// User identifier.
    pub id: UserId,
    /// Display name.
    pub name: DisplayName,
    /// Email address.
    pub email: EmailAddress,
    /// Role reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_id: Option<RoleId>,
    /// Resolved role.
    pub role: Option<Role>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest update timestamp.
    pub updated_at: DateTime<Utc>,
}
