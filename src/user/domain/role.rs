//! Role aggregate and the slug used as the authorization discriminant.

use super::{RoleId, UserDomainError};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Machine-readable role discriminant such as `manager` or `technician`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleSlug(String);

impl RoleSlug {
    /// Slug granting elevated read and delete rights over other users' tasks.
    pub const MANAGER: &'static str = "manager";

    /// Slug of the default non-privileged role.
    pub const TECHNICIAN: &'static str = "technician";

    /// Creates a validated slug.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::InvalidRoleSlug`] when the value is empty or
    /// contains characters other than lowercase ASCII letters, digits, `-` and
    /// `_`.
    pub fn new(value: impl Into<String>) -> Result<Self, UserDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        let is_valid = !normalized.is_empty()
            && normalized
                .chars()
                .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-' || ch == '_');
        if !is_valid {
            return Err(UserDomainError::InvalidRoleSlug(raw));
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the `manager` slug.
    #[must_use]
    pub fn manager() -> Self {
        Self(Self::MANAGER.to_owned())
    }

    /// Returns the `technician` slug.
    #[must_use]
    pub fn technician() -> Self {
        Self(Self::TECHNICIAN.to_owned())
    }

    /// Returns `true` for the `manager` slug.
    #[must_use]
    pub fn is_manager(&self) -> bool {
        self.0 == Self::MANAGER
    }

    /// Returns the slug as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoleSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Role definition before the store assigns an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRole {
    label: String,
    slug: RoleSlug,
    created_at: DateTime<Utc>,
}

impl NewRole {
    /// Creates a role definition stamped with the current clock time.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::EmptyRoleLabel`] when the label is blank.
    pub fn new(
        label: impl Into<String>,
        slug: RoleSlug,
        clock: &impl Clock,
    ) -> Result<Self, UserDomainError> {
        let label = label.into().trim().to_owned();
        if label.is_empty() {
            return Err(UserDomainError::EmptyRoleLabel);
        }
        Ok(Self {
            label,
            slug,
            created_at: clock.utc(),
        })
    }

    /// Returns the human-readable label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the slug.
    #[must_use]
    pub const fn slug(&self) -> &RoleSlug {
        &self.slug
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Persisted role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Role identifier.
    pub id: RoleId,
    /// Human-readable label, e.g. `Manager`.
    pub label: String,
    /// Authorization discriminant.
    pub slug: RoleSlug,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Role {
    /// Materializes a new role with the identifier assigned by the store.
    #[must_use]
    pub fn from_new(id: RoleId, role: NewRole) -> Self {
        Self {
            id,
            label: role.label,
            slug: role.slug,
            created_at: role.created_at,
            updated_at: role.created_at,
        }
    }
}
