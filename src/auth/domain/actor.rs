//! Authenticated caller identity.

use crate::user::domain::{RoleSlug, UserId};

/// Identity and role of the authenticated caller of an operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Actor {
    id: UserId,
    role: Option<RoleSlug>,
}

impl Actor {
    /// Creates an actor context.
    #[must_use]
    pub const fn new(id: UserId, role: Option<RoleSlug>) -> Self {
        Self { id, role }
    }

    /// Creates an actor holding the `manager` role.
    #[must_use]
    pub fn manager(id: UserId) -> Self {
        Self::new(id, Some(RoleSlug::manager()))
    }

    /// Creates an actor holding the `technician` role.
    #[must_use]
    pub fn technician(id: UserId) -> Self {
        Self::new(id, Some(RoleSlug::technician()))
    }

    /// Returns the actor's user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the actor's role, if one is assigned.
    #[must_use]
    pub const fn role(&self) -> Option<&RoleSlug> {
        self.role.as_ref()
    }

    /// Returns `true` when the actor holds the `manager` role.
    #[must_use]
    pub fn is_manager(&self) -> bool {
        self.role.as_ref().is_some_and(RoleSlug::is_manager)
    }
}
