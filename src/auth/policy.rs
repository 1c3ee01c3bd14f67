//! Role-based authorization decisions.
//!
//! Every function here is pure: it sees only the actor, the owner of the
//! target resource and the requested operation. Managers may read and delete
//! any task and read any user, but may only update their own tasks.

use super::domain::Actor;
use crate::user::domain::UserId;
use std::fmt;
use thiserror::Error;

/// Operation gated by the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Read a single task.
    ReadTask,
    /// Change a task's title, summary or performed date.
    UpdateTask,
    /// Remove a task.
    DeleteTask,
    /// Read a user profile.
    ReadUser,
}

impl Operation {
    /// Returns a short description for messages and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ReadTask => "read task",
            Self::UpdateTask => "update task",
            Self::DeleteTask => "delete task",
            Self::ReadUser => "read user",
        }
    }

    /// Returns `true` when the `manager` role overrides ownership.
    const fn manager_may_override(self) -> bool {
        match self {
            Self::ReadTask | Self::DeleteTask | Self::ReadUser => true,
            Self::UpdateTask => false,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The actor is authenticated but not entitled to the operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("user {actor} is not permitted to {operation} owned by user {owner}")]
pub struct AccessDenied {
    /// Denied actor.
    pub actor: UserId,
    /// Owner of the target resource.
    pub owner: UserId,
    /// Denied operation.
    pub operation: Operation,
}

/// Which task rows a listing may return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingScope {
    /// Every task.
    All,
    /// Only tasks owned by the given user.
    OwnedBy(UserId),
}

/// Decides whether `actor` may perform `operation` on a resource owned by
/// `owner`.
///
/// For [`Operation::ReadUser`], `owner` is the requested user's identifier.
///
/// # Errors
///
/// Returns [`AccessDenied`] when the actor is neither the owner nor, for
/// operations that allow it, a manager.
pub fn authorize(actor: &Actor, owner: UserId, operation: Operation) -> Result<(), AccessDenied> {
    let is_owner = actor.id() == owner;
    let manager_override = operation.manager_may_override() && actor.is_manager();
    if is_owner || manager_override {
        return Ok(());
    }
    Err(AccessDenied {
        actor: actor.id(),
        owner,
        operation,
    })
}

/// Selects the task listing scope for `actor`.
#[must_use]
pub fn listing_scope(actor: &Actor) -> ListingScope {
    if actor.is_manager() {
        ListingScope::All
    } else {
        ListingScope::OwnedBy(actor.id())
    }
}
