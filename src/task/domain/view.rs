//! Outward projection of a task with its summary revealed.

use super::{Task, TaskId, TaskTitle};
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

/// Placeholder shown in listings for a summary that failed to decrypt.
pub const UNREADABLE_SUMMARY: &str = "Error decrypting summary";

/// Decrypted summary, or the marker for one that could not be opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskSummary {
    /// Successfully decrypted plaintext.
    Revealed(String),
    /// The stored envelope did not decrypt.
    Unreadable,
}

impl TaskSummary {
    /// Returns the text to display.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Revealed(text) => text,
            Self::Unreadable => UNREADABLE_SUMMARY,
        }
    }

    /// Returns `true` for [`TaskSummary::Unreadable`].
    #[must_use]
    pub const fn is_unreadable(&self) -> bool {
        matches!(self, Self::Unreadable)
    }
}

impl Serialize for TaskSummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Task as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskView {
    /// Task identifier.
    pub id: TaskId,
    /// Title.
    #[serde(rename = "task")]
    pub title: TaskTitle,
    /// Decrypted summary.
    pub summary: TaskSummary,
    /// When the work was performed.
    #[serde(rename = "performed_date")]
    pub performed_at: DateTime<Utc>,
    /// Owning user.
    #[serde(rename = "user_id")]
    pub owner_id: UserId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl TaskView {
    /// Projects `task` with an already-decrypted summary.
    #[must_use]
    pub fn new(task: &Task, summary: TaskSummary) -> Self {
        Self {
            id: task.id(),
            title: task.title().clone(),
            summary,
            performed_at: task.performed_at(),
            owner_id: task.owner(),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
        }
    }
}
