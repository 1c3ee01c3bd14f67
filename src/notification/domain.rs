//! Events published after committed task mutations.

use crate::task::domain::TaskId;
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Queue receiving task lifecycle events.
pub const TASKS_QUEUE: &str = "tasks";

/// Domain event describing a task mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TaskEvent {
    /// A task was persisted for the first time.
    TaskCreated {
        /// Unique identifier of this event, for consumer de-duplication.
        event_id: Uuid,
        /// Identifier assigned to the new task.
        task_id: TaskId,
        /// Plaintext title of the new task.
        title: String,
        /// Owner of the new task.
        owner_id: UserId,
        /// When the task was created.
        occurred_at: DateTime<Utc>,
    },
}

impl TaskEvent {
    /// Builds a creation event with a fresh event identifier.
    #[must_use]
    pub fn task_created(
        task_id: TaskId,
        title: impl Into<String>,
        owner_id: UserId,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self::TaskCreated {
            event_id: Uuid::new_v4(),
            task_id,
            title: title.into(),
            owner_id,
            occurred_at,
        }
    }

    /// Returns the queue the event is routed to.
    #[must_use]
    pub const fn queue(&self) -> &'static str {
        match self {
            Self::TaskCreated { .. } => TASKS_QUEUE,
        }
    }

    /// Returns the event name used as the `event` tag.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::TaskCreated { .. } => "task_created",
        }
    }

    /// Encodes the event as a JSON payload.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] when serialization fails.
    pub fn to_payload(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}
