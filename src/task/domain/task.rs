//! Task aggregate root.

use super::{TaskId, TaskTitle};
use crate::confidentiality::Envelope;
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;

/// Task data ready to be persisted; the store assigns the identifier.
///
/// The summary is already sealed: plaintext never reaches a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    title: TaskTitle,
    summary: Envelope,
    performed_at: DateTime<Utc>,
    owner: UserId,
    created_at: DateTime<Utc>,
}

impl NewTask {
    /// Creates a new task record owned by `owner`, stamped with the current
    /// clock time.
    #[must_use]
    pub fn new(
        title: TaskTitle,
        summary: Envelope,
        performed_at: DateTime<Utc>,
        owner: UserId,
        clock: &impl Clock,
    ) -> Self {
        Self {
            title,
            summary,
            performed_at,
            owner,
            created_at: clock.utc(),
        }
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the sealed summary.
    #[must_use]
    pub const fn summary(&self) -> &Envelope {
        &self.summary
    }

    /// Returns when the work was performed.
    #[must_use]
    pub const fn performed_at(&self) -> DateTime<Utc> {
        self.performed_at
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn owner(&self) -> UserId {
        self.owner
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Task aggregate root.
///
/// The owner is fixed at creation; no operation reassigns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    summary: Envelope,
    performed_at: DateTime<Utc>,
    owner: UserId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted sealed summary.
    pub summary: Envelope,
    /// Persisted performed instant.
    pub performed_at: DateTime<Utc>,
    /// Persisted owner.
    pub owner: UserId,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Materializes a newly stored task under its assigned identifier.
    #[must_use]
    pub fn from_new(id: TaskId, task: NewTask) -> Self {
        Self {
            id,
            title: task.title,
            summary: task.summary,
            performed_at: task.performed_at,
            owner: task.owner,
            created_at: task.created_at,
            updated_at: task.created_at,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            summary: data.summary,
            performed_at: data.performed_at,
            owner: data.owner,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the sealed summary.
    #[must_use]
    pub const fn summary(&self) -> &Envelope {
        &self.summary
    }

    /// Returns when the work was performed.
    #[must_use]
    pub const fn performed_at(&self) -> DateTime<Utc> {
        self.performed_at
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn owner(&self) -> UserId {
        self.owner
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replaces the mutable fields and refreshes the update timestamp.
    pub fn revise(
        &mut self,
        title: TaskTitle,
        summary: Envelope,
        performed_at: DateTime<Utc>,
        clock: &impl Clock,
    ) {
        self.title = title;
        self.summary = summary;
        self.performed_at = performed_at;
        self.updated_at = clock.utc();
    }
}
