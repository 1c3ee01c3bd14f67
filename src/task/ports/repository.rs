//! Repository port for task persistence and lookup.

use crate::task::domain::{NewTask, Task, TaskId};
use crate::user::domain::UserId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// Repositories only ever see sealed summaries.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns every task, ordered by identifier.
    async fn find_all(&self) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns the tasks owned by `owner`, ordered by identifier.
    async fn find_by_owner(&self, owner: UserId) -> TaskRepositoryResult<Vec<Task>>;

    /// Stores a new task and returns it with its assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::UnknownOwner`] when the owner does not
    /// exist in stores that enforce the reference.
    async fn create(&self, task: &NewTask) -> TaskRepositoryResult<Task>;

    /// Persists changes to an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The owning user does not exist.
    #[error("unknown task owner: {0}")]
    UnknownOwner(UserId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
