//! Authorized, confidentiality-preserving task operations.

use crate::auth::{
    domain::Actor,
    policy::{self, AccessDenied, ListingScope, Operation},
};
use crate::confidentiality::{ConfidentialityError, Envelope, SummaryCodec};
use crate::error::AccessErrorKind;
use crate::notification::{
    domain::TaskEvent, ports::MessagePublisher, services::EventNotifier,
};
use crate::task::{
    domain::{NewTask, Task, TaskDomainError, TaskId, TaskSummary, TaskTitle, TaskView},
    ports::{TaskRepository, TaskRepositoryError},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Caller-supplied task fields for create and update.
///
/// Updates replace all three fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRequest {
    title: String,
    summary: String,
    performed_at: DateTime<Utc>,
}

impl TaskRequest {
    /// Creates a request.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        summary: impl Into<String>,
        performed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            title: title.into(),
            summary: summary.into(),
            performed_at,
        }
    }

    fn validate(&self) -> Result<TaskTitle, TaskDomainError> {
        let title = TaskTitle::new(self.title.as_str())?;
        if self.summary.trim().is_empty() {
            return Err(TaskDomainError::EmptySummary);
        }
        Ok(title)
    }
}

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskAccessError {
    /// The task does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),
    /// The actor may not perform the operation.
    #[error(transparent)]
    Forbidden(#[from] AccessDenied),
    /// Input validation failed.
    #[error(transparent)]
    Validation(#[from] TaskDomainError),
    /// Sealing or opening the summary failed.
    #[error(transparent)]
    Confidentiality(#[from] ConfidentialityError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(TaskRepositoryError),
}

impl TaskAccessError {
    /// Returns the boundary classification of the error.
    #[must_use]
    pub const fn kind(&self) -> AccessErrorKind {
        match self {
            Self::NotFound(_) => AccessErrorKind::NotFound,
            Self::Forbidden(_) => AccessErrorKind::Forbidden,
            Self::Validation(_) => AccessErrorKind::Validation,
            Self::Confidentiality(_) => AccessErrorKind::Confidentiality,
            Self::Repository(_) => AccessErrorKind::Internal,
        }
    }
}

impl From<TaskRepositoryError> for TaskAccessError {
    fn from(err: TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::NotFound(id) => Self::NotFound(id),
            other => Self::Repository(other),
        }
    }
}

/// Result type for task access operations.
pub type TaskAccessResult<T> = Result<T, TaskAccessError>;

/// Task access orchestration service.
///
/// Every operation resolves existence before authorization, so a missing task
/// is always reported as not found regardless of who asks.
#[derive(Clone)]
pub struct TaskAccessService<R, S, P, C>
where
    R: TaskRepository,
    S: SummaryCodec,
    P: MessagePublisher + 'static,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    codec: Arc<S>,
    notifier: EventNotifier<P>,
    clock: Arc<C>,
}

impl<R, S, P, C> TaskAccessService<R, S, P, C>
where
    R: TaskRepository,
    S: SummaryCodec,
    P: MessagePublisher + 'static,
    C: Clock + Send + Sync,
{
    /// Creates a new task access service.
    #[must_use]
    pub const fn new(
        repository: Arc<R>,
        codec: Arc<S>,
        notifier: EventNotifier<P>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            repository,
            codec,
            notifier,
            clock,
        }
    }

    /// Returns a single task with its summary decrypted.
    ///
    /// # Errors
    ///
    /// Returns [`TaskAccessError::NotFound`], [`TaskAccessError::Forbidden`]
    /// or, when the stored summary does not decrypt,
    /// [`TaskAccessError::Confidentiality`].
    pub async fn get(&self, id: TaskId, actor: &Actor) -> TaskAccessResult<TaskView> {
        let task = self.find_or_error(id).await?;
        policy::authorize(actor, task.owner(), Operation::ReadTask)?;
        let summary = self.codec.decrypt(task.summary())?;
        Ok(TaskView::new(&task, TaskSummary::Revealed(summary)))
    }

    /// Lists the tasks visible to `actor`.
    ///
    /// Managers see every task, everyone else only their own. A row whose
    /// summary fails to decrypt is returned with [`TaskSummary::Unreadable`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskAccessError::Repository`] when the lookup fails.
    pub async fn list(&self, actor: &Actor) -> TaskAccessResult<Vec<TaskView>> {
        let tasks = match policy::listing_scope(actor) {
            ListingScope::All => self.repository.find_all().await?,
            ListingScope::OwnedBy(owner) => self.repository.find_by_owner(owner).await?,
        };
        Ok(tasks.iter().map(|task| self.reveal_for_listing(task)).collect())
    }

    /// Creates a task owned by `actor` and announces it.
    ///
    /// Notification is best-effort: the task is created even if the event
    /// cannot be published.
    ///
    /// # Errors
    ///
    /// Returns [`TaskAccessError::Validation`] for an empty or overlong title
    /// or an empty summary, [`TaskAccessError::Confidentiality`] when sealing
    /// fails, and [`TaskAccessError::Repository`] when persistence fails.
    pub async fn create(&self, request: TaskRequest, actor: &Actor) -> TaskAccessResult<TaskView> {
        let title = request.validate()?;
        let sealed = self.seal(&request.summary)?;
        let new_task = NewTask::new(
            title,
            sealed,
            request.performed_at,
            actor.id(),
            &*self.clock,
        );
        let task = self.repository.create(&new_task).await?;
        tracing::info!(task_id = %task.id(), owner_id = %task.owner(), "task created");

        let event = TaskEvent::task_created(
            task.id(),
            task.title().as_str(),
            task.owner(),
            task.created_at(),
        );
        self.notifier.notify(&event).await;

        Ok(TaskView::new(&task, TaskSummary::Revealed(request.summary)))
    }

    /// Replaces the title, summary and performed instant of a task.
    ///
    /// Only the owner may update a task; the manager role grants no override.
    ///
    /// # Errors
    ///
    /// Returns [`TaskAccessError::NotFound`], [`TaskAccessError::Forbidden`],
    /// [`TaskAccessError::Validation`], [`TaskAccessError::Confidentiality`]
    /// or [`TaskAccessError::Repository`].
    pub async fn update(
        &self,
        id: TaskId,
        request: TaskRequest,
        actor: &Actor,
    ) -> TaskAccessResult<TaskView> {
        let mut task = self.find_or_error(id).await?;
        policy::authorize(actor, task.owner(), Operation::UpdateTask)?;
        let title = request.validate()?;
        let sealed = self.seal(&request.summary)?;

        task.revise(title, sealed, request.performed_at, &*self.clock);
        self.repository.update(&task).await?;
        tracing::info!(task_id = %id, actor_id = %actor.id(), "task updated");

        Ok(TaskView::new(&task, TaskSummary::Revealed(request.summary)))
    }

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskAccessError::NotFound`], [`TaskAccessError::Forbidden`]
    /// or [`TaskAccessError::Repository`].
    pub async fn delete(&self, id: TaskId, actor: &Actor) -> TaskAccessResult<()> {
        let task = self.find_or_error(id).await?;
        policy::authorize(actor, task.owner(), Operation::DeleteTask)?;
        self.repository.delete(id).await?;
        tracing::info!(task_id = %id, actor_id = %actor.id(), "task deleted");
        Ok(())
    }

    async fn find_or_error(&self, id: TaskId) -> TaskAccessResult<Task> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(TaskAccessError::NotFound(id))
    }

    fn seal(&self, summary: &str) -> Result<Envelope, ConfidentialityError> {
        self.codec.encrypt(summary).inspect_err(|err| {
            tracing::error!(error = %err, "failed to seal task summary");
        })
    }

    fn reveal_for_listing(&self, task: &Task) -> TaskView {
        let summary = match self.codec.decrypt(task.summary()) {
            Ok(text) => TaskSummary::Revealed(text),
            Err(err) => {
                tracing::warn!(task_id = %task.id(), error = %err, "failed to decrypt task summary");
                TaskSummary::Unreadable
            }
        };
        TaskView::new(task, summary)
    }
}
