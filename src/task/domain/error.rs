//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The title exceeds the storage limit.
    #[error("task title must be at most {max} characters, got {actual}")]
    TitleTooLong {
        /// Longest accepted title.
        max: usize,
        /// Length of the rejected title.
        actual: usize,
    },

    /// The summary is empty after trimming.
    #[error("task summary must not be empty")]
    EmptySummary,

    /// The value is not a task identifier.
    #[error("invalid task identifier: {0}")]
    InvalidTaskId(String),
}
