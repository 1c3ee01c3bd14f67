//! Validated task title.

use super::TaskDomainError;
use serde::Serialize;
use std::fmt;

/// Task title: non-empty after trimming and bounded in length.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Longest accepted title, in characters.
    pub const MAX_LENGTH: usize = 255;

    /// Creates a validated title from trimmed input.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] or
    /// [`TaskDomainError::TitleTooLong`].
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let trimmed = value.into().trim().to_owned();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        let length = trimmed.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(TaskDomainError::TitleTooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }
        Ok(Self(trimmed))
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskTitle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
