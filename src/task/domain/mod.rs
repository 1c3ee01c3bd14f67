//! Domain model for tasks.
//!
//! A task's summary is held sealed in an [`Envelope`](crate::confidentiality::Envelope)
//! everywhere except inside a [`TaskView`].

mod error;
mod ids;
mod task;
mod title;
mod view;

pub use error::TaskDomainError;
pub use ids::TaskId;
pub use task::{NewTask, PersistedTaskData, Task};
pub use title::TaskTitle;
pub use view::{TaskSummary, TaskView, UNREADABLE_SUMMARY};
