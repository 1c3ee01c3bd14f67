//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: i64,
    /// Title.
    pub title: String,
    /// Sealed summary.
    pub summary: String,
    /// Performed instant.
    pub performed_at: DateTime<Utc>,
    /// Owning user.
    pub owner_id: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Title.
    pub title: String,
    /// Sealed summary.
    pub summary: String,
    /// Performed instant.
    pub performed_at: DateTime<Utc>,
    /// Owning user.
    pub owner_id: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Changeset applied when a task is revised.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
pub struct TaskChangeset {
    /// Title.
    pub title: String,
    /// Sealed summary.
    pub summary: String,
    /// Performed instant.
    pub performed_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
