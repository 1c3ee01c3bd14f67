//! Diesel row models for user and role persistence.

use super::schema::{roles, users};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for role records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = roles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RoleRow {
    /// Role identifier.
    pub id: i64,
    /// Human-readable label.
    pub label: String,
    /// Authorization discriminant.
    pub slug: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for role records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = roles)]
pub struct NewRoleRow {
    /// Human-readable label.
    pub label: String,
    /// Authorization discriminant.
    pub slug: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result row for user records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    /// User identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Password digest.
    pub password_hash: String,
    /// Optional role reference.
    pub role_id: Option<i64>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Password digest.
    pub password_hash: String,
    /// Optional role reference.
    pub role_id: Option<i64>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
