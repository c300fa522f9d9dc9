//! Diesel row models for user persistence.

use crate::persistence::schema::users;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for user records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    /// User identifier.
    pub user_id: uuid::Uuid,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Unique email address.
    pub email: String,
    /// Opaque credential digest.
    pub password_hash: String,
    /// Optional phone number.
    pub phone_number: Option<String>,
    /// Account role.
    pub role: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow {
    /// User identifier.
    pub user_id: uuid::Uuid,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Unique email address.
    pub email: String,
    /// Opaque credential digest.
    pub password_hash: String,
    /// Optional phone number.
    pub phone_number: Option<String>,
    /// Account role.
    pub role: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Changeset for the mutable user columns. `user_id` and `created_at` are
/// never written.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
#[diesel(treat_none_as_null = true)]
pub struct UserChangeset {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Unique email address.
    pub email: String,
    /// Opaque credential digest.
    pub password_hash: String,
    /// Optional phone number.
    pub phone_number: Option<String>,
    /// Account role.
    pub role: String,
}
