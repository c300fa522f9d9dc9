//! Diesel row models for message persistence.

use crate::persistence::schema::messages;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for message records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = messages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MessageRow {
    /// Message identifier.
    pub message_id: uuid::Uuid,
    /// Authoring user.
    pub sender_id: uuid::Uuid,
    /// Message text.
    pub message_body: String,
    /// Send timestamp.
    pub sent_at: DateTime<Utc>,
}
