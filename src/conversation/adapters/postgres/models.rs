//! Diesel row models for conversation persistence.

use crate::persistence::schema::{conversations, conversations_participants};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Row for conversation records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = conversations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ConversationRow {
    /// Conversation identifier.
    pub conversation_id: uuid::Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Row for membership join records.
#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = conversations_participants)]
pub struct ParticipantRow {
    /// Conversation side of the membership.
    pub conversation_id: uuid::Uuid,
    /// User side of the membership.
    pub user_id: uuid::Uuid,
}
