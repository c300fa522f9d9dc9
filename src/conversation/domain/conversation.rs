//! Conversation aggregate root.

use super::ConversationId;
use chrono::{DateTime, SubsecRound, Utc};
use crate::user::domain::UserId;
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A conversation record. Participants are stored as separate join records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    id: ConversationId,
    created_at: DateTime<Utc>,
}

impl Conversation {
    /// Creates a conversation with a fresh identifier stamped at the current
    /// clock time.
    #[must_use]
    pub fn new(clock: &impl Clock) -> Self {
        Self {
            id: ConversationId::new(),
            // `TIMESTAMPTZ` keeps microseconds.
            created_at: clock.utc().trunc_subsecs(6),
        }
    }

    /// Reconstructs a conversation from persisted storage.
    #[must_use]
    pub const fn from_persisted(id: ConversationId, created_at: DateTime<Utc>) -> Self {
        Self { id, created_at }
    }

    /// Returns the conversation identifier.
    #[must_use]
    pub const fn id(&self) -> ConversationId {
        self.id
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// A conversation together with its participant set, read as one snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationWithParticipants {
    conversation: Conversation,
    participants: BTreeSet<UserId>,
}

impl ConversationWithParticipants {
    /// Pairs a conversation with its participants.
    #[must_use]
    pub const fn new(conversation: Conversation, participants: BTreeSet<UserId>) -> Self {
        Self {
            conversation,
            participants,
        }
    }

    /// Returns the conversation record.
    #[must_use]
    pub const fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Returns the participating users.
    #[must_use]
    pub const fn participants(&self) -> &BTreeSet<UserId> {
        &self.participants
    }
}
