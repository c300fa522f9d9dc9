//! Conversation membership join record.

use super::ConversationId;
use crate::user::domain::UserId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Membership of one user in one conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Participant {
    conversation_id: ConversationId,
    user_id: UserId,
}

impl Participant {
    /// Creates a membership record.
    #[must_use]
    pub const fn new(conversation_id: ConversationId, user_id: UserId) -> Self {
        Self {
            conversation_id,
            user_id,
        }
    }

    /// Returns the conversation side of the membership.
    #[must_use]
    pub const fn conversation_id(&self) -> ConversationId {
        self.conversation_id
    }

    /// Returns the user side of the membership.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.conversation_id, self.user_id)
    }
}
