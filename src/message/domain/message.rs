//! Message aggregate root.

use super::{MessageBody, MessageId};
use crate::user::domain::UserId;
use chrono::{DateTime, SubsecRound, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A text message sent by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    id: MessageId,
    sender: UserId,
    body: MessageBody,
    sent_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedMessageData {
    /// Persisted message identifier.
    pub id: MessageId,
    /// Persisted sender reference.
    pub sender: UserId,
    /// Persisted body text.
    pub body: MessageBody,
    /// Persisted send timestamp.
    pub sent_at: DateTime<Utc>,
}

impl Message {
    /// Creates a message with a fresh identifier, stamped at the current
    /// clock time.
    #[must_use]
    pub fn new(sender: UserId, body: MessageBody, clock: &impl Clock) -> Self {
        Self {
            id: MessageId::new(),
            sender,
            body,
            // `TIMESTAMPTZ` keeps microseconds.
            sent_at: clock.utc().trunc_subsecs(6),
        }
    }

    /// Reconstructs a message from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedMessageData) -> Self {
        Self {
            id: data.id,
            sender: data.sender,
            body: data.body,
            sent_at: data.sent_at,
        }
    }

    /// Returns the message identifier.
    #[must_use]
    pub const fn id(&self) -> MessageId {
        self.id
    }

    /// Returns the sending user.
    #[must_use]
    pub const fn sender(&self) -> UserId {
        self.sender
    }

    /// Returns the body text.
    #[must_use]
    pub const fn body(&self) -> &MessageBody {
        &self.body
    }

    /// Returns the send timestamp.
    #[must_use]
    pub const fn sent_at(&self) -> DateTime<Utc> {
        self.sent_at
    }

    /// Replaces the body text. The send timestamp is unchanged.
    pub fn edit_body(&mut self, body: MessageBody) {
        self.body = body;
    }
}
