//! Shared in-memory store backing the in-memory adapters.
//!
//! All entity tables live behind a single lock so that cross-entity
//! constraints (sender references, memberships, cascading deletes) are
//! checked and applied atomically, the way a database transaction would.

use super::StoreAccessError;
use crate::conversation::domain::{Conversation, ConversationId};
use crate::message::domain::{Message, MessageId};
use crate::user::domain::{EmailAddress, User, UserId};
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Thread-safe handle to the in-memory tables.
///
/// Clones share the same tables; hand one clone to each entity adapter.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDatabase {
    tables: Arc<RwLock<Tables>>,
}

/// Rows of every entity, mirroring the relational layout.
#[derive(Debug, Default)]
pub(crate) struct Tables {
    pub(crate) users: HashMap<UserId, User>,
    pub(crate) email_index: HashMap<EmailAddress, UserId>,
    pub(crate) messages: HashMap<MessageId, Message>,
    pub(crate) conversations: HashMap<ConversationId, Conversation>,
    pub(crate) participants: BTreeSet<(ConversationId, UserId)>,
}

/// Rows removed by [`Tables::delete_user_cascade`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CascadeCounts {
    pub(crate) messages: usize,
    pub(crate) memberships: usize,
}

impl InMemoryDatabase {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn read<E: From<StoreAccessError>>(&self) -> Result<RwLockReadGuard<'_, Tables>, E> {
        self.tables
            .read()
            .map_err(|err| E::from(StoreAccessError::Poisoned(err.to_string())))
    }

    pub(crate) fn write<E: From<StoreAccessError>>(
        &self,
    ) -> Result<RwLockWriteGuard<'_, Tables>, E> {
        self.tables
            .write()
            .map_err(|err| E::from(StoreAccessError::Poisoned(err.to_string())))
    }
}

impl Tables {
    /// Removes a user, its messages, and its memberships.
    ///
    /// Returns `None` without touching anything when the user is absent.
    pub(crate) fn delete_user_cascade(&mut self, id: UserId) -> Option<CascadeCounts> {
        let user = self.users.remove(&id)?;
        self.email_index.remove(user.email());

        let messages_before = self.messages.len();
        self.messages.retain(|_, message| message.sender() != id);
        let messages = messages_before - self.messages.len();

        let memberships_before = self.participants.len();
        self.participants.retain(|(_, user_id)| *user_id != id);
        let memberships = memberships_before - self.participants.len();

        Some(CascadeCounts {
            messages,
            memberships,
        })
    }
}
