//! In-memory message repository.

use async_trait::async_trait;

use crate::message::{
    domain::{Message, MessageId},
    ports::{MessageRepository, MessageRepositoryError, MessageRepositoryResult},
};
use crate::persistence::InMemoryDatabase;
use crate::user::domain::UserId;

/// Thread-safe in-memory message repository.
///
/// Sender references are checked against the users stored in the shared
/// [`InMemoryDatabase`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryMessageRepository {
    database: InMemoryDatabase,
}

impl InMemoryMessageRepository {
    /// Creates a repository over a store shared with other adapters.
    #[must_use]
    pub const fn with_database(database: InMemoryDatabase) -> Self {
        Self { database }
    }
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn store(&self, message: &Message) -> MessageRepositoryResult<()> {
        let mut tables = self.database.write::<MessageRepositoryError>()?;

        if tables.messages.contains_key(&message.id()) {
            return Err(MessageRepositoryError::DuplicateMessage(message.id()));
        }

        if !tables.users.contains_key(&message.sender()) {
            return Err(MessageRepositoryError::UnknownSender(message.sender()));
        }

        tables.messages.insert(message.id(), message.clone());
        Ok(())
    }

    async fn update(&self, message: &Message) -> MessageRepositoryResult<()> {
        let mut tables = self.database.write::<MessageRepositoryError>()?;
        let stored = tables
            .messages
            .get_mut(&message.id())
            .ok_or(MessageRepositoryError::NotFound(message.id()))?;
        stored.edit_body(message.body().clone());
        Ok(())
    }

    async fn find_by_id(&self, id: MessageId) -> MessageRepositoryResult<Option<Message>> {
        let tables = self.database.read::<MessageRepositoryError>()?;
        Ok(tables.messages.get(&id).cloned())
    }

    async fn find_by_sender(&self, sender: UserId) -> MessageRepositoryResult<Vec<Message>> {
        let tables = self.database.read::<MessageRepositoryError>()?;
        let mut messages: Vec<Message> = tables
            .messages
            .values()
            .filter(|message| message.sender() == sender)
            .cloned()
            .collect();
        messages.sort_by_key(|message| (message.sent_at(), message.id()));
        Ok(messages)
    }

    async fn delete(&self, id: MessageId) -> MessageRepositoryResult<()> {
        let mut tables = self.database.write::<MessageRepositoryError>()?;
        tables
            .messages
            .remove(&id)
            .map(|_| ())
            .ok_or(MessageRepositoryError::NotFound(id))
    }
}
