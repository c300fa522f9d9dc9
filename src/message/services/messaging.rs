//! Service layer for sending and managing messages.

use crate::constraint::ConstraintViolation;
use crate::message::{
    domain::{Message, MessageBody, MessageDomainError, MessageId},
    ports::{MessageRepository, MessageRepositoryError},
};
use crate::user::domain::UserId;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Service-level errors for message operations.
#[derive(Debug, Error)]
pub enum MessageServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] MessageDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] MessageRepositoryError),
}

impl MessageServiceError {
    /// Returns the storage constraint that rejected the write, if any.
    #[must_use]
    pub const fn constraint_violation(&self) -> Option<ConstraintViolation> {
        match self {
            Self::Domain(_) => None,
            Self::Repository(err) => err.constraint_violation(),
        }
    }
}

/// Result type for message service operations.
pub type MessageServiceResult<T> = Result<T, MessageServiceError>;

/// Message orchestration service.
#[derive(Clone)]
pub struct MessageService<R, C>
where
    R: MessageRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> MessageService<R, C>
where
    R: MessageRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new message service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Sends a message from `sender`.
    ///
    /// # Errors
    ///
    /// Returns [`MessageServiceError::Domain`] for an empty body, or
    /// [`MessageServiceError::Repository`] when the sender does not exist or
    /// persistence fails.
    pub async fn send(
        &self,
        sender: UserId,
        body: impl Into<String>,
    ) -> MessageServiceResult<Message> {
        let message = Message::new(sender, MessageBody::new(body)?, &*self.clock);
        self.repository.store(&message).await?;
        info!(message_id = %message.id(), sender = %sender, "stored message");
        Ok(message)
    }

    /// Finds a message by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`MessageServiceError::Repository`] when persistence lookup
    /// fails.
    pub async fn find_by_id(&self, id: MessageId) -> MessageServiceResult<Option<Message>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Returns the messages a user has sent, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`MessageServiceError::Repository`] when persistence lookup
    /// fails.
    pub async fn sent_by(&self, sender: UserId) -> MessageServiceResult<Vec<Message>> {
        Ok(self.repository.find_by_sender(sender).await?)
    }

    /// Replaces the body of a message, keeping its send timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`MessageServiceError::Domain`] for an empty body, or
    /// [`MessageServiceError::Repository`] when the message is missing or
    /// persistence fails.
    pub async fn edit(
        &self,
        id: MessageId,
        body: impl Into<String>,
    ) -> MessageServiceResult<Message> {
        let new_body = MessageBody::new(body)?;
        let mut message = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(MessageRepositoryError::NotFound(id))?;
        message.edit_body(new_body);
        self.repository.update(&message).await?;
        Ok(message)
    }

    /// Deletes a message.
    ///
    /// # Errors
    ///
    /// Returns [`MessageServiceError::Repository`] when the message is
    /// missing or persistence fails.
    pub async fn delete(&self, id: MessageId) -> MessageServiceResult<()> {
        self.repository.delete(id).await?;
        info!(message_id = %id, "deleted message");
        Ok(())
    }
}
