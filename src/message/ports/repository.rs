//! Repository port for message persistence.

use crate::constraint::ConstraintViolation;
use crate::message::domain::{Message, MessageId};
use crate::persistence::StoreAccessError;
use crate::user::domain::UserId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for message repository operations.
pub type MessageRepositoryResult<T> = Result<T, MessageRepositoryError>;

/// Message persistence contract.
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Stores a new message.
    ///
    /// # Errors
    ///
    /// Returns [`MessageRepositoryError::UnknownSender`] when the sender does
    /// not exist or [`MessageRepositoryError::DuplicateMessage`] when the
    /// identifier is already taken.
    async fn store(&self, message: &Message) -> MessageRepositoryResult<()>;

    /// Persists a changed body. The sender and send timestamp are never
    /// written.
    ///
    /// # Errors
    ///
    /// Returns [`MessageRepositoryError::NotFound`] when the message does not
    /// exist.
    async fn update(&self, message: &Message) -> MessageRepositoryResult<()>;

    /// Finds a message by identifier.
    async fn find_by_id(&self, id: MessageId) -> MessageRepositoryResult<Option<Message>>;

    /// Returns every message sent by `sender`, oldest first.
    async fn find_by_sender(&self, sender: UserId) -> MessageRepositoryResult<Vec<Message>>;

    /// Deletes a single message.
    ///
    /// # Errors
    ///
    /// Returns [`MessageRepositoryError::NotFound`] when the message does not
    /// exist.
    async fn delete(&self, id: MessageId) -> MessageRepositoryResult<()>;
}

/// Errors returned by message repository implementations.
#[derive(Debug, Clone, Error)]
pub enum MessageRepositoryError {
    /// A message with the same identifier already exists.
    #[error("duplicate message identifier: {0}")]
    DuplicateMessage(MessageId),

    /// The referenced sender does not exist.
    #[error("sender does not exist: {0}")]
    UnknownSender(UserId),

    /// The message was not found.
    #[error("message not found: {0}")]
    NotFound(MessageId),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl MessageRepositoryError {
    /// Wraps a data-quality error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Returns the storage constraint that rejected the write, if any.
    #[must_use]
    pub const fn constraint_violation(&self) -> Option<ConstraintViolation> {
        match self {
            Self::DuplicateMessage(_) => Some(ConstraintViolation::Uniqueness),
            Self::UnknownSender(_) => Some(ConstraintViolation::ReferentialIntegrity),
            Self::NotFound(_) | Self::InvalidPersistedData(_) | Self::Persistence(_) => None,
        }
    }
}

impl From<StoreAccessError> for MessageRepositoryError {
    fn from(err: StoreAccessError) -> Self {
        Self::persistence(err)
    }
}
