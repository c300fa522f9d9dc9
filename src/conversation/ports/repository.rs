//! Repository port for conversation records.

use crate::constraint::ConstraintViolation;
use crate::conversation::domain::{Conversation, ConversationId, ConversationWithParticipants};
use crate::persistence::StoreAccessError;
use crate::user::domain::UserId;
use async_trait::async_trait;
use std::collections::BTreeSet;
use std::sync::Arc;
use thiserror::Error;

/// Result type for conversation and participant repository operations.
pub type ConversationRepositoryResult<T> = Result<T, ConversationRepositoryError>;

/// Conversation persistence contract.
#[async_trait]
pub trait ConversationRepository: Send + Sync {
    /// Stores a new conversation together with its initial participants.
    ///
    /// Either every row is written or none is.
    ///
    /// # Errors
    ///
    /// Returns [`ConversationRepositoryError::UnknownUser`] when a
    /// participant does not exist or
    /// [`ConversationRepositoryError::DuplicateConversation`] when the
    /// identifier is already taken.
    async fn create(
        &self,
        conversation: &Conversation,
        participants: &BTreeSet<UserId>,
    ) -> ConversationRepositoryResult<()>;

    /// Finds a conversation by identifier.
    async fn find_by_id(
        &self,
        id: ConversationId,
    ) -> ConversationRepositoryResult<Option<Conversation>>;

    /// Finds a conversation and its participant set. Both are read from the
    /// same snapshot, so a concurrent membership change is seen either
    /// entirely or not at all.
    async fn find_with_participants(
        &self,
        id: ConversationId,
    ) -> ConversationRepositoryResult<Option<ConversationWithParticipants>>;

    /// Returns every conversation `user_id` participates in, oldest first,
    /// in a single read.
    async fn find_by_participant(
        &self,
        user_id: UserId,
    ) -> ConversationRepositoryResult<Vec<Conversation>>;

    /// Returns up to `limit` conversations, newest first.
    async fn list_recent(&self, limit: usize) -> ConversationRepositoryResult<Vec<Conversation>>;

    /// Deletes a conversation and its membership rows. Users and messages
    /// are untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ConversationRepositoryError::NotFound`] when the
    /// conversation does not exist.
    async fn delete(&self, id: ConversationId) -> ConversationRepositoryResult<()>;
}

/// Errors returned by conversation and participant repositories.
#[derive(Debug, Clone, Error)]
pub enum ConversationRepositoryError {
    /// A conversation with the same identifier already exists.
    #[error("duplicate conversation identifier: {0}")]
    DuplicateConversation(ConversationId),

    /// A membership references a conversation that does not exist.
    #[error("conversation does not exist: {0}")]
    UnknownConversation(ConversationId),

    /// A membership references a user that does not exist.
    #[error("participant does not exist: {0}")]
    UnknownUser(UserId),

    /// The conversation was not found.
    #[error("conversation not found: {0}")]
    NotFound(ConversationId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ConversationRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Returns the storage constraint that rejected the write, if any.
    #[must_use]
    pub const fn constraint_violation(&self) -> Option<ConstraintViolation> {
        match self {
            Self::DuplicateConversation(_) => Some(ConstraintViolation::Uniqueness),
            Self::UnknownConversation(_) | Self::UnknownUser(_) => {
                Some(ConstraintViolation::ReferentialIntegrity)
            }
            Self::NotFound(_) | Self::Persistence(_) => None,
        }
    }
}

impl From<StoreAccessError> for ConversationRepositoryError {
    fn from(err: StoreAccessError) -> Self {
        Self::persistence(err)
    }
}
