//! Repository port for conversation membership join records.

use super::ConversationRepositoryResult;
use crate::conversation::domain::{ConversationId, Participant};
use crate::user::domain::UserId;
use async_trait::async_trait;
use std::collections::BTreeSet;

/// Membership persistence contract with set semantics.
#[async_trait]
pub trait ParticipantRepository: Send + Sync {
    /// Adds a membership.
    ///
    /// Returns `false` without writing when the user is already a member.
    ///
    /// # Errors
    ///
    /// Returns
    /// [`ConversationRepositoryError::UnknownConversation`](super::ConversationRepositoryError::UnknownConversation)
    /// or
    /// [`ConversationRepositoryError::UnknownUser`](super::ConversationRepositoryError::UnknownUser)
    /// when either side of the membership does not exist.
    async fn add(&self, participant: &Participant) -> ConversationRepositoryResult<bool>;

    /// Removes a membership.
    ///
    /// Returns `false` when the user was not a member.
    async fn remove(&self, participant: &Participant) -> ConversationRepositoryResult<bool>;

    /// Returns the users participating in a conversation.
    async fn participants_of(
        &self,
        conversation_id: ConversationId,
    ) -> ConversationRepositoryResult<BTreeSet<UserId>>;

    /// Returns the conversations a user participates in.
    async fn conversations_of(
        &self,
        user_id: UserId,
    ) -> ConversationRepositoryResult<BTreeSet<ConversationId>>;
}
