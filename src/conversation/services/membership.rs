//! Service layer for conversations and their participant sets.
//!
//! Conversation records and membership rows live behind separate ports;
//! [`ConversationService`] composes them so callers see a conversation with
//! its participants.

use crate::conversation::{
    domain::{Conversation, ConversationId, ConversationWithParticipants, Participant},
    ports::{ConversationRepository, ConversationRepositoryResult, ParticipantRepository},
};
use crate::user::domain::UserId;
use mockable::Clock;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info};

/// Conversation and membership orchestration service.
#[derive(Clone)]
pub struct ConversationService<R, P, C>
where
    R: ConversationRepository,
    P: ParticipantRepository,
    C: Clock + Send + Sync,
{
    conversations: Arc<R>,
    participants: Arc<P>,
    clock: Arc<C>,
}

impl<R, P, C> ConversationService<R, P, C>
where
    R: ConversationRepository,
    P: ParticipantRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new conversation service.
    #[must_use]
    pub const fn new(conversations: Arc<R>, participants: Arc<P>, clock: Arc<C>) -> Self {
        Self {
            conversations,
            participants,
            clock,
        }
    }

    /// Starts a conversation with the given participants. Duplicates in the
    /// input collapse into one membership.
    ///
    /// # Errors
    ///
    /// Returns [`crate::conversation::ports::ConversationRepositoryError::UnknownUser`] when a
    /// participant does not exist; nothing is stored in that case.
    pub async fn start(
        &self,
        participants: impl IntoIterator<Item = UserId>,
    ) -> ConversationRepositoryResult<ConversationWithParticipants> {
        let members: BTreeSet<UserId> = participants.into_iter().collect();
        let conversation = Conversation::new(&*self.clock);
        self.conversations.create(&conversation, &members).await?;
        info!(
            conversation_id = %conversation.id(),
            participants = members.len(),
            "started conversation"
        );
        Ok(ConversationWithParticipants::new(conversation, members))
    }

    /// Finds a conversation and its participants as one consistent read.
    ///
    /// # Errors
    ///
    /// Returns [`crate::conversation::ports::ConversationRepositoryError::Persistence`] when
    /// lookup fails.
    pub async fn find_by_id(
        &self,
        id: ConversationId,
    ) -> ConversationRepositoryResult<Option<ConversationWithParticipants>> {
        self.conversations.find_with_participants(id).await
    }

    /// Returns up to `limit` conversations, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`crate::conversation::ports::ConversationRepositoryError::Persistence`] when
    /// lookup fails.
    pub async fn list_recent(&self, limit: usize) -> ConversationRepositoryResult<Vec<Conversation>> {
        self.conversations.list_recent(limit).await
    }

    /// Adds a user to a conversation. Returns `false` when the user was
    /// already a member.
    ///
    /// # Errors
    ///
    /// Returns [`crate::conversation::ports::ConversationRepositoryError::UnknownConversation`]
    /// or [`crate::conversation::ports::ConversationRepositoryError::UnknownUser`] for dangling
    /// references.
    pub async fn add_participant(
        &self,
        conversation_id: ConversationId,
        user_id: UserId,
    ) -> ConversationRepositoryResult<bool> {
        let added = self
            .participants
            .add(&Participant::new(conversation_id, user_id))
            .await?;
        debug!(%conversation_id, %user_id, added, "add participant");
        Ok(added)
    }

    /// Removes a user from a conversation. Returns `false` when the user was
    /// not a member.
    ///
    /// # Errors
    ///
    /// Returns [`crate::conversation::ports::ConversationRepositoryError::Persistence`] when
    /// the write fails.
    pub async fn remove_participant(
        &self,
        conversation_id: ConversationId,
        user_id: UserId,
    ) -> ConversationRepositoryResult<bool> {
        let removed = self
            .participants
            .remove(&Participant::new(conversation_id, user_id))
            .await?;
        debug!(%conversation_id, %user_id, removed, "remove participant");
        Ok(removed)
    }

    /// Returns the participants of a conversation.
    ///
    /// # Errors
    ///
    /// Returns [`crate::conversation::ports::ConversationRepositoryError::Persistence`] when
    /// lookup fails.
    pub async fn participants(
        &self,
        conversation_id: ConversationId,
    ) -> ConversationRepositoryResult<BTreeSet<UserId>> {
        self.participants.participants_of(conversation_id).await
    }

    /// Returns the conversations a user participates in, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`crate::conversation::ports::ConversationRepositoryError::Persistence`] when
    /// lookup fails.
    pub async fn conversations_for(
        &self,
        user_id: UserId,
    ) -> ConversationRepositoryResult<Vec<Conversation>> {
        self.conversations.find_by_participant(user_id).await
    }

    /// Deletes a conversation and its memberships.
    ///
    /// # Errors
    ///
    /// Returns [`crate::conversation::ports::ConversationRepositoryError::NotFound`] when the
    /// conversation does not exist.
    pub async fn delete(&self, id: ConversationId) -> ConversationRepositoryResult<()> {
        self.conversations.delete(id).await?;
        info!(conversation_id = %id, "deleted conversation");
        Ok(())
    }
}
