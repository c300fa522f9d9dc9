//! In-memory conversation and participant repositories.
//!
//! Both adapters read and write the shared [`InMemoryDatabase`], so
//! memberships are checked against the users and conversations it holds.

use async_trait::async_trait;
use std::collections::BTreeSet;

use crate::conversation::{
    domain::{Conversation, ConversationId, ConversationWithParticipants, Participant},
    ports::{
        ConversationRepository, ConversationRepositoryError, ConversationRepositoryResult,
        ParticipantRepository,
    },
};
use crate::persistence::InMemoryDatabase;
use crate::user::domain::UserId;

/// Thread-safe in-memory conversation repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryConversationRepository {
    database: InMemoryDatabase,
}

impl InMemoryConversationRepository {
    /// Creates a repository over a store shared with other adapters.
    #[must_use]
    pub const fn with_database(database: InMemoryDatabase) -> Self {
        Self { database }
    }
}

#[async_trait]
impl ConversationRepository for InMemoryConversationRepository {
    async fn create(
        &self,
        conversation: &Conversation,
        participants: &BTreeSet<UserId>,
    ) -> ConversationRepositoryResult<()> {
        let mut tables = self.database.write::<ConversationRepositoryError>()?;

        if tables.conversations.contains_key(&conversation.id()) {
            return Err(ConversationRepositoryError::DuplicateConversation(
                conversation.id(),
            ));
        }

        // Validate every reference before writing anything.
        if let Some(missing) = participants
            .iter()
            .find(|user_id| !tables.users.contains_key(*user_id))
        {
            return Err(ConversationRepositoryError::UnknownUser(*missing));
        }

        tables
            .conversations
            .insert(conversation.id(), *conversation);
        tables.participants.extend(
            participants
                .iter()
                .map(|user_id| (conversation.id(), *user_id)),
        );
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: ConversationId,
    ) -> ConversationRepositoryResult<Option<Conversation>> {
        let tables = self.database.read::<ConversationRepositoryError>()?;
        Ok(tables.conversations.get(&id).copied())
    }

    async fn find_with_participants(
        &self,
        id: ConversationId,
    ) -> ConversationRepositoryResult<Option<ConversationWithParticipants>> {
        let tables = self.database.read::<ConversationRepositoryError>()?;
        Ok(tables.conversations.get(&id).map(|conversation| {
            let participants = tables
                .participants
                .iter()
                .filter(|(conversation_id, _)| *conversation_id == id)
                .map(|(_, user_id)| *user_id)
                .collect();
            ConversationWithParticipants::new(*conversation, participants)
        }))
    }

    async fn find_by_participant(
        &self,
        user_id: UserId,
    ) -> ConversationRepositoryResult<Vec<Conversation>> {
        let tables = self.database.read::<ConversationRepositoryError>()?;
        let mut conversations: Vec<Conversation> = tables
            .participants
            .iter()
            .filter(|(_, member)| *member == user_id)
            .filter_map(|(conversation_id, _)| tables.conversations.get(conversation_id).copied())
            .collect();
        conversations.sort_by_key(|conversation| (conversation.created_at(), conversation.id()));
        Ok(conversations)
    }

    async fn list_recent(&self, limit: usize) -> ConversationRepositoryResult<Vec<Conversation>> {
        let tables = self.database.read::<ConversationRepositoryError>()?;
        let mut conversations: Vec<Conversation> = tables.conversations.values().copied().collect();
        conversations.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.id().cmp(&a.id()))
        });
        conversations.truncate(limit);
        Ok(conversations)
    }

    async fn delete(&self, id: ConversationId) -> ConversationRepositoryResult<()> {
        let mut tables = self.database.write::<ConversationRepositoryError>()?;
        if tables.conversations.remove(&id).is_none() {
            return Err(ConversationRepositoryError::NotFound(id));
        }
        tables
            .participants
            .retain(|(conversation_id, _)| *conversation_id != id);
        Ok(())
    }
}

/// Thread-safe in-memory membership repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryParticipantRepository {
    database: InMemoryDatabase,
}

impl InMemoryParticipantRepository {
    /// Creates a repository over a store shared with other adapters.
    #[must_use]
    pub const fn with_database(database: InMemoryDatabase) -> Self {
        Self { database }
    }
}

#[async_trait]
impl ParticipantRepository for InMemoryParticipantRepository {
    async fn add(&self, participant: &Participant) -> ConversationRepositoryResult<bool> {
        let mut tables = self.database.write::<ConversationRepositoryError>()?;

        if !tables
            .conversations
            .contains_key(&participant.conversation_id())
        {
            return Err(ConversationRepositoryError::UnknownConversation(
                participant.conversation_id(),
            ));
        }

        if !tables.users.contains_key(&participant.user_id()) {
            return Err(ConversationRepositoryError::UnknownUser(
                participant.user_id(),
            ));
        }

        Ok(tables
            .participants
            .insert((participant.conversation_id(), participant.user_id())))
    }

    async fn remove(&self, participant: &Participant) -> ConversationRepositoryResult<bool> {
        let mut tables = self.database.write::<ConversationRepositoryError>()?;
        Ok(tables
            .participants
            .remove(&(participant.conversation_id(), participant.user_id())))
    }

    async fn participants_of(
        &self,
        conversation_id: ConversationId,
    ) -> ConversationRepositoryResult<BTreeSet<UserId>> {
        let tables = self.database.read::<ConversationRepositoryError>()?;
        Ok(tables
            .participants
            .iter()
            .filter(|(id, _)| *id == conversation_id)
            .map(|(_, user_id)| *user_id)
            .collect())
    }

    async fn conversations_of(
        &self,
        user_id: UserId,
    ) -> ConversationRepositoryResult<BTreeSet<ConversationId>> {
        let tables = self.database.read::<ConversationRepositoryError>()?;
        Ok(tables
            .participants
            .iter()
            .filter(|(_, id)| *id == user_id)
            .map(|(conversation_id, _)| *conversation_id)
            .collect())
    }
}
