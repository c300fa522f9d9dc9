//! `PostgreSQL` repositories for conversations and memberships.

use super::models::{ConversationRow, ParticipantRow};
use crate::conversation::{
    domain::{Conversation, ConversationId, ConversationWithParticipants, Participant},
    ports::{
        ConversationRepository, ConversationRepositoryError, ConversationRepositoryResult,
        ParticipantRepository,
    },
};
use crate::persistence::schema::{
    CONVERSATIONS_PKEY, PARTICIPANTS_CONVERSATION_FKEY, PARTICIPANTS_USER_FKEY, conversations,
    conversations_participants,
};
use crate::persistence::{ChatPgPool, ConstraintFailure, constraint_failure, with_connection};
use crate::user::domain::UserId;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use std::collections::BTreeSet;

impl From<DieselError> for ConversationRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

/// `PostgreSQL`-backed conversation repository.
#[derive(Debug, Clone)]
pub struct PostgresConversationRepository {
    pool: ChatPgPool,
}

impl PostgresConversationRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: ChatPgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConversationRepository for PostgresConversationRepository {
    async fn create(
        &self,
        conversation: &Conversation,
        participants: &BTreeSet<UserId>,
    ) -> ConversationRepositoryResult<()> {
        let conversation_id = conversation.id();
        let row = ConversationRow {
            conversation_id: conversation_id.into_inner(),
            created_at: conversation.created_at(),
        };
        let members: Vec<Participant> = participants
            .iter()
            .map(|user_id| Participant::new(conversation_id, *user_id))
            .collect();

        with_connection(&self.pool, move |connection| {
            connection.transaction::<_, ConversationRepositoryError, _>(|tx| {
                diesel::insert_into(conversations::table)
                    .values(&row)
                    .execute(tx)
                    .map_err(|err| match constraint_failure(&err) {
                        Some(ConstraintFailure::Unique(CONVERSATIONS_PKEY)) => {
                            ConversationRepositoryError::DuplicateConversation(conversation_id)
                        }
                        _ => ConversationRepositoryError::persistence(err),
                    })?;

                // One row at a time so a dangling reference names its user.
                for member in &members {
                    insert_participant(tx, member)?;
                }
                Ok(())
            })
        })
        .await
    }

    async fn find_by_id(
        &self,
        id: ConversationId,
    ) -> ConversationRepositoryResult<Option<Conversation>> {
        with_connection(&self.pool, move |connection| {
            let row = conversations::table
                .find(id.into_inner())
                .select(ConversationRow::as_select())
                .first::<ConversationRow>(connection)
                .optional()?;
            Ok(row.map(row_to_conversation))
        })
        .await
    }

    async fn find_with_participants(
        &self,
        id: ConversationId,
    ) -> ConversationRepositoryResult<Option<ConversationWithParticipants>> {
        with_connection(&self.pool, move |connection| {
            connection
                .build_transaction()
                .repeatable_read()
                .read_only()
                .run::<_, ConversationRepositoryError, _>(|tx| {
                    let Some(row) = conversations::table
                        .find(id.into_inner())
                        .select(ConversationRow::as_select())
                        .first::<ConversationRow>(tx)
                        .optional()?
                    else {
                        return Ok(None);
                    };
                    let members = conversations_participants::table
                        .filter(conversations_participants::conversation_id.eq(id.into_inner()))
                        .select(conversations_participants::user_id)
                        .load::<uuid::Uuid>(tx)?;
                    Ok(Some(ConversationWithParticipants::new(
                        row_to_conversation(row),
                        members.into_iter().map(UserId::from_uuid).collect(),
                    )))
                })
        })
        .await
    }

    async fn find_by_participant(
        &self,
        user_id: UserId,
    ) -> ConversationRepositoryResult<Vec<Conversation>> {
        with_connection(&self.pool, move |connection| {
            let rows = conversations::table
                .inner_join(conversations_participants::table)
                .filter(conversations_participants::user_id.eq(user_id.into_inner()))
                .order((
                    conversations::created_at.asc(),
                    conversations::conversation_id.asc(),
                ))
                .select(ConversationRow::as_select())
                .load::<ConversationRow>(connection)?;
            Ok(rows.into_iter().map(row_to_conversation).collect())
        })
        .await
    }

    async fn list_recent(&self, limit: usize) -> ConversationRepositoryResult<Vec<Conversation>> {
        let max_rows = i64::try_from(limit).unwrap_or(i64::MAX);
        with_connection(&self.pool, move |connection| {
            let rows = conversations::table
                .order((
                    conversations::created_at.desc(),
                    conversations::conversation_id.desc(),
                ))
                .limit(max_rows)
                .select(ConversationRow::as_select())
                .load::<ConversationRow>(connection)?;
            Ok(rows.into_iter().map(row_to_conversation).collect())
        })
        .await
    }

    async fn delete(&self, id: ConversationId) -> ConversationRepositoryResult<()> {
        let uuid = id.into_inner();
        with_connection(&self.pool, move |connection| {
            connection.transaction::<_, ConversationRepositoryError, _>(|tx| {
                diesel::delete(
                    conversations_participants::table
                        .filter(conversations_participants::conversation_id.eq(uuid)),
                )
                .execute(tx)?;
                let removed = diesel::delete(conversations::table.find(uuid)).execute(tx)?;
                if removed == 0 {
                    return Err(ConversationRepositoryError::NotFound(id));
                }
                Ok(())
            })
        })
        .await
    }
}

/// `PostgreSQL`-backed membership repository.
#[derive(Debug, Clone)]
pub struct PostgresParticipantRepository {
    pool: ChatPgPool,
}

impl PostgresParticipantRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: ChatPgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ParticipantRepository for PostgresParticipantRepository {
    async fn add(&self, participant: &Participant) -> ConversationRepositoryResult<bool> {
        let member = *participant;
        with_connection(&self.pool, move |connection| {
            insert_participant(connection, &member)
        })
        .await
    }

    async fn remove(&self, participant: &Participant) -> ConversationRepositoryResult<bool> {
        let conversation_id = participant.conversation_id().into_inner();
        let user_id = participant.user_id().into_inner();
        with_connection(&self.pool, move |connection| {
            let removed = diesel::delete(
                conversations_participants::table
                    .filter(conversations_participants::conversation_id.eq(conversation_id))
                    .filter(conversations_participants::user_id.eq(user_id)),
            )
            .execute(connection)?;
            Ok(removed > 0)
        })
        .await
    }

    async fn participants_of(
        &self,
        conversation_id: ConversationId,
    ) -> ConversationRepositoryResult<BTreeSet<UserId>> {
        with_connection(&self.pool, move |connection| {
            let ids = conversations_participants::table
                .filter(conversations_participants::conversation_id.eq(conversation_id.into_inner()))
                .select(conversations_participants::user_id)
                .load::<uuid::Uuid>(connection)?;
            Ok(ids.into_iter().map(UserId::from_uuid).collect())
        })
        .await
    }

    async fn conversations_of(
        &self,
        user_id: UserId,
    ) -> ConversationRepositoryResult<BTreeSet<ConversationId>> {
        with_connection(&self.pool, move |connection| {
            let ids = conversations_participants::table
                .filter(conversations_participants::user_id.eq(user_id.into_inner()))
                .select(conversations_participants::conversation_id)
                .load::<uuid::Uuid>(connection)?;
            Ok(ids.into_iter().map(ConversationId::from_uuid).collect())
        })
        .await
    }
}

/// Inserts a membership row, returning `false` when it already existed.
fn insert_participant(
    connection: &mut PgConnection,
    participant: &Participant,
) -> ConversationRepositoryResult<bool> {
    let row = ParticipantRow {
        conversation_id: participant.conversation_id().into_inner(),
        user_id: participant.user_id().into_inner(),
    };
    let inserted = diesel::insert_into(conversations_participants::table)
        .values(&row)
        .on_conflict_do_nothing()
        .execute(connection)
        .map_err(|err| match constraint_failure(&err) {
            Some(ConstraintFailure::ForeignKey(PARTICIPANTS_CONVERSATION_FKEY)) => {
                ConversationRepositoryError::UnknownConversation(participant.conversation_id())
            }
            Some(ConstraintFailure::ForeignKey(PARTICIPANTS_USER_FKEY)) => {
                ConversationRepositoryError::UnknownUser(participant.user_id())
            }
            _ => ConversationRepositoryError::persistence(err),
        })?;
    Ok(inserted > 0)
}

fn row_to_conversation(row: ConversationRow) -> Conversation {
    Conversation::from_persisted(ConversationId::from_uuid(row.conversation_id), row.created_at)
}
