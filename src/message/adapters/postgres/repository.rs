//! `PostgreSQL` repository implementation for messages.

use super::models::MessageRow;
use crate::message::{
    domain::{Message, MessageBody, MessageId, PersistedMessageData},
    ports::{MessageRepository, MessageRepositoryError, MessageRepositoryResult},
};
use crate::persistence::schema::{MESSAGES_PKEY, MESSAGES_SENDER_FKEY, messages};
use crate::persistence::{ChatPgPool, ConstraintFailure, constraint_failure, with_connection};
use crate::user::domain::UserId;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::Error as DieselError;

/// `PostgreSQL`-backed message repository.
///
/// Sender references are enforced by the `messages_sender_id_fkey` foreign
/// key; its violations surface as [`MessageRepositoryError::UnknownSender`].
#[derive(Debug, Clone)]
pub struct PostgresMessageRepository {
    pool: ChatPgPool,
}

impl PostgresMessageRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: ChatPgPool) -> Self {
        Self { pool }
    }
}

impl From<DieselError> for MessageRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl MessageRepository for PostgresMessageRepository {
    async fn store(&self, message: &Message) -> MessageRepositoryResult<()> {
        let message_id = message.id();
        let sender = message.sender();
        let row = MessageRow {
            message_id: message_id.into_inner(),
            sender_id: sender.into_inner(),
            message_body: message.body().as_str().to_owned(),
            sent_at: message.sent_at(),
        };

        with_connection(&self.pool, move |connection| {
            diesel::insert_into(messages::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match constraint_failure(&err) {
                    Some(ConstraintFailure::ForeignKey(MESSAGES_SENDER_FKEY)) => {
                        MessageRepositoryError::UnknownSender(sender)
                    }
                    Some(ConstraintFailure::Unique(MESSAGES_PKEY)) => {
                        MessageRepositoryError::DuplicateMessage(message_id)
                    }
                    _ => MessageRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, message: &Message) -> MessageRepositoryResult<()> {
        let message_id = message.id();
        let body = message.body().as_str().to_owned();

        with_connection(&self.pool, move |connection| {
            let updated = diesel::update(messages::table.find(message_id.into_inner()))
                .set(messages::message_body.eq(&body))
                .execute(connection)?;
            if updated == 0 {
                return Err(MessageRepositoryError::NotFound(message_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: MessageId) -> MessageRepositoryResult<Option<Message>> {
        with_connection(&self.pool, move |connection| {
            let row = messages::table
                .find(id.into_inner())
                .select(MessageRow::as_select())
                .first::<MessageRow>(connection)
                .optional()?;
            row.map(row_to_message).transpose()
        })
        .await
    }

    async fn find_by_sender(&self, sender: UserId) -> MessageRepositoryResult<Vec<Message>> {
        with_connection(&self.pool, move |connection| {
            let rows = messages::table
                .filter(messages::sender_id.eq(sender.into_inner()))
                .order((messages::sent_at.asc(), messages::message_id.asc()))
                .select(MessageRow::as_select())
                .load::<MessageRow>(connection)?;
            rows.into_iter().map(row_to_message).collect()
        })
        .await
    }

    async fn delete(&self, id: MessageId) -> MessageRepositoryResult<()> {
        with_connection(&self.pool, move |connection| {
            let removed = diesel::delete(messages::table.find(id.into_inner())).execute(connection)?;
            if removed == 0 {
                return Err(MessageRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }
}

fn row_to_message(row: MessageRow) -> MessageRepositoryResult<Message> {
    let MessageRow {
        message_id,
        sender_id,
        message_body,
        sent_at,
    } = row;

    let body =
        MessageBody::new(message_body).map_err(MessageRepositoryError::invalid_persisted_data)?;
    Ok(Message::from_persisted(PersistedMessageData {
        id: MessageId::from_uuid(message_id),
        sender: UserId::from_uuid(sender_id),
        body,
        sent_at,
    }))
}
