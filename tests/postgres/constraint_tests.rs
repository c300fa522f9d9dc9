//! Constraint violations surfaced by the `PostgreSQL` adapters.

use crate::postgres::helpers::{PgStore, pg_store};
use chats::ConstraintViolation;
use chats::conversation::{domain::ConversationId, ports::ConversationRepositoryError};
use chats::message::{ports::MessageRepositoryError, services::MessageServiceError};
use chats::user::{
    domain::UserId,
    ports::UserRepositoryError,
    services::{RegisterUserRequest, UpdateUserRequest, UserServiceError},
};
use rstest::rstest;

#[rstest]
fn duplicate_email_maps_to_uniqueness(pg_store: Option<PgStore>) {
    let Some(store) = pg_store else { return };
    store.register("taken@example.com");

    let err = store
        .rt
        .block_on(store.users.register(RegisterUserRequest::new(
            "Other",
            "Person",
            "taken@example.com",
            "digest",
        )))
        .expect_err("duplicate email should fail");

    assert!(matches!(
        err,
        UserServiceError::Repository(UserRepositoryError::DuplicateEmail(_))
    ));
    assert_eq!(
        err.constraint_violation(),
        Some(ConstraintViolation::Uniqueness)
    );
    assert_eq!(store.count("SELECT COUNT(*) AS count FROM users"), 1);
}

#[rstest]
fn update_to_taken_email_maps_to_uniqueness(pg_store: Option<PgStore>) {
    let Some(store) = pg_store else { return };
    store.register("one@example.com");
    let two = store.register("two@example.com");

    let err = store
        .rt
        .block_on(store.users.update_profile(
            two.id(),
            UpdateUserRequest::new().with_email("one@example.com"),
        ))
        .expect_err("update should fail");

    assert_eq!(
        err.constraint_violation(),
        Some(ConstraintViolation::Uniqueness)
    );
}

#[rstest]
fn unknown_sender_maps_to_referential_integrity(pg_store: Option<PgStore>) {
    let Some(store) = pg_store else { return };
    let ghost = UserId::new();

    let err = store
        .rt
        .block_on(store.messages.send(ghost, "hello?"))
        .expect_err("send should fail");

    assert!(matches!(
        err,
        MessageServiceError::Repository(MessageRepositoryError::UnknownSender(id)) if id == ghost
    ));
    assert_eq!(
        err.constraint_violation(),
        Some(ConstraintViolation::ReferentialIntegrity)
    );
}

#[rstest]
fn unknown_participant_rolls_back_conversation(pg_store: Option<PgStore>) {
    let Some(store) = pg_store else { return };
    let known = store.register("known@example.com");

    let err = store
        .rt
        .block_on(store.conversations.start([known.id(), UserId::new()]))
        .expect_err("start should fail");

    assert!(matches!(err, ConversationRepositoryError::UnknownUser(_)));
    assert_eq!(store.count("SELECT COUNT(*) AS count FROM conversations"), 0);
    assert_eq!(
        store.count("SELECT COUNT(*) AS count FROM conversations_participants"),
        0
    );
}

#[rstest]
fn membership_in_unknown_conversation_is_rejected(pg_store: Option<PgStore>) {
    let Some(store) = pg_store else { return };
    let user = store.register("user@example.com");
    let missing = ConversationId::new();

    let err = store
        .rt
        .block_on(store.conversations.add_participant(missing, user.id()))
        .expect_err("add should fail");

    assert!(matches!(
        err,
        ConversationRepositoryError::UnknownConversation(id) if id == missing
    ));
    assert_eq!(
        err.constraint_violation(),
        Some(ConstraintViolation::ReferentialIntegrity)
    );
}
