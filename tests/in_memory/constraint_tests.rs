//! Uniqueness and referential-integrity checks across the in-memory store.

use crate::in_memory::helpers::{Store, register, request_for, runtime, store};
use chats::ConstraintViolation;
use chats::conversation::ports::ConversationRepositoryError;
use chats::message::{ports::MessageRepositoryError, services::MessageServiceError};
use chats::user::{
    domain::{UserId, UserRole},
    ports::UserRepositoryError,
    services::UserServiceError,
};
use rstest::rstest;
use std::io;
use tokio::runtime::Runtime;

#[rstest]
fn user_without_explicit_role_is_guest(runtime: io::Result<Runtime>, store: Store) {
    let rt = runtime.expect("runtime creation");
    let user = register(&rt, &store, "guest@example.com");

    let stored = rt
        .block_on(store.users.find_by_id(user.id()))
        .expect("lookup")
        .expect("user exists");

    assert_eq!(stored.role(), UserRole::Guest);
}

#[rstest]
fn same_email_twice_is_a_uniqueness_violation(runtime: io::Result<Runtime>, store: Store) {
    let rt = runtime.expect("runtime creation");
    register(&rt, &store, "taken@example.com");

    let err = rt
        .block_on(store.users.register(request_for("taken@example.com")))
        .expect_err("second registration should fail");

    assert!(matches!(
        err,
        UserServiceError::Repository(UserRepositoryError::DuplicateEmail(_))
    ));
    assert_eq!(
        err.constraint_violation(),
        Some(ConstraintViolation::Uniqueness)
    );
    assert_eq!(rt.block_on(store.users.list_all()).expect("list").len(), 1);
}

#[rstest]
fn distinct_emails_both_register(runtime: io::Result<Runtime>, store: Store) {
    let rt = runtime.expect("runtime creation");
    register(&rt, &store, "one@example.com");
    register(&rt, &store, "two@example.com");

    assert_eq!(rt.block_on(store.users.list_all()).expect("list").len(), 2);
}

#[rstest]
fn message_from_unknown_sender_is_rejected(runtime: io::Result<Runtime>, store: Store) {
    let rt = runtime.expect("runtime creation");
    let ghost = UserId::new();

    let err = rt
        .block_on(store.messages.send(ghost, "anyone there?"))
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
fn conversation_with_unknown_participant_is_rejected(
    runtime: io::Result<Runtime>,
    store: Store,
) {
    let rt = runtime.expect("runtime creation");
    let known = register(&rt, &store, "known@example.com");

    let err = rt
        .block_on(store.conversations.start([known.id(), UserId::new()]))
        .expect_err("start should fail");

    assert!(matches!(err, ConversationRepositoryError::UnknownUser(_)));
    assert_eq!(
        err.constraint_violation(),
        Some(ConstraintViolation::ReferentialIntegrity)
    );
    assert!(
        rt.block_on(store.conversations.conversations_for(known.id()))
            .expect("lookup")
            .is_empty()
    );
}
