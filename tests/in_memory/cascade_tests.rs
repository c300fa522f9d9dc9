//! Account deletion cascading through messages and memberships.

use crate::in_memory::helpers::{Store, register, runtime, store};
use chats::user::{ports::UserRepositoryError, services::UserServiceError};
use rstest::rstest;
use std::collections::BTreeSet;
use std::io;
use tokio::runtime::Runtime;

#[rstest]
fn deleting_a_user_removes_its_messages_and_memberships(
    runtime: io::Result<Runtime>,
    store: Store,
) {
    let rt = runtime.expect("runtime creation");
    let alice = register(&rt, &store, "alice@example.com");
    let bob = register(&rt, &store, "bob@example.com");
    let carol = register(&rt, &store, "carol@example.com");

    for body in ["hi", "how are you?"] {
        rt.block_on(store.messages.send(alice.id(), body))
            .expect("send");
    }
    let reply = rt
        .block_on(store.messages.send(bob.id(), "fine"))
        .expect("send");
    let trio = rt
        .block_on(store.conversations.start([alice.id(), bob.id(), carol.id()]))
        .expect("start");
    let pair = rt
        .block_on(store.conversations.start([alice.id(), bob.id()]))
        .expect("start");

    let summary = rt
        .block_on(store.users.delete(alice.id()))
        .expect("delete should succeed");

    assert_eq!(summary.messages_deleted, 2);
    assert_eq!(summary.memberships_removed, 2);
    assert!(
        rt.block_on(store.messages.sent_by(alice.id()))
            .expect("lookup")
            .is_empty()
    );
    assert_eq!(
        rt.block_on(store.messages.find_by_id(reply.id()))
            .expect("lookup"),
        Some(reply)
    );
    assert_eq!(
        rt.block_on(store.conversations.participants(trio.conversation().id()))
            .expect("participants"),
        BTreeSet::from([bob.id(), carol.id()])
    );
    assert_eq!(
        rt.block_on(store.conversations.participants(pair.conversation().id()))
            .expect("participants"),
        BTreeSet::from([bob.id()])
    );
    assert!(
        rt.block_on(store.conversations.conversations_for(alice.id()))
            .expect("lookup")
            .is_empty()
    );
}

#[rstest]
fn deleted_email_can_be_registered_again(runtime: io::Result<Runtime>, store: Store) {
    let rt = runtime.expect("runtime creation");
    let first = register(&rt, &store, "reuse@example.com");
    rt.block_on(store.users.delete(first.id())).expect("delete");

    let second = register(&rt, &store, "reuse@example.com");

    assert_ne!(first.id(), second.id());
}

#[rstest]
fn deleting_a_missing_user_changes_nothing(runtime: io::Result<Runtime>, store: Store) {
    let rt = runtime.expect("runtime creation");
    let alice = register(&rt, &store, "alice@example.com");
    rt.block_on(store.users.delete(alice.id())).expect("delete");

    let err = rt
        .block_on(store.users.delete(alice.id()))
        .expect_err("second delete should fail");

    assert!(matches!(
        err,
        UserServiceError::Repository(UserRepositoryError::NotFound(id)) if id == alice.id()
    ));
}
