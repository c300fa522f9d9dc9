//! Creation timestamps survive later updates.

use crate::in_memory::helpers::{Store, register, runtime, store};
use chats::user::{domain::UserRole, services::UpdateUserRequest};
use chrono::TimeDelta;
use rstest::rstest;
use std::io;
use tokio::runtime::Runtime;

#[rstest]
fn profile_update_keeps_created_at(runtime: io::Result<Runtime>, store: Store) {
    let rt = runtime.expect("runtime creation");
    let user = register(&rt, &store, "stamp@example.com");
    store.clock.advance(TimeDelta::days(2));

    rt.block_on(store.users.update_profile(
        user.id(),
        UpdateUserRequest::new()
            .with_first_name("Renamed")
            .with_phone_number("555-0199")
            .with_role(UserRole::Host),
    ))
    .expect("update");

    let stored = rt
        .block_on(store.users.find_by_id(user.id()))
        .expect("lookup")
        .expect("user exists");
    assert_eq!(stored.created_at(), user.created_at());
    assert_eq!(stored.first_name().as_str(), "Renamed");
}

#[rstest]
fn message_edit_keeps_sent_at(runtime: io::Result<Runtime>, store: Store) {
    let rt = runtime.expect("runtime creation");
    let user = register(&rt, &store, "stamp@example.com");
    let sent = rt
        .block_on(store.messages.send(user.id(), "first"))
        .expect("send");
    store.clock.advance(TimeDelta::minutes(30));

    let edited = rt
        .block_on(store.messages.edit(sent.id(), "second"))
        .expect("edit");

    assert_eq!(edited.sent_at(), sent.sent_at());
    assert_eq!(edited.body().as_str(), "second");
}

#[rstest]
fn users_are_listed_in_creation_order(runtime: io::Result<Runtime>, store: Store) {
    let rt = runtime.expect("runtime creation");
    let first = register(&rt, &store, "first@example.com");
    store.clock.advance(TimeDelta::seconds(1));
    let second = register(&rt, &store, "second@example.com");

    let listed = rt.block_on(store.users.list_all()).expect("list");

    assert_eq!(listed, vec![first, second]);
}
