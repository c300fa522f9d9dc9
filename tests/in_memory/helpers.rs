//! Shared test helpers for in-memory integration tests.

use crate::test_helpers::SteppingClock;
use chats::conversation::{
    adapters::memory::{InMemoryConversationRepository, InMemoryParticipantRepository},
    services::ConversationService,
};
use chats::message::{adapters::memory::InMemoryMessageRepository, services::MessageService};
use chats::persistence::InMemoryDatabase;
use chats::user::{
    adapters::memory::InMemoryUserRepository,
    domain::User,
    services::{RegisterUserRequest, UserService},
};
use rstest::fixture;
use std::io;
use std::sync::Arc;
use tokio::runtime::Runtime;

/// Services wired over one shared in-memory store.
pub struct Store {
    pub clock: Arc<SteppingClock>,
    pub users: UserService<InMemoryUserRepository, SteppingClock>,
    pub messages: MessageService<InMemoryMessageRepository, SteppingClock>,
    pub conversations: ConversationService<
        InMemoryConversationRepository,
        InMemoryParticipantRepository,
        SteppingClock,
    >,
}

/// Provides a tokio runtime for async operations in tests.
///
/// # Errors
///
/// Returns an error if the runtime cannot be created.
#[fixture]
pub fn runtime() -> io::Result<Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}

/// Provides services over a fresh store for each test.
#[fixture]
pub fn store() -> Store {
    let database = InMemoryDatabase::new();
    let clock = Arc::new(SteppingClock::new());
    Store {
        users: UserService::new(
            Arc::new(InMemoryUserRepository::with_database(database.clone())),
            Arc::clone(&clock),
        ),
        messages: MessageService::new(
            Arc::new(InMemoryMessageRepository::with_database(database.clone())),
            Arc::clone(&clock),
        ),
        conversations: ConversationService::new(
            Arc::new(InMemoryConversationRepository::with_database(
                database.clone(),
            )),
            Arc::new(InMemoryParticipantRepository::with_database(database)),
            Arc::clone(&clock),
        ),
        clock,
    }
}

/// Builds a registration request whose names derive from the email.
#[must_use]
pub fn request_for(email: &str) -> RegisterUserRequest {
    let local = email.split('@').next().unwrap_or(email);
    RegisterUserRequest::new(local, "Tester", email, format!("digest-{local}"))
}

/// Registers a user with the given email.
///
/// # Panics
///
/// Panics when registration fails.
pub fn register(rt: &Runtime, store: &Store, email: &str) -> User {
    rt.block_on(store.users.register(request_for(email)))
        .expect("registration should succeed")
}
