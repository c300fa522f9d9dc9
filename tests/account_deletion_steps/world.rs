//! Shared world state for account deletion BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use chats::conversation::{
    adapters::memory::{InMemoryConversationRepository, InMemoryParticipantRepository},
    domain::ConversationId,
    services::ConversationService,
};
use chats::message::{
    adapters::memory::InMemoryMessageRepository,
    domain::Message,
    services::{MessageService, MessageServiceError},
};
use chats::persistence::InMemoryDatabase;
use chats::user::{
    adapters::memory::InMemoryUserRepository,
    domain::User,
    ports::UserDeletionSummary,
    services::{RegisterUserRequest, UserService, UserServiceError},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Conversation service type used by the BDD world.
pub type TestConversationService =
    ConversationService<InMemoryConversationRepository, InMemoryParticipantRepository, DefaultClock>;

/// Scenario world for account deletion behaviour tests.
pub struct AccountWorld {
    /// User service under test.
    pub users: UserService<InMemoryUserRepository, DefaultClock>,
    /// Message service sharing the user store.
    pub messages: MessageService<InMemoryMessageRepository, DefaultClock>,
    /// Conversation service sharing the user store.
    pub conversations: TestConversationService,
    /// Users registered by the scenario, keyed by email.
    pub registered: HashMap<String, User>,
    /// Conversation started by the scenario.
    pub conversation: Option<ConversationId>,
    /// Summary of the last successful deletion.
    pub last_deletion: Option<UserDeletionSummary>,
    /// Result of the last registration attempt.
    pub last_register_result: Option<Result<User, UserServiceError>>,
    /// Result of the last send attempt.
    pub last_send_result: Option<Result<Message, MessageServiceError>>,
}

impl AccountWorld {
    /// Creates a world over an empty shared store.
    #[must_use]
    pub fn new() -> Self {
        let database = InMemoryDatabase::new();
        let clock = Arc::new(DefaultClock);
        Self {
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
                clock,
            ),
            registered: HashMap::new(),
            conversation: None,
            last_deletion: None,
            last_register_result: None,
            last_send_result: None,
        }
    }

    /// Returns a user registered earlier in the scenario.
    ///
    /// # Errors
    ///
    /// Returns an error when no user with that email was registered.
    pub fn user(&self, email: &str) -> Result<&User, eyre::Report> {
        self.registered
            .get(email)
            .ok_or_else(|| eyre::eyre!("no registered user '{email}' in scenario world"))
    }
}

impl Default for AccountWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> AccountWorld {
    AccountWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Builds a registration request whose names derive from the email.
pub fn build_request(email: &str) -> RegisterUserRequest {
    let local = email.split('@').next().unwrap_or(email);
    RegisterUserRequest::new(local, "Scenario", email, format!("digest-{local}"))
}
