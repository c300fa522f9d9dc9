//! `PostgreSQL` adapters for conversations and memberships.

mod models;
mod repository;

pub use repository::{PostgresConversationRepository, PostgresParticipantRepository};
