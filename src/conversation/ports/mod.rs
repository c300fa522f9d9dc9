//! Port contracts for conversations and their participant sets.
//!
//! Conversation records and membership join records have separate
//! repositories sharing one error type.

pub mod participants;
pub mod repository;

pub use participants::ParticipantRepository;
pub use repository::{
    ConversationRepository, ConversationRepositoryError, ConversationRepositoryResult,
};
