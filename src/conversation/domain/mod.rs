//! Domain model for conversations and memberships.

mod conversation;
mod ids;
mod participant;

pub use conversation::{Conversation, ConversationWithParticipants};
pub use ids::ConversationId;
pub use participant::Participant;
