//! Application services for conversations and memberships.

mod membership;

pub use crate::conversation::domain::ConversationWithParticipants;
pub use membership::ConversationService;
