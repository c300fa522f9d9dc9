//! Domain model for messages.

mod body;
mod error;
mod ids;
mod message;

pub use body::MessageBody;
pub use error::MessageDomainError;
pub use ids::MessageId;
pub use message::{Message, PersistedMessageData};
