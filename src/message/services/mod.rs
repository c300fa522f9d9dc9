//! Application services for messages.

mod messaging;

pub use messaging::{MessageService, MessageServiceError, MessageServiceResult};
