//! Message body text.

use super::MessageDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Message text of arbitrary length.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageBody(String);

impl MessageBody {
    /// Creates a message body. The text is stored as given.
    ///
    /// # Errors
    ///
    /// Returns [`MessageDomainError::EmptyBody`] when the text is empty after
    /// trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, MessageDomainError> {
        let text = value.into();
        if text.trim().is_empty() {
            return Err(MessageDomainError::EmptyBody);
        }
        Ok(Self(text))
    }

    /// Returns the body as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for MessageBody {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for MessageBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
