//! Error types for message domain validation.

use thiserror::Error;

/// Errors returned while constructing message domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MessageDomainError {
    /// The message body is empty or whitespace-only.
    #[error("message body must not be empty")]
    EmptyBody,
}
