//! Error types for user domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing user domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserDomainError {
    /// A required field is empty after trimming.
    #[error("{field} must not be empty")]
    EmptyField {
        /// Name of the rejected field.
        field: &'static str,
    },

    /// A field exceeds its storage column limit.
    #[error("{field} exceeds {max} character limit ({actual} characters)")]
    FieldTooLong {
        /// Name of the rejected field.
        field: &'static str,
        /// Column limit in characters.
        max: usize,
        /// Length of the rejected value in characters.
        actual: usize,
    },
}

/// Error returned while parsing a user role from persistence or input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown user role: {0}")]
pub struct ParseUserRoleError(pub String);
