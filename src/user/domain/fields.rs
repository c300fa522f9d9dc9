//! Validated text fields for user accounts.

use super::UserDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Column limit for first and last names, matching `VARCHAR(150)`.
pub(crate) const MAX_NAME_LENGTH: usize = 150;
/// Column limit for email addresses, matching `VARCHAR(254)`.
pub(crate) const MAX_EMAIL_LENGTH: usize = 254;
/// Column limit for password hashes, matching `VARCHAR(255)`.
pub(crate) const MAX_PASSWORD_HASH_LENGTH: usize = 255;
/// Column limit for phone numbers, matching `VARCHAR(30)`.
pub(crate) const MAX_PHONE_NUMBER_LENGTH: usize = 30;

/// Checks a required text value against its column limit.
///
/// The value is stored as given; only emptiness is judged after trimming.
fn required_text(
    value: String,
    field: &'static str,
    max: usize,
) -> Result<String, UserDomainError> {
    if value.trim().is_empty() {
        return Err(UserDomainError::EmptyField { field });
    }

    let actual = value.chars().count();
    if actual > max {
        return Err(UserDomainError::FieldTooLong { field, max, actual });
    }

    Ok(value)
}

/// First or last name of a user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonName(String);

impl PersonName {
    /// Creates a validated name.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::EmptyField`] for blank input or
    /// [`UserDomainError::FieldTooLong`] above 150 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, UserDomainError> {
        required_text(value.into(), "name", MAX_NAME_LENGTH).map(Self)
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Email address, unique across all users.
///
/// Compared exactly as stored; no case folding is applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a validated email address.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::EmptyField`] for blank input or
    /// [`UserDomainError::FieldTooLong`] above 254 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, UserDomainError> {
        required_text(value.into(), "email", MAX_EMAIL_LENGTH).map(Self)
    }

    /// Returns the address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Precomputed credential digest. Never hashed or inspected here.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wraps a precomputed password digest.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::EmptyField`] for blank input or
    /// [`UserDomainError::FieldTooLong`] above 255 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, UserDomainError> {
        required_text(value.into(), "password_hash", MAX_PASSWORD_HASH_LENGTH).map(Self)
    }

    /// Returns the digest as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// Optional contact phone number, stored as free text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Creates a phone number.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::EmptyField`] for blank input or
    /// [`UserDomainError::FieldTooLong`] above 30 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, UserDomainError> {
        required_text(value.into(), "phone_number", MAX_PHONE_NUMBER_LENGTH).map(Self)
    }

    /// Returns the phone number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
