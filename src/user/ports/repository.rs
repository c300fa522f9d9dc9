//! Repository port for user account persistence.

use crate::constraint::ConstraintViolation;
use crate::persistence::StoreAccessError;
use crate::user::domain::{EmailAddress, User, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for user repository operations.
pub type UserRepositoryResult<T> = Result<T, UserRepositoryError>;

/// Rows removed alongside a deleted user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserDeletionSummary {
    /// Messages the user had sent.
    pub messages_deleted: usize,
    /// Conversation memberships the user held.
    pub memberships_removed: usize,
}

/// User persistence contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Stores a new user.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::DuplicateEmail`] when another user has
    /// the same email or [`UserRepositoryError::DuplicateUser`] when the
    /// identifier already exists.
    async fn create(&self, user: &User) -> UserRepositoryResult<()>;

    /// Persists changes to the non-key fields of an existing user.
    ///
    /// The creation timestamp is never written.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::NotFound`] when the user does not exist
    /// or [`UserRepositoryError::DuplicateEmail`] when the new email belongs
    /// to another user.
    async fn update(&self, user: &User) -> UserRepositoryResult<()>;

    /// Finds a user by identifier.
    ///
    /// Returns `None` when the user does not exist.
    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>>;

    /// Finds a user by email address.
    ///
    /// Returns `None` when no user has the given email.
    async fn find_by_email(&self, email: &EmailAddress) -> UserRepositoryResult<Option<User>>;

    /// Returns every user, oldest first.
    async fn list_all(&self) -> UserRepositoryResult<Vec<User>>;

    /// Deletes a user together with the messages it sent and its
    /// conversation memberships, atomically.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::NotFound`] when the user does not
    /// exist; nothing is removed in that case.
    async fn delete(&self, id: UserId) -> UserRepositoryResult<UserDeletionSummary>;
}

/// Errors returned by user repository implementations.
#[derive(Debug, Clone, Error)]
pub enum UserRepositoryError {
    /// A user with the same identifier already exists.
    #[error("duplicate user identifier: {0}")]
    DuplicateUser(UserId),

    /// Another user already uses this email address.
    #[error("duplicate email address: {0}")]
    DuplicateEmail(EmailAddress),

    /// The user was not found.
    #[error("user not found: {0}")]
    NotFound(UserId),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl UserRepositoryError {
    /// Wraps a data-quality error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Returns the storage constraint that rejected the write, if any.
    #[must_use]
    pub const fn constraint_violation(&self) -> Option<ConstraintViolation> {
        match self {
            Self::DuplicateUser(_) | Self::DuplicateEmail(_) => {
                Some(ConstraintViolation::Uniqueness)
            }
            Self::NotFound(_) | Self::InvalidPersistedData(_) | Self::Persistence(_) => None,
        }
    }
}

impl From<StoreAccessError> for UserRepositoryError {
    fn from(err: StoreAccessError) -> Self {
        Self::persistence(err)
    }
}
