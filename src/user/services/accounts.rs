//! Service layer for user accounts.
//!
//! Provides [`UserService`] which validates raw input into domain values,
//! stamps new accounts with the injected clock, and delegates persistence
//! to a [`UserRepository`].

use crate::constraint::ConstraintViolation;
use crate::user::{
    domain::{
        EmailAddress, NewUserData, PasswordHash, PersonName, PhoneNumber, User, UserDomainError,
        UserId, UserRole,
    },
    ports::{UserDeletionSummary, UserRepository, UserRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Request payload for registering a new user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterUserRequest {
    first_name: String,
    last_name: String,
    email: String,
    password_hash: String,
    phone_number: Option<String>,
    role: Option<UserRole>,
}

impl RegisterUserRequest {
    /// Creates a request with the required account fields.
    #[must_use]
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            phone_number: None,
            role: None,
        }
    }

    /// Sets the phone number.
    #[must_use]
    pub fn with_phone_number(mut self, phone_number: impl Into<String>) -> Self {
        self.phone_number = Some(phone_number.into());
        self
    }

    /// Sets an explicit role instead of the guest default.
    #[must_use]
    pub const fn with_role(mut self, role: UserRole) -> Self {
        self.role = Some(role);
        self
    }
}

/// Partial update of the mutable account fields.
///
/// Fields left unset keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateUserRequest {
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    password_hash: Option<String>,
    phone_number: Option<Option<String>>,
    role: Option<UserRole>,
}

impl UpdateUserRequest {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the first name.
    #[must_use]
    pub fn with_first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    /// Replaces the last name.
    #[must_use]
    pub fn with_last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }

    /// Replaces the email address.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Replaces the password digest.
    #[must_use]
    pub fn with_password_hash(mut self, password_hash: impl Into<String>) -> Self {
        self.password_hash = Some(password_hash.into());
        self
    }

    /// Sets the phone number.
    #[must_use]
    pub fn with_phone_number(mut self, phone_number: impl Into<String>) -> Self {
        self.phone_number = Some(Some(phone_number.into()));
        self
    }

    /// Clears the phone number.
    #[must_use]
    pub fn without_phone_number(mut self) -> Self {
        self.phone_number = Some(None);
        self
    }

    /// Changes the role.
    #[must_use]
    pub const fn with_role(mut self, role: UserRole) -> Self {
        self.role = Some(role);
        self
    }
}

/// Service-level errors for user operations.
#[derive(Debug, Error)]
pub enum UserServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] UserDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] UserRepositoryError),
}

impl UserServiceError {
    /// Returns the storage constraint that rejected the write, if any.
    #[must_use]
    pub const fn constraint_violation(&self) -> Option<ConstraintViolation> {
        match self {
            Self::Domain(_) => None,
            Self::Repository(err) => err.constraint_violation(),
        }
    }
}

/// Result type for user service operations.
pub type UserServiceResult<T> = Result<T, UserServiceError>;

/// User account orchestration service.
#[derive(Clone)]
pub struct UserService<R, C>
where
    R: UserRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> UserService<R, C>
where
    R: UserRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new user service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Registers a new user. The role defaults to guest.
    ///
    /// # Errors
    ///
    /// Returns [`UserServiceError::Domain`] when a field fails validation or
    /// [`UserServiceError::Repository`] when the email is taken or
    /// persistence fails.
    pub async fn register(&self, request: RegisterUserRequest) -> UserServiceResult<User> {
        let RegisterUserRequest {
            first_name,
            last_name,
            email,
            password_hash,
            phone_number,
            role,
        } = request;

        let mut data = NewUserData::new(
            PersonName::new(first_name)?,
            PersonName::new(last_name)?,
            EmailAddress::new(email)?,
            PasswordHash::new(password_hash)?,
        );
        if let Some(phone) = phone_number {
            data = data.with_phone_number(PhoneNumber::new(phone)?);
        }
        if let Some(explicit_role) = role {
            data = data.with_role(explicit_role);
        }

        let user = User::new(data, &*self.clock);
        self.repository.create(&user).await?;
        info!(user_id = %user.id(), role = %user.role(), "registered user");
        Ok(user)
    }

    /// Finds a user by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`UserServiceError::Repository`] when persistence lookup
    /// fails.
    pub async fn find_by_id(&self, id: UserId) -> UserServiceResult<Option<User>> {
        debug!(user_id = %id, "looking up user");
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Finds a user by email address.
    ///
    /// # Errors
    ///
    /// Returns [`UserServiceError::Domain`] when the email string fails
    /// validation, or [`UserServiceError::Repository`] when persistence
    /// lookup fails.
    pub async fn find_by_email(&self, email: &str) -> UserServiceResult<Option<User>> {
        let address = EmailAddress::new(email)?;
        Ok(self.repository.find_by_email(&address).await?)
    }

    /// Returns every user, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`UserServiceError::Repository`] when persistence lookup
    /// fails.
    pub async fn list_all(&self) -> UserServiceResult<Vec<User>> {
        Ok(self.repository.list_all().await?)
    }

    /// Applies a partial update to the mutable fields of a user.
    ///
    /// # Errors
    ///
    /// Returns [`UserServiceError::Domain`] when a new value fails
    /// validation, or [`UserServiceError::Repository`] when the user is
    /// missing, the new email is taken, or persistence fails.
    pub async fn update_profile(
        &self,
        id: UserId,
        request: UpdateUserRequest,
    ) -> UserServiceResult<User> {
        let mut user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(UserRepositoryError::NotFound(id))?;

        let UpdateUserRequest {
            first_name,
            last_name,
            email,
            password_hash,
            phone_number,
            role,
        } = request;

        if first_name.is_some() || last_name.is_some() {
            let first = match first_name {
                Some(value) => PersonName::new(value)?,
                None => user.first_name().clone(),
            };
            let last = match last_name {
                Some(value) => PersonName::new(value)?,
                None => user.last_name().clone(),
            };
            user.rename(first, last);
        }
        if let Some(value) = email {
            user.change_email(EmailAddress::new(value)?);
        }
        if let Some(value) = password_hash {
            user.change_password_hash(PasswordHash::new(value)?);
        }
        if let Some(value) = phone_number {
            user.set_phone_number(value.map(PhoneNumber::new).transpose()?);
        }
        if let Some(value) = role {
            user.change_role(value);
        }

        self.repository.update(&user).await?;
        info!(user_id = %id, "updated user profile");
        Ok(user)
    }

    /// Deletes a user along with its messages and memberships.
    ///
    /// # Errors
    ///
    /// Returns [`UserServiceError::Repository`] when the user is missing or
    /// persistence fails.
    pub async fn delete(&self, id: UserId) -> UserServiceResult<UserDeletionSummary> {
        let summary = self.repository.delete(id).await?;
        info!(
            user_id = %id,
            messages_deleted = summary.messages_deleted,
            memberships_removed = summary.memberships_removed,
            "deleted user"
        );
        Ok(summary)
    }
}
