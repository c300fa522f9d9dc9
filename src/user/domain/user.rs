//! User account aggregate root.

use super::{EmailAddress, PasswordHash, PersonName, PhoneNumber, UserId, UserRole};
use chrono::{DateTime, SubsecRound, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// User account aggregate root.
///
/// The identifier and creation timestamp are assigned once by
/// [`User::new`]; every mutator leaves them untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    first_name: PersonName,
    last_name: PersonName,
    email: EmailAddress,
    password_hash: PasswordHash,
    phone_number: Option<PhoneNumber>,
    role: UserRole,
    created_at: DateTime<Utc>,
}

/// Validated fields for a user that has not been created yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUserData {
    first_name: PersonName,
    last_name: PersonName,
    email: EmailAddress,
    password_hash: PasswordHash,
    phone_number: Option<PhoneNumber>,
    role: UserRole,
}

impl NewUserData {
    /// Creates account data with the required fields, no phone number, and
    /// the [`UserRole::Guest`] role.
    #[must_use]
    pub fn new(
        first_name: PersonName,
        last_name: PersonName,
        email: EmailAddress,
        password_hash: PasswordHash,
    ) -> Self {
        Self {
            first_name,
            last_name,
            email,
            password_hash,
            phone_number: None,
            role: UserRole::default(),
        }
    }

    /// Sets the phone number.
    #[must_use]
    pub fn with_phone_number(mut self, phone_number: PhoneNumber) -> Self {
        self.phone_number = Some(phone_number);
        self
    }

    /// Sets the role.
    #[must_use]
    pub const fn with_role(mut self, role: UserRole) -> Self {
        self.role = role;
        self
    }
}

/// Parameter object for reconstructing a persisted user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedUserData {
    /// Persisted user identifier.
    pub id: UserId,
    /// Persisted first name.
    pub first_name: PersonName,
    /// Persisted last name.
    pub last_name: PersonName,
    /// Persisted email address.
    pub email: EmailAddress,
    /// Persisted password digest.
    pub password_hash: PasswordHash,
    /// Persisted phone number.
    pub phone_number: Option<PhoneNumber>,
    /// Persisted role.
    pub role: UserRole,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user with a fresh identifier stamped at the current
    /// clock time.
    #[must_use]
    pub fn new(data: NewUserData, clock: &impl Clock) -> Self {
        let NewUserData {
            first_name,
            last_name,
            email,
            password_hash,
            phone_number,
            role,
        } = data;
        Self {
            id: UserId::new(),
            first_name,
            last_name,
            email,
            password_hash,
            phone_number,
            role,
            // `TIMESTAMPTZ` keeps microseconds.
            created_at: clock.utc().trunc_subsecs(6),
        }
    }

    /// Reconstructs a user from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedUserData) -> Self {
        Self {
            id: data.id,
            first_name: data.first_name,
            last_name: data.last_name,
            email: data.email,
            password_hash: data.password_hash,
            phone_number: data.phone_number,
            role: data.role,
            created_at: data.created_at,
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the first name.
    #[must_use]
    pub const fn first_name(&self) -> &PersonName {
        &self.first_name
    }

    /// Returns the last name.
    #[must_use]
    pub const fn last_name(&self) -> &PersonName {
        &self.last_name
    }

    /// Returns the email address.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the stored password digest.
    #[must_use]
    pub const fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    /// Returns the phone number, if any.
    #[must_use]
    pub const fn phone_number(&self) -> Option<&PhoneNumber> {
        self.phone_number.as_ref()
    }

    /// Returns the account role.
    #[must_use]
    pub const fn role(&self) -> UserRole {
        self.role
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns `"first last"`.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Replaces both names.
    pub fn rename(&mut self, first_name: PersonName, last_name: PersonName) {
        self.first_name = first_name;
        self.last_name = last_name;
    }

    /// Replaces the email address. Uniqueness is checked on persistence.
    pub fn change_email(&mut self, email: EmailAddress) {
        self.email = email;
    }

    /// Replaces the password digest.
    pub fn change_password_hash(&mut self, password_hash: PasswordHash) {
        self.password_hash = password_hash;
    }

    /// Sets or clears the phone number.
    pub fn set_phone_number(&mut self, phone_number: Option<PhoneNumber>) {
        self.phone_number = phone_number;
    }

    /// Changes the account role.
    pub const fn change_role(&mut self, role: UserRole) {
        self.role = role;
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} <{}>", self.first_name, self.last_name, self.email)
    }
}
