//! Domain model for user accounts.
//!
//! Field types mirror the storage column limits; beyond non-empty and
//! length checks no format validation is applied; email addresses, phone
//! numbers and password hashes are treated as opaque text.

mod error;
mod fields;
mod ids;
mod role;
mod user;

pub use error::{ParseUserRoleError, UserDomainError};
pub use fields::{EmailAddress, PasswordHash, PersonName, PhoneNumber};
pub use ids::UserId;
pub use role::UserRole;
pub use user::{NewUserData, PersistedUserData, User};
