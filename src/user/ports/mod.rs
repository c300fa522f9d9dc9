//! Port contracts for user account persistence.

pub mod repository;

pub use repository::{UserDeletionSummary, UserRepository, UserRepositoryError, UserRepositoryResult};

#[cfg(test)]
pub use repository::MockUserRepository;
