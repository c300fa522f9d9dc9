//! In-memory user repository.

use async_trait::async_trait;

use crate::persistence::InMemoryDatabase;
use crate::user::{
    domain::{EmailAddress, User, UserId},
    ports::{UserDeletionSummary, UserRepository, UserRepositoryError, UserRepositoryResult},
};

/// Thread-safe in-memory user repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    database: InMemoryDatabase,
}

impl InMemoryUserRepository {
    /// Creates a repository over its own empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository over a store shared with other adapters.
    #[must_use]
    pub const fn with_database(database: InMemoryDatabase) -> Self {
        Self { database }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &User) -> UserRepositoryResult<()> {
        let mut tables = self.database.write::<UserRepositoryError>()?;

        if tables.users.contains_key(&user.id()) {
            return Err(UserRepositoryError::DuplicateUser(user.id()));
        }

        if tables.email_index.contains_key(user.email()) {
            return Err(UserRepositoryError::DuplicateEmail(user.email().clone()));
        }

        tables.email_index.insert(user.email().clone(), user.id());
        tables.users.insert(user.id(), user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> UserRepositoryResult<()> {
        let mut tables = self.database.write::<UserRepositoryError>()?;

        let old_email = tables
            .users
            .get(&user.id())
            .ok_or(UserRepositoryError::NotFound(user.id()))?
            .email()
            .clone();

        if *user.email() != old_email {
            if let Some(&owner) = tables.email_index.get(user.email())
                && owner != user.id()
            {
                return Err(UserRepositoryError::DuplicateEmail(user.email().clone()));
            }
            tables.email_index.remove(&old_email);
            tables.email_index.insert(user.email().clone(), user.id());
        }

        // Copy the non-key fields only; the stored creation time stays.
        let stored = tables
            .users
            .get_mut(&user.id())
            .ok_or(UserRepositoryError::NotFound(user.id()))?;
        stored.rename(user.first_name().clone(), user.last_name().clone());
        stored.change_email(user.email().clone());
        stored.change_password_hash(user.password_hash().clone());
        stored.set_phone_number(user.phone_number().cloned());
        stored.change_role(user.role());
        Ok(())
    }

    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>> {
        let tables = self.database.read::<UserRepositoryError>()?;
        Ok(tables.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> UserRepositoryResult<Option<User>> {
        let tables = self.database.read::<UserRepositoryError>()?;
        let user = tables
            .email_index
            .get(email)
            .and_then(|id| tables.users.get(id))
            .cloned();
        Ok(user)
    }

    async fn list_all(&self) -> UserRepositoryResult<Vec<User>> {
        let tables = self.database.read::<UserRepositoryError>()?;
        let mut users: Vec<User> = tables.users.values().cloned().collect();
        users.sort_by_key(|user| (user.created_at(), user.id()));
        Ok(users)
    }

    async fn delete(&self, id: UserId) -> UserRepositoryResult<UserDeletionSummary> {
        let mut tables = self.database.write::<UserRepositoryError>()?;
        let counts = tables
            .delete_user_cascade(id)
            .ok_or(UserRepositoryError::NotFound(id))?;
        Ok(UserDeletionSummary {
            messages_deleted: counts.messages,
            memberships_removed: counts.memberships,
        })
    }
}
