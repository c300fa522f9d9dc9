//! `PostgreSQL` repository implementation for user accounts.

use super::models::{NewUserRow, UserChangeset, UserRow};
use crate::persistence::schema::{
    USERS_EMAIL_INDEX, USERS_PKEY, conversations_participants, messages, users,
};
use crate::persistence::{ChatPgPool, ConstraintFailure, constraint_failure, with_connection};
use crate::user::{
    domain::{
        EmailAddress, PasswordHash, PersistedUserData, PersonName, PhoneNumber, User, UserId,
        UserRole,
    },
    ports::{UserDeletionSummary, UserRepository, UserRepositoryError, UserRepositoryResult},
};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use tracing::debug;

/// `PostgreSQL`-backed user repository.
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: ChatPgPool,
}

impl PostgresUserRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: ChatPgPool) -> Self {
        Self { pool }
    }
}

impl From<DieselError> for UserRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: &User) -> UserRepositoryResult<()> {
        let user_id = user.id();
        let email = user.email().clone();
        let new_row = to_new_row(user);

        with_connection(&self.pool, move |connection| {
            diesel::insert_into(users::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| map_write_error(err, user_id, &email))?;
            Ok(())
        })
        .await
    }

    async fn update(&self, user: &User) -> UserRepositoryResult<()> {
        let user_id = user.id();
        let email = user.email().clone();
        let changes = to_changeset(user);

        with_connection(&self.pool, move |connection| {
            let updated = diesel::update(users::table.find(user_id.into_inner()))
                .set(&changes)
                .execute(connection)
                .map_err(|err| map_write_error(err, user_id, &email))?;

            if updated == 0 {
                return Err(UserRepositoryError::NotFound(user_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>> {
        with_connection(&self.pool, move |connection| {
            let row = users::table
                .find(id.into_inner())
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn find_by_email(&self, email: &EmailAddress) -> UserRepositoryResult<Option<User>> {
        let email_str = email.as_str().to_owned();
        with_connection(&self.pool, move |connection| {
            let row = users::table
                .filter(users::email.eq(&email_str))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn list_all(&self) -> UserRepositoryResult<Vec<User>> {
        with_connection(&self.pool, move |connection| {
            let rows = users::table
                .order((users::created_at.asc(), users::user_id.asc()))
                .select(UserRow::as_select())
                .load::<UserRow>(connection)?;
            rows.into_iter().map(row_to_user).collect()
        })
        .await
    }

    async fn delete(&self, id: UserId) -> UserRepositoryResult<UserDeletionSummary> {
        let uuid = id.into_inner();
        with_connection(&self.pool, move |connection| {
            connection.transaction::<_, UserRepositoryError, _>(|tx| {
                let messages_deleted =
                    diesel::delete(messages::table.filter(messages::sender_id.eq(uuid)))
                        .execute(tx)?;
                let memberships_removed = diesel::delete(
                    conversations_participants::table
                        .filter(conversations_participants::user_id.eq(uuid)),
                )
                .execute(tx)?;
                let removed = diesel::delete(users::table.find(uuid)).execute(tx)?;

                if removed == 0 {
                    return Err(UserRepositoryError::NotFound(id));
                }

                debug!(
                    user_id = %id,
                    messages_deleted,
                    memberships_removed,
                    "cascaded user deletion"
                );
                Ok(UserDeletionSummary {
                    messages_deleted,
                    memberships_removed,
                })
            })
        })
        .await
    }
}

fn to_new_row(user: &User) -> NewUserRow {
    NewUserRow {
        user_id: user.id().into_inner(),
        first_name: user.first_name().as_str().to_owned(),
        last_name: user.last_name().as_str().to_owned(),
        email: user.email().as_str().to_owned(),
        password_hash: user.password_hash().as_str().to_owned(),
        phone_number: user.phone_number().map(|phone| phone.as_str().to_owned()),
        role: user.role().as_str().to_owned(),
        created_at: user.created_at(),
    }
}

fn to_changeset(user: &User) -> UserChangeset {
    UserChangeset {
        first_name: user.first_name().as_str().to_owned(),
        last_name: user.last_name().as_str().to_owned(),
        email: user.email().as_str().to_owned(),
        password_hash: user.password_hash().as_str().to_owned(),
        phone_number: user.phone_number().map(|phone| phone.as_str().to_owned()),
        role: user.role().as_str().to_owned(),
    }
}

fn row_to_user(row: UserRow) -> UserRepositoryResult<User> {
    let UserRow {
        user_id,
        first_name,
        last_name,
        email,
        password_hash,
        phone_number,
        role,
        created_at,
    } = row;

    let data = PersistedUserData {
        id: UserId::from_uuid(user_id),
        first_name: PersonName::new(first_name)
            .map_err(UserRepositoryError::invalid_persisted_data)?,
        last_name: PersonName::new(last_name)
            .map_err(UserRepositoryError::invalid_persisted_data)?,
        email: EmailAddress::new(email).map_err(UserRepositoryError::invalid_persisted_data)?,
        password_hash: PasswordHash::new(password_hash)
            .map_err(UserRepositoryError::invalid_persisted_data)?,
        phone_number: phone_number
            .map(PhoneNumber::new)
            .transpose()
            .map_err(UserRepositoryError::invalid_persisted_data)?,
        role: UserRole::try_from(role.as_str())
            .map_err(UserRepositoryError::invalid_persisted_data)?,
        created_at,
    };
    Ok(User::from_persisted(data))
}

fn map_write_error(err: DieselError, user_id: UserId, email: &EmailAddress) -> UserRepositoryError {
    match constraint_failure(&err) {
        Some(ConstraintFailure::Unique(USERS_EMAIL_INDEX)) => {
            UserRepositoryError::DuplicateEmail(email.clone())
        }
        Some(ConstraintFailure::Unique(USERS_PKEY)) => UserRepositoryError::DuplicateUser(user_id),
        _ => UserRepositoryError::persistence(err),
    }
}
