//! `PostgreSQL` connection pooling and blocking-call helpers.

use crate::config::DatabaseConfig;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;
use tokio::task::JoinError;

/// `PostgreSQL` connection pool shared by every entity adapter.
pub type ChatPgPool = Pool<ConnectionManager<PgConnection>>;

/// Builds a connection pool from configuration.
///
/// # Errors
///
/// Returns [`PoolError`] when the initial connections cannot be opened.
pub fn build_pool(config: &DatabaseConfig) -> Result<ChatPgPool, PoolError> {
    let manager = ConnectionManager::<PgConnection>::new(config.database_url.as_str());
    Pool::builder()
        .max_size(config.max_connections)
        .connection_timeout(config.connection_timeout())
        .build(manager)
}

/// Failure to reach the backing store before any query runs.
#[derive(Debug, Error)]
pub enum StoreAccessError {
    /// No pooled connection became available.
    #[error("connection pool error: {0}")]
    Pool(#[from] PoolError),

    /// The blocking task panicked or was cancelled.
    #[error("blocking task failed: {0}")]
    Join(#[from] JoinError),

    /// The in-memory store lock was poisoned by a panicking writer.
    #[error("in-memory store lock poisoned: {0}")]
    Poisoned(String),
}

/// Runs `f` with a pooled connection on the blocking thread pool.
pub(crate) async fn with_connection<F, T, E>(pool: &ChatPgPool, f: F) -> Result<T, E>
where
    F: FnOnce(&mut PgConnection) -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: From<StoreAccessError> + Send + 'static,
{
    let pool = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut connection = pool
            .get()
            .map_err(|err| E::from(StoreAccessError::Pool(err)))?;
        f(&mut connection)
    })
    .await
    .map_err(|err| E::from(StoreAccessError::Join(err)))?
}

/// Named constraint that rejected a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConstraintFailure<'a> {
    /// A unique index or primary key rejected the row.
    Unique(&'a str),
    /// A foreign key rejected the row.
    ForeignKey(&'a str),
}

/// Extracts the violated constraint from a Diesel error, if any.
pub(crate) fn constraint_failure(err: &DieselError) -> Option<ConstraintFailure<'_>> {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            info.constraint_name().map(ConstraintFailure::Unique)
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
            info.constraint_name().map(ConstraintFailure::ForeignKey)
        }
        _ => None,
    }
}
