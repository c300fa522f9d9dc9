//! Shared test helpers for `PostgreSQL` integration tests.

pub use super::cluster::{PostgresCluster, postgres_cluster};
use crate::test_helpers::SteppingClock;
use chats::config::DatabaseConfig;
use chats::conversation::{
    adapters::postgres::{PostgresConversationRepository, PostgresParticipantRepository},
    services::ConversationService,
};
use chats::message::{adapters::postgres::PostgresMessageRepository, services::MessageService};
use chats::persistence::{ChatPgPool, build_pool, run_migrations};
use chats::user::{
    adapters::postgres::PostgresUserRepository,
    domain::User,
    services::{RegisterUserRequest, UserService},
};
use diesel::prelude::*;
use eyre::{Result, WrapErr};
use rstest::fixture;
use std::sync::Arc;
use tokio::runtime::Runtime;
use uuid::Uuid;

/// Template database name for the pre-migrated schema.
pub const TEMPLATE_DB: &str = "chats_test_template";

/// Ensures the template database exists with every migration applied.
///
/// # Errors
///
/// Returns an error if template creation or migration fails.
pub fn ensure_template(cluster: PostgresCluster) -> Result<()> {
    cluster.ensure_migrated_template(TEMPLATE_DB, |url| {
        let mut conn = PgConnection::establish(url).wrap_err("connecting to template")?;
        run_migrations(&mut conn).wrap_err("migrating template")?;
        Ok(())
    })
}

/// Database copied from the template and dropped with the guard.
pub struct TestDatabase {
    cluster: PostgresCluster,
    name: String,
}

impl TestDatabase {
    /// Creates a fresh database from the migrated template.
    ///
    /// # Errors
    ///
    /// Returns an error if the template or the copy cannot be created.
    pub fn create(cluster: PostgresCluster) -> Result<Self> {
        ensure_template(cluster)?;
        let name = format!("test_{}", Uuid::new_v4().simple());
        cluster.clone_database(&name, TEMPLATE_DB)?;
        Ok(Self { cluster, name })
    }

    /// Returns the connection URL of this database.
    #[must_use]
    pub fn url(&self) -> String {
        self.cluster.url_for(&self.name)
    }
}

impl Drop for TestDatabase {
    fn drop(&mut self) {
        drop(self.cluster.drop_database(&self.name));
    }
}

/// Services wired over a fresh `PostgreSQL` database.
///
/// Fields drop in declaration order, so pools close before the database is
/// dropped.
pub struct PgStore {
    pub users: UserService<PostgresUserRepository, SteppingClock>,
    pub messages: MessageService<PostgresMessageRepository, SteppingClock>,
    pub conversations: ConversationService<
        PostgresConversationRepository,
        PostgresParticipantRepository,
        SteppingClock,
    >,
    pub pool: ChatPgPool,
    pub clock: Arc<SteppingClock>,
    pub rt: Runtime,
    pub database: TestDatabase,
}

impl PgStore {
    fn new(cluster: PostgresCluster) -> Result<Self> {
        let database = TestDatabase::create(cluster)?;
        let config = DatabaseConfig {
            database_url: database.url(),
            max_connections: 2,
            connection_timeout_secs: 10,
        };
        let pool = build_pool(&config).wrap_err("building pool")?;
        let clock = Arc::new(SteppingClock::new());
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .wrap_err("building test runtime")?;

        Ok(Self {
            users: UserService::new(
                Arc::new(PostgresUserRepository::new(pool.clone())),
                Arc::clone(&clock),
            ),
            messages: MessageService::new(
                Arc::new(PostgresMessageRepository::new(pool.clone())),
                Arc::clone(&clock),
            ),
            conversations: ConversationService::new(
                Arc::new(PostgresConversationRepository::new(pool.clone())),
                Arc::new(PostgresParticipantRepository::new(pool.clone())),
                Arc::clone(&clock),
            ),
            pool,
            clock,
            rt,
            database,
        })
    }

    /// Registers a user whose names derive from the email.
    ///
    /// # Panics
    ///
    /// Panics when registration fails.
    pub fn register(&self, email: &str) -> User {
        let local = email.split('@').next().unwrap_or(email);
        self.rt
            .block_on(self.users.register(RegisterUserRequest::new(
                local,
                "Tester",
                email,
                format!("digest-{local}"),
            )))
            .expect("registration should succeed")
    }

    /// Counts rows returned by a `SELECT COUNT(*) AS count ...` query.
    ///
    /// # Panics
    ///
    /// Panics when the query fails.
    pub fn count(&self, sql: &str) -> i64 {
        #[derive(diesel::QueryableByName)]
        struct CountRow {
            #[diesel(sql_type = diesel::sql_types::BigInt)]
            count: i64,
        }

        let mut conn = self.pool.get().expect("pooled connection");
        diesel::sql_query(sql)
            .get_result::<CountRow>(&mut conn)
            .expect("count query")
            .count
    }
}

/// Provides services over a fresh database, or `None` when skipping was
/// requested.
#[fixture]
pub fn pg_store(postgres_cluster: Option<PostgresCluster>) -> Option<PgStore> {
    let cluster = postgres_cluster?;
    Some(PgStore::new(cluster).expect("test database setup"))
}
