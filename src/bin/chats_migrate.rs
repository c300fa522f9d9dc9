//! Applies pending schema migrations to the configured database.
//!
//! Usage:
//!
//! ```text
//! CHATS_DATABASE_URL=postgres://localhost/chats chats-migrate
//! ```

use anyhow::{Context, Result};
use chats::config::DatabaseConfig;
use chats::persistence::run_migrations;
use diesel::{Connection, PgConnection};
use tracing::info;

fn main() -> Result<()> {
    // `.env` may carry `RUST_LOG`, so it must be loaded before the subscriber.
    let env_file = chats::config::load_env_file();
    chats::telemetry::init().context("install logging subscriber")?;
    if let Some(path) = env_file {
        info!(path = %path.display(), "loaded environment file");
    }

    let config = DatabaseConfig::load().context("load database configuration")?;
    let mut connection = PgConnection::establish(&config.database_url)
        .context("connect to the configured database")?;

    let applied = run_migrations(&mut connection).context("apply migrations")?;
    if applied.is_empty() {
        info!("schema already up to date");
    } else {
        info!(count = applied.len(), "applied migrations");
    }
    Ok(())
}
