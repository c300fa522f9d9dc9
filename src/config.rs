//! Database configuration.
//!
//! Settings are read from `CHATS_`-prefixed environment variables (after
//! loading a `.env` file when present) and, optionally, from a file named by
//! `CHATS_CONFIG`. Environment variables take precedence over the file.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Prefix shared by every configuration environment variable.
pub const ENV_PREFIX: &str = "CHATS";

/// Environment variable naming an optional configuration file.
pub const CONFIG_PATH_VAR: &str = "CHATS_CONFIG";

/// Default upper bound on pooled connections.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Default time to wait for a pooled connection, in seconds.
pub const DEFAULT_CONNECTION_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the `PostgreSQL` store.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DatabaseConfig {
    /// Connection URL, read from `CHATS_DATABASE_URL`.
    pub database_url: String,
    /// Maximum pool size, read from `CHATS_MAX_CONNECTIONS`.
    pub max_connections: u32,
    /// Pool checkout timeout, read from `CHATS_CONNECTION_TIMEOUT_SECS`.
    pub connection_timeout_secs: u64,
}

impl DatabaseConfig {
    /// Loads configuration from `.env`, the environment, and the optional
    /// configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the database URL is missing, a value has
    /// the wrong type, or the configuration file cannot be read.
    pub fn load() -> Result<Self, ConfigError> {
        if let Some(path) = load_env_file() {
            debug!(path = %path.display(), "loaded .env");
        }

        let mut builder = Config::builder();
        if let Ok(path) = std::env::var(CONFIG_PATH_VAR) {
            builder = builder.add_source(File::with_name(&path));
        }
        builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true));
        Self::from_builder(builder)
    }

    /// Builds configuration from caller-supplied sources, applying defaults
    /// for the pool settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when required keys are missing or malformed.
    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        builder
            .set_default("max_connections", i64::from(DEFAULT_MAX_CONNECTIONS))?
            .set_default(
                "connection_timeout_secs",
                DEFAULT_CONNECTION_TIMEOUT_SECS,
            )?
            .build()?
            .try_deserialize()
    }

    /// Returns the pool checkout timeout.
    #[must_use]
    pub const fn connection_timeout(&self) -> Duration {
        Duration::from_secs(self.connection_timeout_secs)
    }
}

/// Loads `.env` from the working directory or its ancestors into the
/// process environment. Variables that are already set win.
///
/// Binaries call this before installing the logging subscriber so that a
/// `RUST_LOG` in `.env` applies. Calling it again is a no-op.
#[must_use]
pub fn load_env_file() -> Option<PathBuf> {
    match dotenv::dotenv() {
        Ok(path) => Some(path),
        Err(err) => {
            debug!(%err, "no .env file loaded");
            None
        }
    }
}

/// Loads the given env file into the process environment. Returns `false`
/// when it cannot be read or parsed.
#[must_use]
pub fn load_env_file_from(path: &Path) -> bool {
    dotenv::from_path(path).is_ok()
}
