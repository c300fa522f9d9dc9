//! Embedded schema migrations.

use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use thiserror::Error;
use tracing::info;

/// Migrations compiled from the crate's `migrations/` directory.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Error returned when pending migrations cannot be applied.
#[derive(Debug, Error)]
#[error("failed to apply migrations: {0}")]
pub struct MigrationError(#[source] Box<dyn std::error::Error + Send + Sync>);

/// Applies every pending migration and returns the applied versions.
///
/// # Errors
///
/// Returns [`MigrationError`] when a migration fails; earlier migrations in
/// the same run stay applied.
pub fn run_migrations(connection: &mut PgConnection) -> Result<Vec<String>, MigrationError> {
    let applied = connection
        .run_pending_migrations(MIGRATIONS)
        .map_err(MigrationError)?;
    let versions: Vec<String> = applied.iter().map(ToString::to_string).collect();
    for version in &versions {
        info!(%version, "applied migration");
    }
    Ok(versions)
}
