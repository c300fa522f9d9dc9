//! Shared persistence infrastructure.
//!
//! Owns the table definitions for every entity, the embedded migrations
//! that create them, the `PostgreSQL` connection pool, and the shared
//! in-memory store used by the in-memory adapters. Entity adapters build on
//! these pieces; nothing here knows about repository ports.

pub mod memory;
mod migrations;
mod pool;
pub(crate) mod schema;

pub use memory::InMemoryDatabase;
pub use migrations::{MIGRATIONS, MigrationError, run_migrations};
pub use pool::{ChatPgPool, StoreAccessError, build_pool};
pub(crate) use pool::{ConstraintFailure, constraint_failure, with_connection};
