//! Chats: persistent data model for a minimal messaging application.
//!
//! The crate owns the storage schema for users, messages, and conversations
//! and exposes each entity through a typed repository port.
//!
//! # Architecture
//!
//! Each entity module follows hexagonal architecture principles:
//!
//! - **Domain**: Validated values and aggregates with no infrastructure
//!   dependencies
//! - **Ports**: Abstract repository traits
//! - **Adapters**: In-memory and `PostgreSQL` implementations of the ports
//! - **Services**: Thin orchestration over the ports
//!
//! # Modules
//!
//! - [`user`]: Account records
//! - [`message`]: Messages authored by a single user
//! - [`conversation`]: Conversations and their participant sets
//! - [`persistence`]: Shared table definitions, migrations, and pools
//! - [`config`]: Database configuration loading
//! - [`telemetry`]: Logging initialisation

pub mod config;
pub mod constraint;
pub mod conversation;
pub mod message;
pub mod persistence;
pub mod telemetry;
pub mod user;

#[cfg(test)]
mod test_support;

pub use constraint::ConstraintViolation;
