//! `PostgreSQL` adapter for message persistence.

mod models;
mod repository;

pub use repository::PostgresMessageRepository;
