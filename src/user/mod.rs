//! User accounts.
//!
//! A user is the account record every message and conversation membership
//! points at. Emails are unique across all users, and deleting a user
//! cascades to the messages it sent and to its conversation memberships.
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
