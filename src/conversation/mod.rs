//! Conversations and their participant sets.
//!
//! A conversation groups zero or more users. Membership is an explicit join
//! record ([`domain::Participant`]) with its own repository port, so adding
//! or removing a participant never rewrites the conversation itself.
//! Membership is a set: it has no ordering and no per-participant data.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
