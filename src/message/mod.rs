//! Messages.
//!
//! A message is a single text communication authored by exactly one user.
//! The sender must exist when the message is stored, and the message is
//! removed when its sender is deleted. Messages are leaf records: nothing
//! else references them.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
