//! Adapter implementations of the conversation and participant ports.

pub mod memory;
pub mod postgres;
