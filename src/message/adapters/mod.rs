//! Adapter implementations of the message repository port.

pub mod memory;
pub mod postgres;
