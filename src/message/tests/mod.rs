//! Unit tests for the message module.
