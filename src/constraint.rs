//! Classification of storage constraint failures.
//!
//! Repository errors across all entities expose which declared constraint,
//! if any, rejected a write so callers can react without matching on every
//! entity-specific variant.

use std::fmt;

/// Declared storage constraint that rejected a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintViolation {
    /// A unique column or primary key already holds the value.
    Uniqueness,
    /// A foreign-key value does not reference an existing row.
    ReferentialIntegrity,
}

impl ConstraintViolation {
    /// Returns a stable label for logs and diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Uniqueness => "uniqueness",
            Self::ReferentialIntegrity => "referential_integrity",
        }
    }
}

impl fmt::Display for ConstraintViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
