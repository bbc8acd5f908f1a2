//! Validation gates for stage advancement and dependency references.
//!
//! Validation failures are values, never errors: every gate returns a
//! [`ValidationResult`] listing all violated rules at once, so a caller can
//! surface the full set to whoever initiated the change. Only store access
//! itself can fail with an `Err`.

pub mod deps;
pub mod stage;

use serde::{Deserialize, Serialize};

/// Outcome of a validation gate. `errors` holds every violated rule as a
/// human-readable message, displayable verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// A passing result with no errors.
    #[must_use]
    pub const fn ok() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    /// Build a result from collected errors; valid iff the list is empty.
    #[must_use]
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    /// Combine two results, keeping every error from both.
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        self.errors.extend(other.errors);
        self.is_valid = self.errors.is_empty();
        self
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::ok()
    }
}
