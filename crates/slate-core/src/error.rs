//! Typed errors for store access and mutating operations.
//!
//! Validation failures on read paths are never errors (see
//! [`crate::validate::ValidationResult`]); these variants cover the mutating
//! path, where the initiating form needs a descriptive failure to surface,
//! and store/transport breakage.

use thiserror::Error;

use crate::validate::ValidationResult;

#[derive(Debug, Error)]
pub enum StoreError {
    /// No content with the given id.
    #[error("content not found: {0}")]
    NotFound(String),

    /// Topic uniqueness violated on create or rename.
    #[error("topic '{0}' is already in use")]
    DuplicateTopic(String),

    /// A mutating operation was rejected by a validation gate.
    #[error("validation failed: {}", .0.errors.join("; "))]
    Rejected(ValidationResult),

    /// The store backend itself failed (I/O, transport).
    #[error("store backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// The validation result carried by a [`StoreError::Rejected`], if any.
    #[must_use]
    pub const fn validation(&self) -> Option<&ValidationResult> {
        match self {
            Self::Rejected(result) => Some(result),
            _ => None,
        }
    }
}
