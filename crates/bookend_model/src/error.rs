//! Errors raised by reference host operations.

use bookend_events::error::HookError;
use thiserror::Error;

/// Errors from model lifecycle operations.
///
/// A vetoed operation is not an error: it reports `Ok(false)`.
#[derive(Debug, Error)]
pub enum ModelError {
    /// A listener failed while the operation was firing events.
    #[error(transparent)]
    Hook(#[from] HookError),

    /// No row exists for the requested key.
    #[error("No query results for model [{class}] {id}")]
    NotFound {
        /// Model class name.
        class: String,
        /// The key that was looked up.
        id: u64,
    },

    /// The model exists but carries no primary key value.
    #[error("model [{class}] has no primary key value")]
    MissingKey {
        /// Model class name.
        class: String,
    },

    /// The operation needs soft deletes, which the class does not use.
    #[error("model [{class}] does not use soft deletes")]
    NotSoftDeletable {
        /// Model class name.
        class: String,
    },
}

impl ModelError {
    /// Returns the listener error, if this is one.
    #[must_use]
    pub fn as_hook(&self) -> Option<&HookError> {
        match self {
            Self::Hook(err) => Some(err),
            _ => None,
        }
    }
}
