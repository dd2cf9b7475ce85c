//! In-memory reference host for Bookend lifecycle hooks.
//!
//! `bookend_model` provides a small ORM-shaped host so that before/after
//! hooks can be driven end to end:
//!
//! - [`model`] - [`Model<C>`](model::Model) records and the [`ModelClass`](model::ModelClass) trait
//! - [`listeners`] - Class-level listener storage with the host's halt semantics
//! - [`store`] - In-memory tables
//! - [`error`] - Operation errors
//!
//! It makes no durability or transaction guarantees.

/// Operation errors.
pub mod error;

/// Class-level listener storage.
pub mod listeners;

/// Reference host models.
pub mod model;

/// In-memory tables.
pub mod store;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use crate::error::ModelError;
    pub use crate::listeners::ListenerStore;
    pub use crate::model::{Model, ModelClass};
    pub use crate::store::{MemoryStore, Row};
    pub use bookend_events::prelude::*;
}
