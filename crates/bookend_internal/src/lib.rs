//! # Bookend Internal Library
//!
//! Re-exports the core Bookend crates for convenience.

/// Before/after hook registration and dispatch.
pub use bookend_events;

/// In-memory reference host models.
pub use bookend_model;

/// Tracing subscriber setup.
pub use bookend_core;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use bookend_core::{TracingFormat, TracingSetup};
    pub use bookend_events::prelude::*;
    pub use bookend_model::prelude::*;
}
