//! Symmetric before/after lifecycle hooks for ORM models.
//!

pub use bookend_internal::*;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use bookend_internal::prelude::*;
}
