//! Symmetric before/after lifecycle hooks for ORM models.
//!
//! `bookend_events` wraps every firing of a model lifecycle event `E` with a
//! `before<E>` and an `after<E>` phase:
//!
//! - [`name`] - Event names and before/after derivation
//! - [`class`] - Model class identity
//! - [`registry`] - Process-wide per-class registry of dynamic events
//! - [`observable`] - Observable event sets and their initialization
//! - [`dispatch`] - The before/base/after dispatch wrapper
//! - [`registration`] - The registration API for host models
//! - [`host`] - The contract a host model implements
//!
//! # Architecture
//!
//! The crate owns no persistence and no listener storage. A host ORM
//! implements [`host::ObservableModel`] for its models and receives the
//! registration API and wrapped firing through the blanket
//! [`registration::BeforeAndAfterEvents`] impl. `bookend_model` ships an
//! in-memory host.
//!
//! # Example
//!
//! ```ignore
//! use bookend_events::prelude::*;
//!
//! // Veto creation of drafts without a title.
//! Post::before_creating(|post: &mut Post| post.title().is_some());
//!
//! // Custom events get both phases once registered dynamically.
//! Post::after_event("publishing", |post: &mut Post| {
//!     tracing::info!(id = ?post.id(), "published");
//! });
//! ```

/// Model class identity.
pub mod class;

/// Per-class hook configuration.
pub mod config;

/// The before/base/after dispatch wrapper.
pub mod dispatch;

/// Registration and listener error types.
pub mod error;

/// The host model contract.
pub mod host;

/// Listener callables and their verdicts.
pub mod listener;

/// Event names and phase derivation.
pub mod name;

/// Observable event sets.
pub mod observable;

/// The registration API.
pub mod registration;

/// The dynamic event name registry.
pub mod registry;

#[cfg(test)]
mod testing;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use crate::class::ModelClassId;
    pub use crate::config::{Baseline, HooksConfig};
    pub use crate::dispatch::{BaseDispatch, DispatchWrapper};
    pub use crate::error::{HookError, RegistrationError};
    pub use crate::host::ObservableModel;
    pub use crate::listener::{Argument, IntoVerdict, Listener, Verdict};
    pub use crate::name::{EventName, Phase};
    pub use crate::observable::{BASELINE_EVENTS, ObservableEventInitializer, ObservableEventSet};
    pub use crate::registration::BeforeAndAfterEvents;
    pub use crate::registry::DynamicEventRegistry;
}
