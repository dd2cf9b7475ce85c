//! The contract a host model must provide.
//!
//! Bookend never persists anything and never stores listeners. It needs from
//! the host ORM an observable-event set it can extend, a class-level listener
//! store, and the unwrapped "fire named event" operation that the
//! [`DispatchWrapper`](crate::dispatch::DispatchWrapper) decorates.
//!
//! Implementing [`ObservableModel`] is enough to get the whole registration
//! API through the blanket
//! [`BeforeAndAfterEvents`](crate::registration::BeforeAndAfterEvents) impl.

use crate::class::ModelClassId;
use crate::config::HooksConfig;
use crate::error::{HookError, RegistrationError};
use crate::listener::{Argument, Listener, Verdict};
use crate::name::EventName;
use crate::observable::ObservableEventSet;

/// A host model type whose lifecycle events can be wrapped.
///
/// # Firing semantics
///
/// [`fire_model_event`](Self::fire_model_event) is the host's own dispatch,
/// with no before/after handling. It invokes every listener registered under
/// `name` in registration order. With `halt` set, the first listener that
/// returns [`Verdict::Stop`] ends the firing and `Stop` is returned. Without
/// `halt`, every listener runs and the result is always
/// [`Verdict::Proceed`]. Listener errors propagate.
pub trait ObservableModel: Sized + 'static {
    /// Identity of the model class. Per-class stores are keyed by this.
    #[must_use]
    fn class_id() -> ModelClassId {
        ModelClassId::of::<Self>()
    }

    /// Extra event names this class wants wrapped, on top of the baseline.
    #[must_use]
    fn declared_events() -> &'static [&'static str] {
        &[]
    }

    /// Hook configuration for this class.
    #[must_use]
    fn hooks_config() -> HooksConfig {
        HooksConfig::default()
    }

    /// Returns the instance's current observable set.
    fn observable_events(&self) -> &ObservableEventSet;

    /// Extends the instance's observable set.
    fn add_observable_events(&mut self, names: ObservableEventSet);

    /// Attaches `listener` to `name` in the class-level listener store.
    fn register_model_event(name: EventName, listener: Listener<Self>);

    /// Fires `name` through the host's own listener store.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by a listener.
    fn fire_model_event(&mut self, name: &EventName, halt: bool) -> Result<Verdict, HookError>;

    /// Handles a method-name call no registration form recognized.
    ///
    /// # Errors
    ///
    /// The default implementation always returns
    /// [`RegistrationError::NoSuchMethod`].
    fn call_static_fallback(
        method: &str,
        args: Vec<Argument<Self>>,
    ) -> Result<(), RegistrationError> {
        drop(args);
        Err(RegistrationError::no_such_method(
            Self::class_id().short_name(),
            method,
        ))
    }
}
