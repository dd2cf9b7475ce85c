//! Registration API and wrapped firing for host models.
//!
//! [`BeforeAndAfterEvents`] is blanket-implemented for every
//! [`ObservableModel`], so a host only has to provide the contract in
//! [`host`](crate::host) to get:
//!
//! - typed hooks for the baseline events ([`before_creating`](BeforeAndAfterEvents::before_creating),
//!   [`after_saved`](BeforeAndAfterEvents::after_saved), ...)
//! - the dynamic form for any event name ([`before_event`](BeforeAndAfterEvents::before_event),
//!   [`after_event`](BeforeAndAfterEvents::after_event))
//! - the method-name form ([`call_static`](BeforeAndAfterEvents::call_static))
//! - wrapped firing ([`fire_event`](BeforeAndAfterEvents::fire_event))
//!
//! All forms register under the same derived names, so `before_creating(cb)`,
//! `before_event("creating", cb)` and `call_static("beforeCreating", ..)` are
//! interchangeable.
//!
//! # Example
//!
//! ```ignore
//! // Cancel publishing when the title is empty.
//! Post::before_event("publishing", |post: &mut Post| !post.title().is_empty());
//!
//! Post::after_event("publishing", |post: &mut Post| {
//!     tracing::info!(id = post.id(), "post published");
//! });
//!
//! let mut post = Post::new();
//! if post.fire_event("publishing", true)?.is_stop() {
//!     return Ok(false);
//! }
//! ```

use crate::dispatch::DispatchWrapper;
use crate::error::{HookError, RegistrationError};
use crate::host::ObservableModel;
use crate::listener::{Argument, IntoVerdict, Listener, Verdict};
use crate::name::{EventName, Phase, parse_hook_method};
use crate::observable::ObservableEventInitializer;
use crate::registry::DynamicEventRegistry;

/// Generates the typed before/after registration methods of the baseline
/// events.
macro_rules! lifecycle_hooks {
    ($($event:literal => $before:ident, $after:ident;)*) => {
        $(
            #[doc = concat!("Registers a listener for the before phase of `", $event, "`.")]
            fn $before<F, R>(handler: F)
            where
                F: Fn(&mut Self) -> R + Send + Sync + 'static,
                R: IntoVerdict,
            {
                Self::register_hook(Phase::Before, $event, handler);
            }

            #[doc = concat!("Registers a listener for the after phase of `", $event, "`.")]
            fn $after<F, R>(handler: F)
            where
                F: Fn(&mut Self) -> R + Send + Sync + 'static,
                R: IntoVerdict,
            {
                Self::register_hook(Phase::After, $event, handler);
            }
        )*
    };
}

/// Before/after hook registration and wrapped dispatch for host models.
pub trait BeforeAndAfterEvents: ObservableModel {
    /// Adds the observable names this class needs to the instance.
    ///
    /// Hosts call this from their constructor. It reads the process-wide
    /// [`DynamicEventRegistry`], so registrations made before construction
    /// are picked up.
    fn initialize_before_and_after_events(&mut self) {
        let names = ObservableEventInitializer::global()
            .with_config(Self::hooks_config())
            .expand(Self::class_id(), Self::declared_events());
        self.add_observable_events(names);
    }

    /// Fires `event` with the before and after phases around it.
    ///
    /// # Errors
    ///
    /// Propagates the first listener error from any phase.
    fn fire_event(&mut self, event: impl Into<EventName>, halt: bool) -> Result<Verdict, HookError> {
        DispatchWrapper::<Self>::for_model().fire(self, &event.into(), halt)
    }

    /// Registers a plain listener on `event`, with no phase prefix.
    fn listen<F, R>(event: impl Into<EventName>, handler: F)
    where
        F: Fn(&mut Self) -> R + Send + Sync + 'static,
        R: IntoVerdict,
    {
        let event = event.into();
        tracing::debug!(class = %Self::class_id(), event = %event, "registering listener");
        Self::register_model_event(event, Listener::new(handler));
    }

    /// Registers a listener under the derived name of `event` for `phase`.
    ///
    /// The event is not recorded in the dynamic registry; it only fires if the
    /// derived name is observable (baseline or declared events).
    fn register_hook<F, R>(phase: Phase, event: impl Into<EventName>, handler: F)
    where
        F: Fn(&mut Self) -> R + Send + Sync + 'static,
        R: IntoVerdict,
    {
        Self::listen(event.into().derived(phase), handler);
    }

    /// Registers a before-phase listener for any event name.
    ///
    /// Records `event` for this class so that instances constructed afterwards
    /// observe it, then registers the listener under `before<Event>`.
    fn before_event<F, R>(event: impl Into<EventName>, handler: F)
    where
        F: Fn(&mut Self) -> R + Send + Sync + 'static,
        R: IntoVerdict,
    {
        let event = event.into();
        DynamicEventRegistry::global().register(Self::class_id(), event.clone());
        Self::register_hook(Phase::Before, event, handler);
    }

    /// Registers an after-phase listener for any event name.
    ///
    /// See [`before_event`](Self::before_event).
    fn after_event<F, R>(event: impl Into<EventName>, handler: F)
    where
        F: Fn(&mut Self) -> R + Send + Sync + 'static,
        R: IntoVerdict,
    {
        let event = event.into();
        DynamicEventRegistry::global().register(Self::class_id(), event.clone());
        Self::register_hook(Phase::After, event, handler);
    }

    /// Routes a registration call by method name.
    ///
    /// - `before<Name>` / `after<Name>` registers the single listener argument
    ///   under the method name.
    /// - Any other method called with exactly one listener registers it as a
    ///   plain listener for the event of that name (`publishing(cb)`).
    /// - Everything else goes to [`ObservableModel::call_static_fallback`].
    ///
    /// # Errors
    ///
    /// [`RegistrationError::InvalidArgument`] when a hook method does not get
    /// exactly one listener argument; nothing is registered in that case.
    /// Fallback errors otherwise.
    fn call_static(method: &str, args: Vec<Argument<Self>>) -> Result<(), RegistrationError> {
        if parse_hook_method(method).is_some() {
            let [Argument::Listener(listener)] = args.as_slice() else {
                return Err(RegistrationError::invalid_argument(method));
            };
            Self::register_model_event(EventName::new(method), listener.clone());
            return Ok(());
        }

        if let [Argument::Listener(listener)] = args.as_slice() {
            Self::register_model_event(EventName::new(method), listener.clone());
            return Ok(());
        }

        Self::call_static_fallback(method, args)
    }

    lifecycle_hooks! {
        "creating" => before_creating, after_creating;
        "created" => before_created, after_created;
        "saving" => before_saving, after_saving;
        "saved" => before_saved, after_saved;
        "updating" => before_updating, after_updating;
        "updated" => before_updated, after_updated;
        "deleting" => before_deleting, after_deleting;
        "deleted" => before_deleted, after_deleted;
        "restoring" => before_restoring, after_restoring;
        "restored" => before_restored, after_restored;
    }
}

impl<M: ObservableModel> BeforeAndAfterEvents for M {}
