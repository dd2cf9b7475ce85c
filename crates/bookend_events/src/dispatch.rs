//! The before/base/after dispatch wrapper.
//!
//! [`DispatchWrapper`] decorates a host's unwrapped "fire named event"
//! function. Firing base event `E` with halt flag `H` runs:
//!
//! 1. **Before**: `before<E>` with `H`, if both `E` and `before<E>` are
//!    observable. A [`Verdict::Stop`]
//!    aborts the whole dispatch and is returned as-is.
//! 2. **Base**: `E` with `H`. Its verdict `R` is the dispatch result.
//! 3. **After**: `after<E>` with `halt = false`, under the same observability
//!    rule, if `R` is not `Stop`. Its verdict is discarded.
//!
//! Names that are not themselves observable, or have no before/after entries,
//! fall through to the base phase alone. Base names differing only in the
//! case of their first letter derive the same phase names, so the base check
//! keeps `CustomEvent` from picking up hooks registered for `customEvent`.
//! Listener errors are never caught.
//!
//! # Example
//!
//! ```ignore
//! let wrapper = DispatchWrapper::<Post>::for_model();
//! if wrapper.fire(&mut post, &EventName::new("publishing"), true)?.is_stop() {
//!     return Ok(false);
//! }
//! ```

use core::fmt;
use core::marker::PhantomData;

use crate::error::HookError;
use crate::host::ObservableModel;
use crate::listener::Verdict;
use crate::name::{EventName, Phase};

/// The shape of a host's unwrapped dispatch function.
pub type BaseDispatch<M> = fn(&mut M, &EventName, bool) -> Result<Verdict, HookError>;

/// Decorator sequencing the before, base and after phases around a base
/// dispatch function.
pub struct DispatchWrapper<M, F = BaseDispatch<M>> {
    base: F,
    _model: PhantomData<fn(&mut M)>,
}

impl<M: ObservableModel> DispatchWrapper<M> {
    /// Wraps the host's own [`ObservableModel::fire_model_event`].
    #[must_use]
    pub fn for_model() -> Self {
        Self::new(M::fire_model_event)
    }
}

impl<M, F> DispatchWrapper<M, F>
where
    M: ObservableModel,
    F: Fn(&mut M, &EventName, bool) -> Result<Verdict, HookError>,
{
    /// Wraps an arbitrary base dispatch function.
    #[must_use]
    pub fn new(base: F) -> Self {
        Self {
            base,
            _model: PhantomData,
        }
    }

    /// Fires `event` on `model` with before/after phases.
    ///
    /// # Errors
    ///
    /// Propagates the first error raised by any listener in any phase.
    pub fn fire(&self, model: &mut M, event: &EventName, halt: bool) -> Result<Verdict, HookError> {
        let class = M::class_id();

        if let Some(before) = Self::observable_derived(model, event, Phase::Before) {
            tracing::trace!(class = %class, event = %before, halt, "firing before phase");
            if (self.base)(model, &before, halt)?.is_stop() {
                tracing::debug!(class = %class, event = %event, "before phase vetoed event");
                return Ok(Verdict::Stop);
            }
        }

        tracing::trace!(class = %class, event = %event, halt, "firing base phase");
        let result = (self.base)(model, event, halt)?;

        if result.is_stop() {
            tracing::debug!(class = %class, event = %event, "base phase halted, skipping after phase");
            return Ok(result);
        }

        if let Some(after) = Self::observable_derived(model, event, Phase::After) {
            tracing::trace!(class = %class, event = %after, "firing after phase");
            (self.base)(model, &after, false)?;
        }

        Ok(result)
    }

    fn observable_derived(model: &M, event: &EventName, phase: Phase) -> Option<EventName> {
        let observable = model.observable_events();
        if !observable.contains(event.as_str()) {
            return None;
        }
        let derived = event.derived(phase);
        observable.contains(derived.as_str()).then_some(derived)
    }
}

impl<M, F> fmt::Debug for DispatchWrapper<M, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchWrapper")
            .field("model", &core::any::type_name::<M>())
            .finish_non_exhaustive()
    }
}
