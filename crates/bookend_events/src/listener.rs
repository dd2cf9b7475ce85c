//! Listener callbacks and the verdicts they return.
//!
//! A listener is any `Fn(&mut M) -> R` where `R` converts into a [`Verdict`]:
//!
//! | Return type | Meaning |
//! |-------------|---------|
//! | `()` | proceed |
//! | `bool` | `false` stops, `true` proceeds |
//! | [`Verdict`] | as given |
//! | `Result<R, HookError>` | `Err` propagates to the caller |

use core::fmt;
use std::sync::Arc;

use crate::error::HookError;

// ─────────────────────────────────────────────────────────────────────────────
// Verdict
// ─────────────────────────────────────────────────────────────────────────────

/// Result of firing an event: carry on, or halt the operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// The operation may continue.
    #[default]
    Proceed,
    /// The stop sentinel. A halting firing returns this when a listener vetoes.
    Stop,
}

impl Verdict {
    /// Returns `true` for [`Verdict::Stop`].
    #[must_use]
    pub fn is_stop(self) -> bool {
        matches!(self, Verdict::Stop)
    }

    /// Returns `true` for [`Verdict::Proceed`].
    #[must_use]
    pub fn is_proceed(self) -> bool {
        matches!(self, Verdict::Proceed)
    }
}

impl From<bool> for Verdict {
    fn from(proceed: bool) -> Self {
        if proceed {
            Verdict::Proceed
        } else {
            Verdict::Stop
        }
    }
}

/// Conversion from a listener's return value into a [`Verdict`].
pub trait IntoVerdict {
    /// Performs the conversion.
    ///
    /// # Errors
    ///
    /// Returns the listener's own error unchanged.
    fn into_verdict(self) -> Result<Verdict, HookError>;
}

impl IntoVerdict for () {
    fn into_verdict(self) -> Result<Verdict, HookError> {
        Ok(Verdict::Proceed)
    }
}

impl IntoVerdict for bool {
    fn into_verdict(self) -> Result<Verdict, HookError> {
        Ok(Verdict::from(self))
    }
}

impl IntoVerdict for Verdict {
    fn into_verdict(self) -> Result<Verdict, HookError> {
        Ok(self)
    }
}

impl<R: IntoVerdict> IntoVerdict for Result<R, HookError> {
    fn into_verdict(self) -> Result<Verdict, HookError> {
        self.and_then(IntoVerdict::into_verdict)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Listener
// ─────────────────────────────────────────────────────────────────────────────

type ListenerFn<M> = dyn Fn(&mut M) -> Result<Verdict, HookError> + Send + Sync;

/// A shared, type-erased event listener for models of type `M`.
///
/// Cloning is cheap; clones call the same closure.
pub struct Listener<M> {
    handler: Arc<ListenerFn<M>>,
}

impl<M> Listener<M> {
    /// Wraps a closure as a listener.
    pub fn new<F, R>(handler: F) -> Self
    where
        M: 'static,
        F: Fn(&mut M) -> R + Send + Sync + 'static,
        R: IntoVerdict,
    {
        Self {
            handler: Arc::new(move |model: &mut M| handler(model).into_verdict()),
        }
    }

    /// Invokes the listener against `model`.
    ///
    /// # Errors
    ///
    /// Returns whatever error the listener raised.
    pub fn call(&self, model: &mut M) -> Result<Verdict, HookError> {
        (self.handler)(model)
    }

    /// Returns `true` if both handles point at the same closure.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.handler, &other.handler)
    }
}

impl<M> Clone for Listener<M> {
    fn clone(&self) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
        }
    }
}

impl<M> fmt::Debug for Listener<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener").finish_non_exhaustive()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Argument
// ─────────────────────────────────────────────────────────────────────────────

/// A dynamically typed argument to a method-name registration call.
///
/// See [`BeforeAndAfterEvents::call_static`](crate::registration::BeforeAndAfterEvents::call_static).
pub enum Argument<M> {
    /// An invocable argument.
    Listener(Listener<M>),
    /// Any other value.
    Value(serde_json::Value),
}

impl<M> Argument<M> {
    /// Convenience constructor for [`Argument::Listener`].
    pub fn listener<F, R>(handler: F) -> Self
    where
        M: 'static,
        F: Fn(&mut M) -> R + Send + Sync + 'static,
        R: IntoVerdict,
    {
        Argument::Listener(Listener::new(handler))
    }

    /// Returns the listener if this argument is invocable.
    #[must_use]
    pub fn as_listener(&self) -> Option<&Listener<M>> {
        match self {
            Argument::Listener(listener) => Some(listener),
            Argument::Value(_) => None,
        }
    }
}

impl<M> Clone for Argument<M> {
    fn clone(&self) -> Self {
        match self {
            Argument::Listener(listener) => Argument::Listener(listener.clone()),
            Argument::Value(value) => Argument::Value(value.clone()),
        }
    }
}

impl<M> fmt::Debug for Argument<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Argument::Listener(listener) => f.debug_tuple("Listener").field(listener).finish(),
            Argument::Value(value) => f.debug_tuple("Value").field(value).finish(),
        }
    }
}

impl<M> From<Listener<M>> for Argument<M> {
    fn from(listener: Listener<M>) -> Self {
        Argument::Listener(listener)
    }
}

impl<M> From<serde_json::Value> for Argument<M> {
    fn from(value: serde_json::Value) -> Self {
        Argument::Value(value)
    }
}
