//! Error types for hook registration and listener execution.

use thiserror::Error;

/// Errors raised while registering hooks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// A hook method was called with the wrong number or kind of arguments.
    #[error("Method {method} expects a single callable parameter.")]
    InvalidArgument {
        /// The offending method name.
        method: String,
    },

    /// No registration form and no host fallback recognized the method.
    #[error("Call to undefined method {class}::{method}()")]
    NoSuchMethod {
        /// The model class the call was made on.
        class: String,
        /// The unrecognized method name.
        method: String,
    },
}

impl RegistrationError {
    /// Creates an [`InvalidArgument`](Self::InvalidArgument) error.
    pub fn invalid_argument(method: impl Into<String>) -> Self {
        Self::InvalidArgument {
            method: method.into(),
        }
    }

    /// Creates a [`NoSuchMethod`](Self::NoSuchMethod) error.
    pub fn no_such_method(class: impl Into<String>, method: impl Into<String>) -> Self {
        Self::NoSuchMethod {
            class: class.into(),
            method: method.into(),
        }
    }
}

type BoxError = Box<dyn core::error::Error + Send + Sync + 'static>;

/// An error raised by a listener.
///
/// Listener errors are never caught by the dispatch wrapper; they surface
/// unchanged from whichever lifecycle operation fired the event.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct HookError(BoxError);

impl HookError {
    /// Wraps an arbitrary error.
    pub fn new(error: impl Into<BoxError>) -> Self {
        Self(error.into())
    }

    /// Creates an error from a message.
    pub fn msg(message: impl Into<String>) -> Self {
        let message: String = message.into();
        Self(message.into())
    }

    /// Attempts to downcast to the concrete error type raised by the listener.
    #[must_use]
    pub fn downcast_ref<E: core::error::Error + 'static>(&self) -> Option<&E> {
        self.0.downcast_ref::<E>()
    }

    /// Returns the wrapped error.
    #[must_use]
    pub fn into_inner(self) -> BoxError {
        self.0
    }
}
