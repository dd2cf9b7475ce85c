//! Ambient infrastructure for Bookend.
//!
//! - [`TracingSetup`] - Installs the `tracing` subscriber Bookend crates log
//!   through
//!
//! # Example
//!
//! ```no_run
//! use bookend_core::TracingSetup;
//!
//! // Honors RUST_LOG and BOOKEND_LOG_FORMAT.
//! TracingSetup::from_env().init();
//! ```

mod tracing_setup;

pub use tracing_setup::{
    FILTER_ENV, FORMAT_ENV, TracingConfig, TracingError, TracingFormat, TracingSetup,
};
