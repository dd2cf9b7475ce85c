//! Tracing subscriber setup.
//!
//! Bookend crates only emit `tracing` events; nothing is printed until an
//! application installs a subscriber. [`TracingSetup`] builds one with an
//! [`EnvFilter`] and a `fmt` layer in the chosen [`TracingFormat`].
//!
//! # Example
//!
//! ```no_run
//! use bookend_core::{TracingFormat, TracingSetup};
//! use tracing::Level;
//!
//! let config = TracingSetup::new()
//!     .with_level(Level::DEBUG)
//!     .with_format(TracingFormat::Compact)
//!     .with_env_filter("bookend_events=trace,bookend_model=debug")
//!     .init();
//!
//! tracing::info!(format = ?config.format, "logging ready");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

/// Environment variable holding the filter directives.
pub const FILTER_ENV: &str = "RUST_LOG";

/// Environment variable selecting the output format.
pub const FORMAT_ENV: &str = "BOOKEND_LOG_FORMAT";

// ─────────────────────────────────────────────────────────────────────────────
// TracingFormat
// ─────────────────────────────────────────────────────────────────────────────

/// Tracing output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TracingFormat {
    /// Human-readable colored output (default).
    #[default]
    Pretty,
    /// Compact single-line output.
    Compact,
    /// JSON structured output for log aggregation.
    Json,
}

impl TracingFormat {
    /// Parses a format name, case-insensitively.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "pretty" => Some(Self::Pretty),
            "compact" => Some(Self::Compact),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// TracingConfig
// ─────────────────────────────────────────────────────────────────────────────

/// The configuration a [`TracingSetup`] applied.
#[derive(Debug, Clone, Copy)]
pub struct TracingConfig {
    /// The configured log level.
    pub level: Level,
    /// The configured output format.
    pub format: TracingFormat,
}

/// Errors from installing the subscriber.
#[derive(Debug, Error)]
pub enum TracingError {
    /// Another global subscriber is already installed.
    #[error("tracing subscriber already initialized: {0}")]
    AlreadyInitialized(#[from] TryInitError),
}

// ─────────────────────────────────────────────────────────────────────────────
// TracingSetup
// ─────────────────────────────────────────────────────────────────────────────

/// Builder for the global tracing subscriber.
///
/// # Environment Filter
///
/// Use [`with_env_filter`](Self::with_env_filter) for target-specific levels.
/// An invalid filter falls back to the plain level.
///
/// ```
/// use bookend_core::TracingSetup;
///
/// TracingSetup::new()
///     .with_env_filter("bookend_events=trace,bookend_model=info")
/// # ;
/// ```
#[derive(Debug, Clone)]
pub struct TracingSetup {
    /// Maximum log level.
    level: Level,
    /// Output format.
    format: TracingFormat,
    /// Environment filter (e.g., "bookend_events=trace").
    env_filter: Option<String>,
    /// Whether to include span events (enter/exit).
    span_events: bool,
}

impl Default for TracingSetup {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            format: TracingFormat::Pretty,
            env_filter: None,
            span_events: false,
        }
    }
}

impl TracingSetup {
    /// Creates a setup with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a setup from [`FILTER_ENV`] and [`FORMAT_ENV`].
    ///
    /// Unset or unrecognized variables keep the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var(FILTER_ENV).ok(),
            std::env::var(FORMAT_ENV).ok(),
        )
    }

    fn from_vars(filter: Option<String>, format: Option<String>) -> Self {
        let mut setup = Self::default();
        if let Some(filter) = filter.filter(|f| !f.trim().is_empty()) {
            setup.env_filter = Some(filter);
        }
        if let Some(format) = format.as_deref().and_then(TracingFormat::parse) {
            setup.format = format;
        }
        setup
    }

    /// Sets the maximum log level.
    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Sets the output format.
    #[must_use]
    pub fn with_format(mut self, format: TracingFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets a custom environment filter string.
    ///
    /// Format: `target=level,target=level,...`
    #[must_use]
    pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Enables span enter/exit events in output.
    #[must_use]
    pub fn with_span_events(mut self, enabled: bool) -> Self {
        self.span_events = enabled;
        self
    }

    /// Returns the configuration this setup applies.
    #[must_use]
    pub fn config(&self) -> TracingConfig {
        TracingConfig {
            level: self.level,
            format: self.format,
        }
    }

    fn filter(&self) -> EnvFilter {
        match &self.env_filter {
            Some(filter) => {
                EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(self.level.as_str()))
            }
            None => EnvFilter::new(self.level.as_str()),
        }
    }

    fn span_events(&self) -> FmtSpan {
        if self.span_events {
            FmtSpan::ENTER | FmtSpan::EXIT
        } else {
            FmtSpan::NONE
        }
    }

    /// Installs the global subscriber.
    ///
    /// # Errors
    ///
    /// [`TracingError::AlreadyInitialized`] if a global subscriber exists.
    pub fn try_init(&self) -> Result<TracingConfig, TracingError> {
        let env_filter = self.filter();
        let span_events = self.span_events();

        match self.format {
            TracingFormat::Pretty => tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .pretty()
                        .with_span_events(span_events),
                )
                .try_init()?,
            TracingFormat::Compact => tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .compact()
                        .with_span_events(span_events),
                )
                .try_init()?,
            TracingFormat::Json => tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_span_events(span_events),
                )
                .try_init()?,
        }

        tracing::info!(
            level = %self.level,
            format = ?self.format,
            "tracing initialized"
        );
        Ok(self.config())
    }

    /// Installs the global subscriber, keeping an existing one if present.
    pub fn init(&self) -> TracingConfig {
        if let Err(err) = self.try_init() {
            tracing::debug!(error = %err, "keeping existing tracing subscriber");
        }
        self.config()
    }
}
