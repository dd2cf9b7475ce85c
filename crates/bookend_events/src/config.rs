//! Per-class hook configuration.

use serde::{Deserialize, Serialize};

/// Whether a model class gets before/after wrapping for the standard lifecycle
/// events without declaring them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Baseline {
    /// Wrap `creating`, `created`, `saving`, `saved`, `updating`, `updated`,
    /// `deleting`, `deleted`, `restoring` and `restored` implicitly.
    #[default]
    Implicit,
    /// Only wrap declared and dynamically registered events.
    Explicit,
}

/// Hook configuration for one model class.
///
/// ```
/// use bookend_events::config::{Baseline, HooksConfig};
///
/// let config: HooksConfig = serde_json::from_str(r#"{ "baseline": "explicit" }"#).unwrap();
/// assert_eq!(config.baseline, Baseline::Explicit);
/// assert_eq!(HooksConfig::default().baseline, Baseline::Implicit);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HooksConfig {
    /// Baseline event policy.
    pub baseline: Baseline,
}

impl HooksConfig {
    /// Creates the default configuration (implicit baseline).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            baseline: Baseline::Implicit,
        }
    }

    /// Sets the baseline policy.
    #[must_use]
    pub const fn with_baseline(mut self, baseline: Baseline) -> Self {
        self.baseline = baseline;
        self
    }
}
