//! Event names and the before/after names derived from them.
//!
//! Event names are case-sensitive and may contain any characters. The only
//! transformation ever applied is capitalizing the first character when a
//! derived name is composed:
//!
//! ```
//! use bookend_events::name::{EventName, Phase};
//!
//! let creating = EventName::new("creating");
//! assert_eq!(creating.before().as_str(), "beforeCreating");
//! assert_eq!(creating.derived(Phase::After).as_str(), "afterCreating");
//!
//! // Only the first character changes.
//! assert_eq!(EventName::new("event-with-dashes").before().as_str(), "beforeEvent-with-dashes");
//! ```

use core::borrow::Borrow;
use core::fmt;
use std::borrow::Cow;

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// EventName
// ─────────────────────────────────────────────────────────────────────────────

/// A case-sensitive lifecycle event identifier.
///
/// `EventName` borrows as `str`, so sets and maps keyed by it can be queried
/// with plain string slices.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventName(String);

impl EventName {
    /// Creates an event name. No normalization is applied.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Composes the derived name for `phase`, e.g. `beforeSaving` for `saving`.
    #[must_use]
    pub fn derived(&self, phase: Phase) -> EventName {
        phase.derive(&self.0)
    }

    /// Shorthand for [`derived(Phase::Before)`](Self::derived).
    #[must_use]
    pub fn before(&self) -> EventName {
        self.derived(Phase::Before)
    }

    /// Shorthand for [`derived(Phase::After)`](Self::derived).
    #[must_use]
    pub fn after(&self) -> EventName {
        self.derived(Phase::After)
    }

    /// Consumes the name, returning the inner string.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EventName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for EventName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EventName {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl From<String> for EventName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl From<&String> for EventName {
    fn from(name: &String) -> Self {
        Self(name.clone())
    }
}

impl PartialEq<str> for EventName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for EventName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Phase
// ─────────────────────────────────────────────────────────────────────────────

/// The hook phase surrounding a base event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Runs ahead of the base event and may veto it.
    Before,
    /// Runs once the base event proceeded. Notification only.
    After,
}

impl Phase {
    /// Both phases, in firing order.
    pub const ALL: [Phase; 2] = [Phase::Before, Phase::After];

    /// The prefix used when composing derived names.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Phase::Before => "before",
            Phase::After => "after",
        }
    }

    /// Composes `<prefix><CapitalizedBase>`.
    #[must_use]
    pub fn derive(self, base: &str) -> EventName {
        let capitalized = capitalize_first(base);
        let mut name = String::with_capacity(self.prefix().len() + capitalized.len());
        name.push_str(self.prefix());
        name.push_str(&capitalized);
        EventName(name)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Uppercases the first character if it is an ASCII lowercase letter.
///
/// Everything else is returned untouched; this is not title-casing.
#[must_use]
pub fn capitalize_first(name: &str) -> Cow<'_, str> {
    match name.as_bytes().first() {
        Some(first) if first.is_ascii_lowercase() => {
            let mut owned = name.to_owned();
            owned[..1].make_ascii_uppercase();
            Cow::Owned(owned)
        }
        _ => Cow::Borrowed(name),
    }
}

/// Splits a hook method name of the form `before<Name>` / `after<Name>`.
///
/// `<Name>` must start with an ASCII uppercase letter, so `beforeCreating`
/// matches while `before`, `beforehand` and `afterwards` do not. The returned
/// remainder is the capitalized base name (`"Creating"`).
#[must_use]
pub fn parse_hook_method(method: &str) -> Option<(Phase, &str)> {
    Phase::ALL.into_iter().find_map(|phase| {
        method
            .strip_prefix(phase.prefix())
            .filter(|rest| rest.as_bytes().first().is_some_and(u8::is_ascii_uppercase))
            .map(|rest| (phase, rest))
    })
}
