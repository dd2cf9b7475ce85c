//! Observable event sets and their initialization.
//!
//! A model instance only fires the before/after phase of an event when the
//! derived name is present in its [`ObservableEventSet`]. The
//! [`ObservableEventInitializer`] computes the names to add when an instance
//! is constructed:
//!
//! 1. the baseline lifecycle events, unless the class opted into
//!    [`Baseline::Explicit`]
//! 2. the class's declared events
//! 3. the events registered through the [`DynamicEventRegistry`]
//!
//! Each distinct base name contributes itself, `before<Name>` and
//! `after<Name>`, exactly once.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::class::ModelClassId;
use crate::config::{Baseline, HooksConfig};
use crate::name::EventName;
use crate::registry::DynamicEventRegistry;

/// Lifecycle events wrapped by default.
pub const BASELINE_EVENTS: [&str; 10] = [
    "creating",
    "created",
    "saving",
    "saved",
    "updating",
    "updated",
    "deleting",
    "deleted",
    "restoring",
    "restored",
];

// ─────────────────────────────────────────────────────────────────────────────
// ObservableEventSet
// ─────────────────────────────────────────────────────────────────────────────

/// Insertion-ordered set of event names a model dispatches through.
///
/// Inserting a name twice keeps the first position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObservableEventSet {
    events: IndexSet<EventName>,
}

impl ObservableEventSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: IndexSet::new(),
        }
    }

    /// Checks whether `name` is observable.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.events.contains(name)
    }

    /// Adds `name`, returning `true` if it was not yet present.
    pub fn insert(&mut self, name: impl Into<EventName>) -> bool {
        self.events.insert(name.into())
    }

    /// Returns the number of names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns `true` if the set holds no names.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Iterates the names in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &EventName> {
        self.events.iter()
    }

    /// Returns the position of `name`, if present.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.events.get_index_of(name)
    }

    /// Copies the names out as plain strings.
    #[must_use]
    pub fn to_strings(&self) -> Vec<String> {
        self.events.iter().map(ToString::to_string).collect()
    }
}

impl<N: Into<EventName>> Extend<N> for ObservableEventSet {
    fn extend<I: IntoIterator<Item = N>>(&mut self, iter: I) {
        self.events.extend(iter.into_iter().map(Into::into));
    }
}

impl<N: Into<EventName>> FromIterator<N> for ObservableEventSet {
    fn from_iter<I: IntoIterator<Item = N>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<'a> IntoIterator for &'a ObservableEventSet {
    type Item = &'a EventName;
    type IntoIter = indexmap::set::Iter<'a, EventName>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// ObservableEventInitializer
// ─────────────────────────────────────────────────────────────────────────────

/// Computes the observable names a model class needs for before/after
/// dispatch.
///
/// ```
/// use bookend_events::class::ModelClassId;
/// use bookend_events::config::{Baseline, HooksConfig};
/// use bookend_events::observable::ObservableEventInitializer;
/// use bookend_events::registry::DynamicEventRegistry;
///
/// struct Post;
///
/// let registry = DynamicEventRegistry::new();
/// registry.register(ModelClassId::of::<Post>(), "publishing");
///
/// let names = ObservableEventInitializer::new(&registry)
///     .with_config(HooksConfig::new().with_baseline(Baseline::Explicit))
///     .expand(ModelClassId::of::<Post>(), &[]);
///
/// assert_eq!(
///     names.to_strings(),
///     ["publishing", "beforePublishing", "afterPublishing"]
/// );
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ObservableEventInitializer<'a> {
    registry: &'a DynamicEventRegistry,
    config: HooksConfig,
}

impl<'a> ObservableEventInitializer<'a> {
    /// Creates an initializer reading from `registry` with the default config.
    #[must_use]
    pub fn new(registry: &'a DynamicEventRegistry) -> Self {
        Self {
            registry,
            config: HooksConfig::default(),
        }
    }

    /// Creates an initializer reading from the process-wide registry.
    #[must_use]
    pub fn global() -> ObservableEventInitializer<'static> {
        ObservableEventInitializer::new(DynamicEventRegistry::global())
    }

    /// Sets the class configuration.
    #[must_use]
    pub fn with_config(mut self, config: HooksConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the distinct base events for `class`, in source order.
    #[must_use]
    pub fn base_events(&self, class: ModelClassId, declared: &[&str]) -> IndexSet<EventName> {
        let baseline: &[&str] = match self.config.baseline {
            Baseline::Implicit => &BASELINE_EVENTS,
            Baseline::Explicit => &[],
        };

        baseline
            .iter()
            .chain(declared)
            .map(|name| EventName::new(*name))
            .chain(self.registry.event_names_for(class))
            .collect()
    }

    /// Expands every base event of `class` into its base, before and after
    /// names.
    #[must_use]
    pub fn expand(&self, class: ModelClassId, declared: &[&str]) -> ObservableEventSet {
        let bases = self.base_events(class, declared);
        let mut names = ObservableEventSet::new();

        for base in bases {
            let before = base.before();
            let after = base.after();
            names.insert(base);
            names.insert(before);
            names.insert(after);
        }

        tracing::debug!(
            class = %class,
            baseline = ?self.config.baseline,
            observable = names.len(),
            "computed observable events"
        );

        names
    }
}
