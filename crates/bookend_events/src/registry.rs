//! Per-class registry of dynamically registered event names.
//!
//! [`before_event`](crate::registration::BeforeAndAfterEvents::before_event)
//! and [`after_event`](crate::registration::BeforeAndAfterEvents::after_event)
//! record the base event name here so the
//! [`ObservableEventInitializer`](crate::observable::ObservableEventInitializer)
//! picks it up on the next instance construction.
//!
//! The registry is append-only. Names are stored once per class, in the order
//! they were first registered.

use std::sync::LazyLock;

use hashbrown::HashMap;
use parking_lot::RwLock;

use crate::class::ModelClassId;
use crate::name::EventName;

static GLOBAL: LazyLock<DynamicEventRegistry> = LazyLock::new(DynamicEventRegistry::new);

/// Mapping from model class to the custom base event names registered for it.
///
/// # Thread Safety
///
/// Inserts take a write lock for the whole check-then-push, so concurrent
/// registrations of the same name for the same class collapse into one entry.
#[derive(Default)]
pub struct DynamicEventRegistry {
    events: RwLock<HashMap<ModelClassId, Vec<EventName>>>,
}

impl DynamicEventRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the process-wide registry, creating it on first use.
    #[must_use]
    pub fn global() -> &'static DynamicEventRegistry {
        &GLOBAL
    }

    /// Records `event` for `class` unless it is already present.
    ///
    /// Returns `true` when the name was newly added.
    pub fn register(&self, class: ModelClassId, event: impl Into<EventName>) -> bool {
        let event = event.into();
        let mut events = self.events.write();
        let names = events.entry(class).or_default();

        if names.contains(&event) {
            return false;
        }

        tracing::debug!(class = %class, event = %event, "registered dynamic event");
        names.push(event);
        true
    }

    /// Returns the names registered for `class`, in registration order.
    ///
    /// Classes that never registered anything yield an empty list.
    #[must_use]
    pub fn event_names_for(&self, class: ModelClassId) -> Vec<EventName> {
        self.events.read().get(&class).cloned().unwrap_or_default()
    }

    /// Checks whether `event` has been registered for `class`.
    #[must_use]
    pub fn contains(&self, class: ModelClassId, event: &str) -> bool {
        self.events
            .read()
            .get(&class)
            .is_some_and(|names| names.iter().any(|name| name == event))
    }

    /// Returns the number of classes with at least one registration attempt.
    #[must_use]
    pub fn class_count(&self) -> usize {
        self.events.read().len()
    }
}

impl core::fmt::Debug for DynamicEventRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DynamicEventRegistry")
            .field("classes", &self.class_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    struct Post;
    struct Comment;

    #[test]
    fn unknown_class_has_no_events() {
        let registry = DynamicEventRegistry::new();
        assert!(registry.event_names_for(ModelClassId::of::<Post>()).is_empty());
        assert!(!registry.contains(ModelClassId::of::<Post>(), "publishing"));
    }

    #[test]
    fn register_is_idempotent() {
        let registry = DynamicEventRegistry::new();
        let class = ModelClassId::of::<Post>();

        assert!(registry.register(class, "publishing"));
        assert!(!registry.register(class, "publishing"));
        assert!(registry.register(class, "archiving"));

        assert_eq!(
            registry.event_names_for(class),
            vec![EventName::new("publishing"), EventName::new("archiving")]
        );
    }

    #[test]
    fn classes_are_isolated() {
        let registry = DynamicEventRegistry::new();
        registry.register(ModelClassId::of::<Post>(), "publishing");

        assert!(registry.contains(ModelClassId::of::<Post>(), "publishing"));
        assert!(!registry.contains(ModelClassId::of::<Comment>(), "publishing"));
        assert_eq!(registry.class_count(), 1);
    }

    #[test]
    fn names_are_case_sensitive() {
        let registry = DynamicEventRegistry::new();
        let class = ModelClassId::of::<Post>();

        registry.register(class, "customEvent");
        registry.register(class, "CustomEvent");

        assert_eq!(registry.event_names_for(class).len(), 2);
    }

    #[test]
    fn concurrent_registration_keeps_single_entry() {
        let registry = Arc::new(DynamicEventRegistry::new());
        let class = ModelClassId::of::<Post>();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || registry.register(class, "publishing"))
            })
            .collect();

        let inserted = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .filter(|inserted| *inserted)
            .count();

        assert_eq!(inserted, 1, "exactly one thread should insert");
        assert_eq!(registry.event_names_for(class).len(), 1);
    }

    #[test]
    fn global_registry_is_shared() {
        struct GlobalProbe;
        let class = ModelClassId::of::<GlobalProbe>();

        DynamicEventRegistry::global().register(class, "probing");
        assert!(DynamicEventRegistry::global().contains(class, "probing"));
    }
}
