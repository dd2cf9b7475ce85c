//! Class-level listener storage for reference host models.
//!
//! Listeners are kept per model class and per event name, in registration
//! order. Reads hand out a snapshot of the listener handles so a listener may
//! register further listeners while it runs.

use core::any::Any;
use std::sync::LazyLock;
use std::thread::{self, ThreadId};

use bookend_events::class::ModelClassId;
use bookend_events::listener::Listener;
use bookend_events::name::EventName;
use hashbrown::HashMap;
use parking_lot::{Condvar, Mutex, RwLock};

static GLOBAL: LazyLock<ListenerStore> = LazyLock::new(ListenerStore::new);

type EventListeners<M> = HashMap<EventName, Vec<Listener<M>>>;

#[derive(Clone, Copy, PartialEq, Eq)]
enum BootState {
    Booting(ThreadId),
    Booted,
}

/// Per-class listener lists plus the set of booted classes.
///
/// Each class entry is a type-erased `HashMap<EventName, Vec<Listener<M>>>`
/// keyed by the class of `M`, so it always downcasts to the type it was
/// created with.
#[derive(Default)]
pub struct ListenerStore {
    classes: RwLock<HashMap<ModelClassId, Box<dyn Any + Send + Sync>>>,
    boot_states: Mutex<HashMap<ModelClassId, BootState>>,
    boot_done: Condvar,
}

impl ListenerStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            classes: RwLock::new(HashMap::new()),
            boot_states: Mutex::new(HashMap::new()),
            boot_done: Condvar::new(),
        }
    }

    /// Returns the process-wide store used by [`Model`](crate::model::Model).
    #[must_use]
    pub fn global() -> &'static ListenerStore {
        &GLOBAL
    }

    /// Appends `listener` to the list for `event` on `class`.
    ///
    /// Returns `false`, storing nothing, when `class` already holds listeners
    /// of another model type.
    pub fn register<M: 'static>(
        &self,
        class: ModelClassId,
        event: EventName,
        listener: Listener<M>,
    ) -> bool {
        let mut classes = self.classes.write();
        let entry = classes
            .entry(class)
            .or_insert_with(|| Box::new(EventListeners::<M>::new()));

        let Some(events) = entry.downcast_mut::<EventListeners<M>>() else {
            tracing::warn!(class = %class, event = %event, "listener type does not match class store");
            return false;
        };

        let listeners = events.entry(event).or_default();
        listeners.push(listener);
        tracing::trace!(class = %class, listeners = listeners.len(), "stored listener");
        true
    }

    /// Returns a snapshot of the listeners for `event` on `class`.
    #[must_use]
    pub fn listeners<M: 'static>(&self, class: ModelClassId, event: &str) -> Vec<Listener<M>> {
        self.classes
            .read()
            .get(&class)
            .and_then(|entry| entry.downcast_ref::<EventListeners<M>>())
            .and_then(|events| events.get(event))
            .cloned()
            .unwrap_or_default()
    }

    /// Checks whether any listener is registered for `event` on `class`.
    #[must_use]
    pub fn has_listeners<M: 'static>(&self, class: ModelClassId, event: &str) -> bool {
        !self.listeners::<M>(class, event).is_empty()
    }

    /// Removes every listener of `class`.
    pub fn flush(&self, class: ModelClassId) {
        if self.classes.write().remove(&class).is_some() {
            tracing::debug!(class = %class, "flushed event listeners");
        }
    }

    /// Runs `boot` the first time it is called for `class`.
    ///
    /// Other threads calling in while `boot` runs block until it returns, so
    /// nobody fires events before the boot listeners exist. The booting thread
    /// itself returns immediately, so `boot` may construct instances of its
    /// own class.
    pub fn boot_once(&self, class: ModelClassId, boot: impl FnOnce()) {
        let current = thread::current().id();
        let mut states = self.boot_states.lock();
        loop {
            match states.get(&class).copied() {
                None => break,
                Some(BootState::Booted) => return,
                Some(BootState::Booting(owner)) if owner == current => return,
                Some(BootState::Booting(_)) => self.boot_done.wait(&mut states),
            }
        }
        states.insert(class, BootState::Booting(current));
        drop(states);

        let _finish = BootGuard { store: self, class };
        tracing::debug!(class = %class, "booting model class");
        boot();
    }

    /// Checks whether `class` has finished booting.
    #[must_use]
    pub fn is_booted(&self, class: ModelClassId) -> bool {
        self.boot_states.lock().get(&class) == Some(&BootState::Booted)
    }
}

/// Marks a class booted and wakes waiters, even if `boot` panicked.
struct BootGuard<'a> {
    store: &'a ListenerStore,
    class: ModelClassId,
}

impl Drop for BootGuard<'_> {
    fn drop(&mut self) {
        self.store
            .boot_states
            .lock()
            .insert(self.class, BootState::Booted);
        self.store.boot_done.notify_all();
    }
}

impl core::fmt::Debug for ListenerStore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ListenerStore")
            .field("classes", &self.classes.read().len())
            .field("booted", &self.boot_states.lock().len())
            .finish()
    }
}
