//! Reference host models.
//!
//! [`Model<C>`] is an attribute-bag record whose class `C` supplies the table,
//! soft-delete behavior, declared events and boot-time listeners. It
//! implements [`ObservableModel`], so every model gets the full
//! [`BeforeAndAfterEvents`] registration API and all lifecycle operations fire
//! through the before/base/after dispatch.
//!
//! # Lifecycle event order
//!
//! | Operation | Events |
//! |-----------|--------|
//! | insert | `saving`, `creating`, *(insert)*, `created`, `saved` |
//! | update | `saving`, `updating`, *(write)*, `updated`, `saved` |
//! | delete | `deleting`, *(soft or hard delete)*, `deleted` |
//! | force delete | `forceDeleting`, `deleting`, *(hard delete)*, `deleted`, `forceDeleted` |
//! | restore | `restoring`, *(update save sequence)*, `restored` |
//!
//! `updating` and `updated` only fire when the model is dirty. Present-tense
//! events halt: a [`Verdict::Stop`] aborts the operation, which returns
//! `Ok(false)` and leaves the stored row untouched.
//!
//! # Example
//!
//! ```
//! use bookend_model::prelude::*;
//! use serde_json::json;
//!
//! struct Post;
//!
//! impl ModelClass for Post {
//!     const TABLE: &'static str = "posts";
//! }
//!
//! Model::<Post>::before_creating(|post: &mut Model<Post>| {
//!     post.set("slug", "hello-world");
//! });
//!
//! let store = MemoryStore::new();
//! let post = Model::<Post>::create(&store, [("title", json!("Hello world"))]).unwrap();
//!
//! assert!(post.exists());
//! assert_eq!(post.get("slug"), Some(&json!("hello-world")));
//! ```

use core::fmt;
use core::marker::PhantomData;
use std::time::{SystemTime, UNIX_EPOCH};

use bookend_events::class::ModelClassId;
use bookend_events::config::HooksConfig;
use bookend_events::error::HookError;
use bookend_events::host::ObservableModel;
use bookend_events::listener::{Listener, Verdict};
use bookend_events::name::EventName;
use bookend_events::observable::ObservableEventSet;
use bookend_events::registration::BeforeAndAfterEvents;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::error::ModelError;
use crate::listeners::ListenerStore;
use crate::store::{KEY_COLUMN, MemoryStore, Row};

/// Column holding the soft-delete timestamp.
pub const DELETED_AT_COLUMN: &str = "deleted_at";

/// Events every reference host model can observe natively.
pub const NATIVE_EVENTS: [&str; 15] = [
    "retrieved",
    "creating",
    "created",
    "updating",
    "updated",
    "saving",
    "saved",
    "restoring",
    "restored",
    "replicating",
    "deleting",
    "deleted",
    "forceDeleting",
    "forceDeleted",
    "trashed",
];

/// Static description of a model class.
///
/// Implemented on a marker type; [`Model<C>`] is the record type.
pub trait ModelClass: Send + Sync + 'static {
    /// Table rows are stored in.
    const TABLE: &'static str;

    /// Whether `delete` marks rows as trashed instead of removing them.
    const SOFT_DELETES: bool = false;

    /// Extra events the class wants wrapped with before/after phases.
    const EVENTS: &'static [&'static str] = &[];

    /// Hook configuration for the class.
    const HOOKS: HooksConfig = HooksConfig::new();

    /// Registers class-level listeners. Runs once, before the first instance
    /// is built.
    fn boot() {}
}

/// A record of model class `C`.
pub struct Model<C> {
    attributes: Row,
    original: Row,
    exists: bool,
    was_recently_created: bool,
    force_deleting: bool,
    observable: ObservableEventSet,
    _class: PhantomData<fn() -> C>,
}

impl<C: ModelClass> Model<C> {
    /// Builds an empty, unsaved instance.
    #[must_use]
    pub fn new() -> Self {
        ListenerStore::global().boot_once(Self::class_id(), C::boot);

        let mut model = Self {
            attributes: Row::new(),
            original: Row::new(),
            exists: false,
            was_recently_created: false,
            force_deleting: false,
            observable: NATIVE_EVENTS.into_iter().collect(),
            _class: PhantomData,
        };
        model.initialize_before_and_after_events();
        model
    }

    /// Builds an unsaved instance filled with `attributes`.
    #[must_use]
    pub fn with_attributes<I, K, V>(attributes: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mut model = Self::new();
        model.fill(attributes);
        model
    }

    /// Builds an instance from `attributes` and saves it.
    ///
    /// A vetoed save still returns the instance, with
    /// [`exists`](Self::exists) left `false`.
    ///
    /// # Errors
    ///
    /// Propagates listener errors.
    pub fn create<I, K, V>(store: &MemoryStore, attributes: I) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mut model = Self::with_attributes(attributes);
        model.save(store)?;
        Ok(model)
    }

    /// Loads the row `id`, skipping trashed rows.
    ///
    /// # Errors
    ///
    /// Propagates `retrieved` listener errors.
    pub fn find(store: &MemoryStore, id: u64) -> Result<Option<Self>, ModelError> {
        match store.get(C::TABLE, id) {
            Some(row) if !is_trashed(&row) => Self::from_row(row).map(Some),
            _ => Ok(None),
        }
    }

    /// Loads the row `id`, including trashed rows.
    ///
    /// # Errors
    ///
    /// Propagates `retrieved` listener errors.
    pub fn find_with_trashed(store: &MemoryStore, id: u64) -> Result<Option<Self>, ModelError> {
        store.get(C::TABLE, id).map(Self::from_row).transpose()
    }

    /// Loads the row `id` or fails.
    ///
    /// # Errors
    ///
    /// [`ModelError::NotFound`] when no live row has that key.
    pub fn find_or_fail(store: &MemoryStore, id: u64) -> Result<Self, ModelError> {
        Self::find(store, id)?.ok_or_else(|| ModelError::NotFound {
            class: class_name::<C>(),
            id,
        })
    }

    /// Loads every live row.
    ///
    /// # Errors
    ///
    /// Propagates `retrieved` listener errors.
    pub fn all(store: &MemoryStore) -> Result<Vec<Self>, ModelError> {
        store
            .select(C::TABLE, |row| !is_trashed(row))
            .into_iter()
            .map(Self::from_row)
            .collect()
    }

    /// Counts live rows.
    #[must_use]
    pub fn count(store: &MemoryStore) -> usize {
        store.count(C::TABLE, |row| !is_trashed(row))
    }

    /// Counts rows, trashed ones included.
    #[must_use]
    pub fn count_with_trashed(store: &MemoryStore) -> usize {
        store.count(C::TABLE, |_| true)
    }

    /// Removes every listener registered for this class.
    pub fn flush_event_listeners() {
        ListenerStore::global().flush(Self::class_id());
    }

    fn from_row(row: Row) -> Result<Self, ModelError> {
        let mut model = Self::new();
        model.original = row.clone();
        model.attributes = row;
        model.exists = true;
        model.fire_event("retrieved", false)?;
        Ok(model)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Attributes
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the primary key, once the model has been inserted.
    #[must_use]
    pub fn id(&self) -> Option<u64> {
        self.attributes.get(KEY_COLUMN).and_then(Value::as_u64)
    }

    /// Returns an attribute value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Returns a string attribute.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Sets an attribute value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Sets several attributes.
    pub fn fill<I, K, V>(&mut self, attributes: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        for (key, value) in attributes {
            self.set(key, value);
        }
        self
    }

    /// Returns all attributes.
    #[must_use]
    pub fn attributes(&self) -> &Row {
        &self.attributes
    }

    /// Returns the attributes that differ from the last synced state.
    #[must_use]
    pub fn dirty(&self) -> Row {
        self.attributes
            .iter()
            .filter(|(key, value)| self.original.get(key.as_str()) != Some(*value))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Checks whether any attribute changed since the last sync.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        !self.dirty().is_empty()
    }

    /// Whether the model has a stored row.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.exists
    }

    /// Whether the model was inserted during its current lifetime.
    #[must_use]
    pub fn was_recently_created(&self) -> bool {
        self.was_recently_created
    }

    /// Whether the model is soft deleted.
    #[must_use]
    pub fn trashed(&self) -> bool {
        is_trashed(&self.attributes)
    }

    fn sync_original(&mut self) {
        self.original = self.attributes.clone();
    }

    fn key(&self) -> Result<u64, ModelError> {
        self.id().ok_or_else(|| ModelError::MissingKey {
            class: class_name::<C>(),
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lifecycle operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Inserts or updates the model.
    ///
    /// Returns `false` when a listener vetoed the save.
    ///
    /// # Errors
    ///
    /// Propagates listener errors. [`ModelError::NotFound`] if the stored row
    /// of an existing model is gone.
    pub fn save(&mut self, store: &MemoryStore) -> Result<bool, ModelError> {
        if self.fire_event("saving", true)?.is_stop() {
            return Ok(false);
        }

        let saved = if !self.exists {
            self.perform_insert(store)?
        } else if self.is_dirty() {
            self.perform_update(store)?
        } else {
            true
        };

        if saved {
            self.fire_event("saved", false)?;
            self.sync_original();
        }
        Ok(saved)
    }

    /// Fills `attributes` and saves.
    ///
    /// Returns `false` for a model that does not exist or a vetoed save.
    ///
    /// # Errors
    ///
    /// See [`save`](Self::save).
    pub fn update<I, K, V>(&mut self, store: &MemoryStore, attributes: I) -> Result<bool, ModelError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        if !self.exists {
            return Ok(false);
        }
        self.fill(attributes);
        self.save(store)
    }

    fn perform_insert(&mut self, store: &MemoryStore) -> Result<bool, ModelError> {
        if self.fire_event("creating", true)?.is_stop() {
            return Ok(false);
        }

        let id = store.insert(C::TABLE, self.attributes.clone());
        self.attributes.insert(KEY_COLUMN.to_string(), Value::from(id));
        self.exists = true;
        self.was_recently_created = true;
        tracing::debug!(class = %Self::class_id(), id, "inserted model");

        self.fire_event("created", false)?;
        Ok(true)
    }

    fn perform_update(&mut self, store: &MemoryStore) -> Result<bool, ModelError> {
        if self.fire_event("updating", true)?.is_stop() {
            return Ok(false);
        }

        let dirty = self.dirty();
        if !dirty.is_empty() {
            let id = self.key()?;
            if !store.update(C::TABLE, id, &dirty) {
                return Err(ModelError::NotFound {
                    class: class_name::<C>(),
                    id,
                });
            }
            tracing::debug!(class = %Self::class_id(), id, columns = dirty.len(), "updated model");
            self.fire_event("updated", false)?;
        }
        Ok(true)
    }

    /// Deletes the model: soft for classes with
    /// [`SOFT_DELETES`](ModelClass::SOFT_DELETES), hard otherwise.
    ///
    /// Returns `false` for a model that does not exist or a vetoed delete.
    ///
    /// # Errors
    ///
    /// Propagates listener errors. [`ModelError::MissingKey`] if the model
    /// exists without a key, [`ModelError::NotFound`] if a soft delete finds
    /// its row gone.
    pub fn delete(&mut self, store: &MemoryStore) -> Result<bool, ModelError> {
        if !self.exists {
            return Ok(false);
        }
        let id = self.key()?;

        if self.fire_event("deleting", true)?.is_stop() {
            return Ok(false);
        }

        if C::SOFT_DELETES && !self.force_deleting {
            self.run_soft_delete(store, id)?;
        } else {
            store.remove(C::TABLE, id);
            self.exists = false;
            tracing::debug!(class = %Self::class_id(), id, "removed model");
        }

        self.fire_event("deleted", false)?;
        Ok(true)
    }

    fn run_soft_delete(&mut self, store: &MemoryStore, id: u64) -> Result<(), ModelError> {
        let now = Value::from(unix_timestamp());
        let changes = Row::from([(DELETED_AT_COLUMN.to_string(), now.clone())]);
        if !store.update(C::TABLE, id, &changes) {
            return Err(ModelError::NotFound {
                class: class_name::<C>(),
                id,
            });
        }

        self.attributes.insert(DELETED_AT_COLUMN.to_string(), now.clone());
        self.original.insert(DELETED_AT_COLUMN.to_string(), now);
        tracing::debug!(class = %Self::class_id(), id, "trashed model");

        self.fire_event("trashed", false)?;
        Ok(())
    }

    /// Permanently removes the model, bypassing soft deletes.
    ///
    /// # Errors
    ///
    /// See [`delete`](Self::delete).
    pub fn force_delete(&mut self, store: &MemoryStore) -> Result<bool, ModelError> {
        if !C::SOFT_DELETES {
            return self.delete(store);
        }

        if self.fire_event("forceDeleting", true)?.is_stop() {
            return Ok(false);
        }

        self.force_deleting = true;
        let deleted = self.delete(store);
        self.force_deleting = false;

        let deleted = deleted?;
        if deleted {
            self.fire_event("forceDeleted", false)?;
        }
        Ok(deleted)
    }

    /// Clears the soft-delete marker and saves.
    ///
    /// `restored` fires after the save whether or not the save went through.
    ///
    /// # Errors
    ///
    /// [`ModelError::NotSoftDeletable`] for classes without soft deletes.
    /// Otherwise see [`save`](Self::save).
    pub fn restore(&mut self, store: &MemoryStore) -> Result<bool, ModelError> {
        if !C::SOFT_DELETES {
            return Err(ModelError::NotSoftDeletable {
                class: class_name::<C>(),
            });
        }

        if self.fire_event("restoring", true)?.is_stop() {
            return Ok(false);
        }

        self.attributes.insert(DELETED_AT_COLUMN.to_string(), Value::Null);
        self.exists = true;
        let saved = self.save(store)?;

        self.fire_event("restored", false)?;
        Ok(saved)
    }

    /// Reloads the model from `store`, trashed rows included.
    ///
    /// Returns `None` for models that were never saved or whose row is gone.
    ///
    /// # Errors
    ///
    /// Propagates `retrieved` listener errors.
    pub fn fresh(&self, store: &MemoryStore) -> Result<Option<Self>, ModelError> {
        match (self.exists, self.id()) {
            (true, Some(id)) => Self::find_with_trashed(store, id),
            _ => Ok(None),
        }
    }

    /// Copies the model's attributes into a new, unsaved instance.
    ///
    /// Fires `replicating` on the copy.
    ///
    /// # Errors
    ///
    /// Propagates `replicating` listener errors.
    pub fn replicate(&self) -> Result<Self, ModelError> {
        let mut copy = Self::with_attributes(
            self.attributes
                .iter()
                .filter(|(key, _)| key.as_str() != KEY_COLUMN)
                .map(|(key, value)| (key.clone(), value.clone())),
        );
        copy.fire_event("replicating", false)?;
        Ok(copy)
    }
}

impl<C: ModelClass> Default for Model<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ModelClass> ObservableModel for Model<C> {
    fn class_id() -> ModelClassId {
        ModelClassId::of::<C>()
    }

    fn declared_events() -> &'static [&'static str] {
        C::EVENTS
    }

    fn hooks_config() -> HooksConfig {
        C::HOOKS
    }

    fn observable_events(&self) -> &ObservableEventSet {
        &self.observable
    }

    fn add_observable_events(&mut self, names: ObservableEventSet) {
        self.observable.extend(names.iter().cloned());
    }

    fn register_model_event(name: EventName, listener: Listener<Self>) {
        let stored = ListenerStore::global().register(Self::class_id(), name, listener);
        debug_assert!(stored, "listener store entry for {} holds another model type", Self::class_id());
    }

    fn fire_model_event(&mut self, name: &EventName, halt: bool) -> Result<Verdict, HookError> {
        let listeners = ListenerStore::global().listeners::<Self>(Self::class_id(), name.as_str());
        tracing::trace!(
            class = %Self::class_id(),
            event = %name,
            halt,
            listeners = listeners.len(),
            "firing model event"
        );

        for listener in listeners {
            if listener.call(self)?.is_stop() && halt {
                return Ok(Verdict::Stop);
            }
        }
        Ok(Verdict::Proceed)
    }
}

/// Serializes as the attribute map.
impl<C> Serialize for Model<C> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.attributes.serialize(serializer)
    }
}

impl<C: ModelClass> fmt::Debug for Model<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("class", &Self::class_id())
            .field("attributes", &self.attributes)
            .field("exists", &self.exists)
            .finish_non_exhaustive()
    }
}

fn is_trashed(row: &Row) -> bool {
    row.get(DELETED_AT_COLUMN).is_some_and(|value| !value.is_null())
}

fn class_name<C: 'static>() -> String {
    ModelClassId::of::<C>().short_name().to_string()
}

fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default()
}
