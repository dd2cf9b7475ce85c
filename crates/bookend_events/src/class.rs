//! Model class identity.
//!
//! Every per-class store in Bookend (the dynamic event registry, a host's
//! listener store) is keyed by a [`ModelClassId`]. Any `'static` type can act
//! as a class marker.

use core::any::TypeId;
use core::fmt;

/// Identifier for a model class, derived from a marker type.
///
/// Wraps a `TypeId` together with the type name, which is kept for logging
/// and error messages only. Equality and hashing use the `TypeId`.
///
/// ```
/// use bookend_events::class::ModelClassId;
///
/// struct Post;
/// struct Comment;
///
/// assert_eq!(ModelClassId::of::<Post>(), ModelClassId::of::<Post>());
/// assert_ne!(ModelClassId::of::<Post>(), ModelClassId::of::<Comment>());
/// ```
#[derive(Clone, Copy)]
pub struct ModelClassId {
    type_id: TypeId,
    type_name: &'static str,
}

impl ModelClassId {
    /// Creates the identifier for the class marker `C`.
    #[must_use]
    pub fn of<C: 'static + ?Sized>() -> Self {
        Self {
            type_id: TypeId::of::<C>(),
            type_name: core::any::type_name::<C>(),
        }
    }

    /// Returns the underlying `TypeId`.
    #[must_use]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Returns the fully-qualified type name.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns the last path segment of the type name, e.g. `Post`.
    #[must_use]
    pub fn short_name(&self) -> &'static str {
        let without_generics = self
            .type_name
            .split_once('<')
            .map_or(self.type_name, |(head, _)| head);
        without_generics
            .rsplit("::")
            .next()
            .unwrap_or(without_generics)
    }
}

impl PartialEq for ModelClassId {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for ModelClassId {}

impl core::hash::Hash for ModelClassId {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Debug for ModelClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ModelClassId").field(&self.type_name).finish()
    }
}

impl fmt::Display for ModelClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}
