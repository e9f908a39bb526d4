//! Scene object registry
//!
//! A flat, ordered list of the placed objects for the current chunk plus an
//! id index. Iteration order is insertion order and is part of the contract:
//! picking breaks distance ties by first-encountered, so the order must
//! survive edits (undo of a delete restores the object at its old index).

use rustc_hash::FxHashMap;

use crate::errors::{LoamError, Result};
use crate::scene::object::SceneObject;

/// Persisted object identity.
pub type ObjectId = i32;

/// Sentinel used at the persistence/dialog boundary for "no selection".
pub const NO_OBJECT: ObjectId = -1;

/// Converts the dialog/status sentinel into the in-memory selection.
#[must_use]
pub fn selection_from_sentinel(raw: i32) -> Option<ObjectId> {
    (raw != NO_OBJECT).then_some(raw)
}

/// Converts the in-memory selection into the dialog/status sentinel.
#[must_use]
pub fn selection_to_sentinel(selection: Option<ObjectId>) -> i32 {
    selection.unwrap_or(NO_OBJECT)
}

/// Ordered object list mirroring the persisted rows.
#[derive(Debug, Clone, Default)]
pub struct SceneRegistry {
    objects: Vec<SceneObject>,
    index: FxHashMap<ObjectId, usize>,
}

impl SceneRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from loaded objects, keeping their order.
    ///
    /// Rows with a colliding id violate the persistence invariant; the later
    /// row is dropped with a warning rather than corrupting the index.
    #[must_use]
    pub fn from_objects(objects: Vec<SceneObject>) -> Self {
        let mut registry = Self::new();
        for object in objects {
            let id = object.id;
            if let Err(e) = registry.insert(object) {
                log::warn!("skipping object {id}: {e}");
            }
        }
        registry
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: ObjectId) -> bool {
        self.index.contains_key(&id)
    }

    #[must_use]
    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.index.get(&id).map(|&i| &self.objects[i])
    }

    #[must_use]
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.index.get(&id).map(|&i| &mut self.objects[i])
    }

    /// Position of an object in the iteration order.
    #[must_use]
    pub fn position_of(&self, id: ObjectId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// Iterates objects in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter()
    }

    /// Appends an object.
    pub fn insert(&mut self, object: SceneObject) -> Result<()> {
        if self.index.contains_key(&object.id) {
            return Err(LoamError::DuplicateId(object.id));
        }
        self.index.insert(object.id, self.objects.len());
        self.objects.push(object);
        Ok(())
    }

    /// Inserts an object at a specific position in the order.
    ///
    /// Used by undo to restore a deleted object exactly where it was.
    pub fn insert_at(&mut self, position: usize, object: SceneObject) -> Result<()> {
        if self.index.contains_key(&object.id) {
            return Err(LoamError::DuplicateId(object.id));
        }
        let position = position.min(self.objects.len());
        self.objects.insert(position, object);
        self.rebuild_index();
        Ok(())
    }

    /// Removes an object, returning it together with its old position.
    pub fn remove(&mut self, id: ObjectId) -> Option<(usize, SceneObject)> {
        let position = self.index.remove(&id)?;
        let object = self.objects.remove(position);
        self.rebuild_index();
        Some((position, object))
    }

    /// Allocates a fresh id, one past the largest in use.
    #[must_use]
    pub fn allocate_id(&self) -> ObjectId {
        self.objects.iter().map(|o| o.id).max().map_or(1, |m| m + 1)
    }

    pub fn clear(&mut self) {
        self.objects.clear();
        self.index.clear();
    }

    fn rebuild_index(&mut self) {
        self.index.clear();
        for (i, object) in self.objects.iter().enumerate() {
            self.index.insert(object.id, i);
        }
    }
}
