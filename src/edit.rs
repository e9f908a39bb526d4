//! Edit operation log and clipboard
//!
//! Makes registry edits reversible. Every mutating operation pushes a
//! self-contained, invertible entry; the cursor separates the undoable past
//! from the redoable future, and any new mutation truncates the redo tail.
//!
//! Drag-moves are bracketed by an explicit state machine so that a whole
//! drag commits as one history entry: [`EditLog::begin_move`] snapshots the
//! pre-move transform, [`EditLog::apply_move`] mutates live state without
//! touching history, and [`EditLog::end_move`] commits the net move.
//! Intermediate drag frames are never individually undoable.
//!
//! Operating on a missing object or an empty selection is a silent no-op
//! throughout, never an error.

use glam::DVec3;

use crate::scene::object::{SceneObject, Transform};
use crate::scene::registry::{ObjectId, SceneRegistry};

/// One reversible registry mutation.
#[derive(Debug, Clone)]
pub enum EditOp {
    /// Net transform change of one drag
    Move {
        id: ObjectId,
        before: Transform,
        after: Transform,
    },
    /// Object removal; `position` restores registry order on undo
    Remove { object: SceneObject, position: usize },
    /// Object insertion (paste)
    Insert { object: SceneObject },
}

#[derive(Debug, Clone, Default)]
enum DragState {
    #[default]
    Idle,
    Dragging { id: ObjectId, before: Transform },
}

/// Undo/redo history plus the one-slot clipboard.
#[derive(Debug, Clone, Default)]
pub struct EditLog {
    history: Vec<EditOp>,
    cursor: usize,
    clipboard: Option<SceneObject>,
    drag: DragState,
}

impl EditLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Clipboard
    // ========================================================================

    /// Snapshots an object into the clipboard. The snapshot is taken now;
    /// later edits to the source do not affect what paste produces.
    pub fn copy(&mut self, registry: &SceneRegistry, selection: Option<ObjectId>) {
        if let Some(object) = selection.and_then(|id| registry.get(id)) {
            self.clipboard = Some(object.clone());
        }
    }

    /// Copy plus delete.
    pub fn cut(&mut self, registry: &mut SceneRegistry, selection: Option<ObjectId>) {
        self.copy(registry, selection);
        self.delete(registry, selection);
    }

    /// Inserts the clipboard snapshot as a new object with a fresh id.
    /// Returns the new id, or `None` when the clipboard is empty.
    pub fn paste(&mut self, registry: &mut SceneRegistry) -> Option<ObjectId> {
        let mut object = self.clipboard.clone()?;
        object.id = registry.allocate_id();
        let id = object.id;

        if let Err(e) = registry.insert(object.clone()) {
            log::warn!("paste failed: {e}");
            return None;
        }
        self.push(EditOp::Insert { object });
        Some(id)
    }

    #[must_use]
    pub fn clipboard(&self) -> Option<&SceneObject> {
        self.clipboard.as_ref()
    }

    // ========================================================================
    // Discrete operations
    // ========================================================================

    /// Removes an object and records the removal.
    pub fn delete(&mut self, registry: &mut SceneRegistry, selection: Option<ObjectId>) {
        let Some(id) = selection else { return };
        if let Some((position, object)) = registry.remove(id) {
            self.push(EditOp::Remove { object, position });
        }
    }

    // ========================================================================
    // Drag-move bracketing
    // ========================================================================

    /// Starts a drag on the object, snapshotting its pre-move transform.
    /// A drag already in progress is left untouched.
    pub fn begin_move(&mut self, registry: &SceneRegistry, selection: Option<ObjectId>) {
        if matches!(self.drag, DragState::Dragging { .. }) {
            return;
        }
        if let Some(object) = selection.and_then(|id| registry.get(id)) {
            self.drag = DragState::Dragging {
                id: object.id,
                before: object.transform,
            };
        }
    }

    /// Applies a translation to the dragged object. Not recorded.
    pub fn apply_move(&mut self, registry: &mut SceneRegistry, delta: DVec3) {
        if let DragState::Dragging { id, .. } = self.drag
            && let Some(object) = registry.get_mut(id)
        {
            object.transform.position += delta;
        }
    }

    /// Commits the drag as one history entry. A drag that ends where it
    /// started records nothing.
    pub fn end_move(&mut self, registry: &SceneRegistry) {
        let drag = std::mem::take(&mut self.drag);
        if let DragState::Dragging { id, before } = drag
            && let Some(object) = registry.get(id)
        {
            let after = object.transform;
            if after != before {
                self.push(EditOp::Move { id, before, after });
            }
        }
    }

    #[must_use]
    pub fn drag_active(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    /// The object currently being dragged, if any.
    #[must_use]
    pub fn dragging(&self) -> Option<ObjectId> {
        match self.drag {
            DragState::Dragging { id, .. } => Some(id),
            DragState::Idle => None,
        }
    }

    // ========================================================================
    // History
    // ========================================================================

    /// Reverts the most recent entry. Empty past: no-op.
    pub fn undo(&mut self, registry: &mut SceneRegistry) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;

        match &self.history[self.cursor] {
            EditOp::Move { id, before, .. } => {
                if let Some(object) = registry.get_mut(*id) {
                    object.transform = *before;
                }
            }
            EditOp::Remove { object, position } => {
                if let Err(e) = registry.insert_at(*position, object.clone()) {
                    log::warn!("undo of delete failed: {e}");
                }
            }
            EditOp::Insert { object } => {
                registry.remove(object.id);
            }
        }
    }

    /// Re-applies the most recently undone entry. Empty future: no-op.
    pub fn redo(&mut self, registry: &mut SceneRegistry) {
        if self.cursor == self.history.len() {
            return;
        }

        match &self.history[self.cursor] {
            EditOp::Move { id, after, .. } => {
                if let Some(object) = registry.get_mut(*id) {
                    object.transform = *after;
                }
            }
            EditOp::Remove { object, .. } => {
                registry.remove(object.id);
            }
            EditOp::Insert { object } => {
                if let Err(e) = registry.insert(object.clone()) {
                    log::warn!("redo of paste failed: {e}");
                }
            }
        }

        self.cursor += 1;
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor < self.history.len()
    }

    /// Entries currently in the history (past and future).
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    fn push(&mut self, op: EditOp) {
        self.history.truncate(self.cursor);
        self.history.push(op);
        self.cursor = self.history.len();
    }
}
