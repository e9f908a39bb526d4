//! The editor tool
//!
//! [`Editor`] owns the tool state — registry, terrain, edit log, input
//! snapshot, dispatcher, camera, selection — and advances it one tick at a
//! time. Everything runs on the thread that pumps the window messages; file
//! and store I/O are synchronous and user-initiated.
//!
//! Per tick:
//! 1. capture the continuous commands and run the action dispatcher
//! 2. apply the fired action, if any (picking starts a drag bracket)
//! 3. continue or commit an in-flight drag from the mouse state
//! 4. reconcile the selection dialog's highlight while it is open
//! 5. update the camera

use glam::{DVec3, Vec2};
use rustc_hash::FxHashMap;

use crate::camera::{EditorCamera, Viewport};
use crate::edit::EditLog;
use crate::errors::Result;
use crate::input::{Dispatcher, EditAction, FrameCommands, InputState};
use crate::persist::SceneStore;
use crate::picking::{self, PickTarget, SubMeshBounds};
use crate::scene::registry::{ObjectId, SceneRegistry, selection_to_sentinel};
use crate::scene::SceneObject;
use crate::terrain::TerrainMesh;

/// State of the companion selection dialog for this tick.
///
/// The dialog is modeless and pumped by the same loop; while it is open the
/// editor reconciles the dialog's highlighted row against the live
/// selection once per tick, and mouse gestures in the viewport are
/// suppressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogState {
    Closed,
    Open {
        /// The row the dialog highlighted on the previous tick
        previous_highlight: Option<ObjectId>,
    },
}

impl DialogState {
    #[must_use]
    pub fn is_open(self) -> bool {
        matches!(self, Self::Open { .. })
    }
}

/// The editing core: tool state plus the per-tick update.
pub struct Editor {
    pub registry: SceneRegistry,
    pub terrain: TerrainMesh,
    pub input: InputState,
    pub camera: EditorCamera,

    store: Box<dyn SceneStore>,
    edit_log: EditLog,
    dispatcher: Dispatcher,
    viewport: Viewport,
    selection: Option<ObjectId>,
    wireframe: bool,

    /// Sub-mesh bounds per object, supplied by whatever loads the models.
    /// Objects without an entry fall back to a unit cube.
    bounds: FxHashMap<ObjectId, SubMeshBounds>,
    default_bounds: SubMeshBounds,
}

impl Editor {
    #[must_use]
    pub fn new(store: Box<dyn SceneStore>, viewport: Viewport) -> Self {
        Self {
            registry: SceneRegistry::new(),
            terrain: TerrainMesh::new(),
            input: InputState::new(),
            camera: EditorCamera::new(),
            store,
            edit_log: EditLog::new(),
            dispatcher: Dispatcher::new(),
            viewport,
            selection: None,
            wireframe: false,
            bounds: FxHashMap::default(),
            default_bounds: SubMeshBounds::from_elem(crate::picking::BoundingBox::unit(), 1),
        }
    }

    // ========================================================================
    // Load / Save
    // ========================================================================

    /// Loads the scene and the chunk from the store.
    ///
    /// Persistence being unavailable is not fatal: the tool starts with an
    /// empty scene and reports the failure. A missing or truncated heightmap
    /// likewise leaves the terrain in its previous state.
    pub fn load(&mut self) {
        match self.store.load_objects() {
            Ok(records) => {
                let objects: Vec<SceneObject> =
                    records.iter().map(SceneObject::from_record).collect();
                self.registry = SceneRegistry::from_objects(objects);
                log::info!("loaded {} scene objects", self.registry.len());
            }
            Err(e) => {
                log::error!("cannot load scene objects, starting empty: {e}");
                self.registry = SceneRegistry::new();
            }
        }
        self.selection = None;

        match self.store.load_chunk() {
            Ok(chunk) => {
                self.terrain.populate_chunk_data(&chunk);
                match self.terrain.load_heightmap() {
                    Ok(()) => self.terrain.initialise_batch(),
                    Err(e) => log::error!("cannot load heightmap: {e}"),
                }
            }
            Err(e) => log::error!("cannot load chunk record: {e}"),
        }
    }

    /// Writes every object back through the store, replacing the table.
    pub fn save_scene(&mut self) -> Result<()> {
        let records: Vec<_> = self.registry.iter().map(SceneObject::to_record).collect();
        self.store.save_objects(&records)?;
        log::info!("saved {} scene objects", records.len());
        Ok(())
    }

    /// Overwrites the heightmap file with the current samples.
    pub fn save_terrain(&self) -> Result<()> {
        self.terrain.save_heightmap()
    }

    // ========================================================================
    // Tick
    // ========================================================================

    /// Advances the tool by one frame.
    pub fn tick(&mut self, dialog: DialogState, dt: f32) {
        let dialog_open = dialog.is_open();
        let commands = FrameCommands::capture(&self.input, dialog_open);

        if let Some(action) = self.dispatcher.dispatch(&mut self.input, dialog_open) {
            self.apply_action(action, &commands);
        }

        if self.edit_log.drag_active() {
            if commands.drag_move {
                self.continue_drag(commands.mouse);
            } else {
                self.edit_log.end_move(&self.registry);
            }
        }

        if let DialogState::Open { previous_highlight } = dialog {
            self.reconcile_dialog_highlight(previous_highlight);
        }

        self.camera.update(&commands, dt);
    }

    fn apply_action(&mut self, action: EditAction, commands: &FrameCommands) {
        match action {
            EditAction::PickAndDragStart => {
                self.selection = self.pick_at(commands.mouse);
                self.edit_log.begin_move(&self.registry, self.selection);
            }
            EditAction::Delete => {
                self.edit_log.delete(&mut self.registry, self.selection);
            }
            EditAction::Cut => {
                self.edit_log.cut(&mut self.registry, self.selection);
            }
            EditAction::Copy => {
                self.edit_log.copy(&self.registry, self.selection);
            }
            EditAction::Paste => {
                self.edit_log.paste(&mut self.registry);
            }
            EditAction::Undo => {
                self.edit_log.undo(&mut self.registry);
            }
            EditAction::Redo => {
                self.edit_log.redo(&mut self.registry);
            }
            EditAction::Save => {
                if let Err(e) = self.save_scene() {
                    log::error!("save failed: {e}");
                }
            }
            EditAction::ToggleWireframe => {
                self.wireframe = !self.wireframe;
                self.terrain.render_wireframe = self.wireframe;
            }
        }

        // Whatever just happened, a selection pointing at a removed object
        // reads as no selection from here on.
        if let Some(id) = self.selection
            && !self.registry.contains(id)
        {
            self.selection = None;
        }
    }

    // ========================================================================
    // Picking & dragging
    // ========================================================================

    /// Resolves the object under a window-client point, if any.
    #[must_use]
    pub fn pick_at(&self, screen: Vec2) -> Option<ObjectId> {
        let view = self.camera.view_matrix();
        let projection = self.camera.projection_matrix(&self.viewport);

        let targets = self.registry.iter().map(|object| PickTarget {
            id: object.id,
            world: object.world_matrix(),
            bounds: self.bounds_for(object.id),
        });

        picking::pick(screen, &self.viewport, view, projection, targets)
    }

    /// Moves the dragged object to where the mouse ray meets the horizontal
    /// plane at the object's current height.
    fn continue_drag(&mut self, screen: Vec2) {
        let Some(id) = self.edit_log.dragging() else {
            return;
        };
        let Some(object) = self.registry.get(id) else {
            return;
        };

        let view = self.camera.view_matrix();
        let projection = self.camera.projection_matrix(&self.viewport);
        let ray = picking::Ray::from_screen(screen, &self.viewport, view, projection);

        let plane_y = object.transform.position.y as f32;
        // Ray parallel to the plane: nothing meaningful to drag to.
        if ray.direction.y.abs() < 1e-6 {
            return;
        }
        let t = (plane_y - ray.origin.y) / ray.direction.y;
        if t < 0.0 {
            return;
        }

        let target = ray.origin + ray.direction * t;
        let current = object.transform.position;
        let delta = DVec3::new(
            f64::from(target.x) - current.x,
            0.0,
            f64::from(target.z) - current.z,
        );
        self.edit_log.apply_move(&mut self.registry, delta);
    }

    // ========================================================================
    // Selection & dialog
    // ========================================================================

    #[must_use]
    pub fn selection(&self) -> Option<ObjectId> {
        self.selection
    }

    /// Selection as the dialog/status sentinel (-1 for none).
    #[must_use]
    pub fn selection_sentinel(&self) -> i32 {
        selection_to_sentinel(self.selection)
    }

    /// Sets the selection, e.g. from the dialog's list. Unknown ids clear it.
    pub fn set_selection(&mut self, selection: Option<ObjectId>) {
        self.selection = selection.filter(|&id| self.registry.contains(id));
    }

    fn reconcile_dialog_highlight(&mut self, previous: Option<ObjectId>) {
        if previous != self.selection
            && let Some(object) = previous.and_then(|id| self.registry.get_mut(id))
        {
            object.set_highlighted(false);
        }
        if let Some(object) = self.selection.and_then(|id| self.registry.get_mut(id)) {
            object.set_highlighted(true);
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[must_use]
    pub fn wireframe(&self) -> bool {
        self.wireframe
    }

    #[must_use]
    pub fn edit_log(&self) -> &EditLog {
        &self.edit_log
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Tracks a window resize.
    pub fn handle_resize(&mut self, width: u32, height: u32) {
        self.viewport = Viewport::new(width as f32, height as f32);
        self.input.inject_resize(width, height);
    }

    /// Registers the sub-mesh bounds the model loader derived for an object.
    pub fn set_object_bounds(&mut self, id: ObjectId, bounds: SubMeshBounds) {
        self.bounds.insert(id, bounds);
    }

    fn bounds_for(&self, id: ObjectId) -> &[crate::picking::BoundingBox] {
        self.bounds.get(&id).unwrap_or(&self.default_bounds)
    }
}
