//! Persisted record shapes and the scene store seam
//!
//! The editor core exchanges plain structured records with its persistence
//! collaborator: one flat row per placed object and one singleton chunk row.
//! The exact storage mechanics (SQL schema, connections) live behind the
//! [`SceneStore`] trait; the core's contract is that every field here
//! round-trips losslessly through a save/load cycle. Numeric fields are
//! double precision, paths and names are UTF-8 strings, and integer flags
//! are boolean-valued (0/1).
//!
//! Saving is a full table replace, not an incremental update.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::errors::{LoamError, Result};
use crate::scene::object::{
    AudioSource, Collision, EditorFlags, Light, PathNode, RenderSettings, SceneObject, Transform,
};

fn flag(value: i32) -> bool {
    value != 0
}

fn as_flag(value: bool) -> i32 {
    i32::from(value)
}

// ============================================================================
// Record shapes
// ============================================================================

/// One persisted scene-object row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneObjectRecord {
    pub id: i32,
    pub chunk_id: i32,
    pub model_path: String,
    pub tex_diffuse_path: String,

    pub pos_x: f64,
    pub pos_y: f64,
    pub pos_z: f64,
    pub rot_x: f64,
    pub rot_y: f64,
    pub rot_z: f64,
    pub sca_x: f64,
    pub sca_y: f64,
    pub sca_z: f64,

    pub render: i32,
    pub collision: i32,
    pub collision_mesh: String,
    pub collectable: i32,
    pub destructable: i32,
    pub health_amount: i32,

    pub editor_render: i32,
    pub editor_texture_vis: i32,
    pub editor_normals_vis: i32,
    pub editor_collision_vis: i32,
    pub editor_pivot_vis: i32,

    pub pivot_x: f64,
    pub pivot_y: f64,
    pub pivot_z: f64,
    pub snap_to_ground: i32,
    pub ai_node: i32,

    pub audio_path: String,
    pub volume: f64,
    pub pitch: f64,
    pub pan: f64,
    pub one_shot: i32,
    pub play_on_init: i32,
    pub play_in_editor: i32,
    pub min_dist: f64,
    pub max_dist: f64,

    pub camera: i32,
    pub path_node: i32,
    pub path_node_start: i32,
    pub path_node_end: i32,
    pub parent_id: i32,
    pub editor_wireframe: i32,
    pub name: String,

    pub light_type: i32,
    pub light_diffuse_r: f64,
    pub light_diffuse_g: f64,
    pub light_diffuse_b: f64,
    pub light_specular_r: f64,
    pub light_specular_g: f64,
    pub light_specular_b: f64,
    pub light_spot_cutoff: f64,
    pub light_constant: f64,
    pub light_linear: f64,
    pub light_quadratic: f64,
}

/// The persisted chunk row (singleton).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChunkRecord {
    pub id: i32,
    pub name: String,
    pub chunk_x_size_metres: i32,
    pub chunk_y_size_metres: i32,
    pub chunk_base_resolution: i32,
    pub heightmap_path: String,
    pub tex_diffuse_path: String,
    pub tex_splat_alpha_path: String,
    pub tex_splat_1_path: String,
    pub tex_splat_2_path: String,
    pub tex_splat_3_path: String,
    pub tex_splat_4_path: String,
    pub render_wireframe: i32,
    pub render_normals: i32,
    pub tex_diffuse_tiling: i32,
    pub tex_splat_1_tiling: i32,
    pub tex_splat_2_tiling: i32,
    pub tex_splat_3_tiling: i32,
    pub tex_splat_4_tiling: i32,
}

// ============================================================================
// Record ↔ component-model adapters
// ============================================================================

impl SceneObject {
    /// Builds the componentized in-memory object from a persisted row.
    #[must_use]
    pub fn from_record(record: &SceneObjectRecord) -> Self {
        let mut editor_flags = EditorFlags::empty();
        editor_flags.set(EditorFlags::RENDER, flag(record.editor_render));
        editor_flags.set(EditorFlags::TEXTURE_VIS, flag(record.editor_texture_vis));
        editor_flags.set(EditorFlags::NORMALS_VIS, flag(record.editor_normals_vis));
        editor_flags.set(EditorFlags::COLLISION_VIS, flag(record.editor_collision_vis));
        editor_flags.set(EditorFlags::PIVOT_VIS, flag(record.editor_pivot_vis));
        editor_flags.set(EditorFlags::SNAP_TO_GROUND, flag(record.snap_to_ground));

        Self {
            id: record.id,
            chunk_id: record.chunk_id,
            name: record.name.clone(),
            model_path: record.model_path.clone(),
            texture_path: record.tex_diffuse_path.clone(),

            transform: Transform {
                position: DVec3::new(record.pos_x, record.pos_y, record.pos_z),
                rotation_degrees: DVec3::new(record.rot_x, record.rot_y, record.rot_z),
                scale: DVec3::new(record.sca_x, record.sca_y, record.sca_z),
            },
            render: RenderSettings {
                render: flag(record.render),
                wireframe: flag(record.editor_wireframe),
            },
            collision: Collision {
                enabled: flag(record.collision),
                mesh_path: record.collision_mesh.clone(),
                collectable: flag(record.collectable),
                destructable: flag(record.destructable),
                health_amount: record.health_amount,
            },
            audio: AudioSource {
                path: record.audio_path.clone(),
                volume: record.volume,
                pitch: record.pitch,
                pan: record.pan,
                one_shot: flag(record.one_shot),
                play_on_init: flag(record.play_on_init),
                play_in_editor: flag(record.play_in_editor),
                min_dist: record.min_dist,
                max_dist: record.max_dist,
            },
            light: Light {
                kind: record.light_type,
                diffuse: DVec3::new(
                    record.light_diffuse_r,
                    record.light_diffuse_g,
                    record.light_diffuse_b,
                ),
                specular: DVec3::new(
                    record.light_specular_r,
                    record.light_specular_g,
                    record.light_specular_b,
                ),
                spot_cutoff: record.light_spot_cutoff,
                constant: record.light_constant,
                linear: record.light_linear,
                quadratic: record.light_quadratic,
            },
            path_node: PathNode {
                is_node: flag(record.path_node),
                is_start: flag(record.path_node_start),
                is_end: flag(record.path_node_end),
                ai_node: flag(record.ai_node),
            },
            editor_flags,

            pivot: DVec3::new(record.pivot_x, record.pivot_y, record.pivot_z),
            camera_attached: flag(record.camera),
            parent_id: record.parent_id,
        }
    }

    /// Flattens the object back into its persisted row shape.
    ///
    /// Session-only state (`HIGHLIGHTED`) is not part of the row.
    #[must_use]
    pub fn to_record(&self) -> SceneObjectRecord {
        SceneObjectRecord {
            id: self.id,
            chunk_id: self.chunk_id,
            model_path: self.model_path.clone(),
            tex_diffuse_path: self.texture_path.clone(),

            pos_x: self.transform.position.x,
            pos_y: self.transform.position.y,
            pos_z: self.transform.position.z,
            rot_x: self.transform.rotation_degrees.x,
            rot_y: self.transform.rotation_degrees.y,
            rot_z: self.transform.rotation_degrees.z,
            sca_x: self.transform.scale.x,
            sca_y: self.transform.scale.y,
            sca_z: self.transform.scale.z,

            render: as_flag(self.render.render),
            collision: as_flag(self.collision.enabled),
            collision_mesh: self.collision.mesh_path.clone(),
            collectable: as_flag(self.collision.collectable),
            destructable: as_flag(self.collision.destructable),
            health_amount: self.collision.health_amount,

            editor_render: as_flag(self.editor_flags.contains(EditorFlags::RENDER)),
            editor_texture_vis: as_flag(self.editor_flags.contains(EditorFlags::TEXTURE_VIS)),
            editor_normals_vis: as_flag(self.editor_flags.contains(EditorFlags::NORMALS_VIS)),
            editor_collision_vis: as_flag(self.editor_flags.contains(EditorFlags::COLLISION_VIS)),
            editor_pivot_vis: as_flag(self.editor_flags.contains(EditorFlags::PIVOT_VIS)),

            pivot_x: self.pivot.x,
            pivot_y: self.pivot.y,
            pivot_z: self.pivot.z,
            snap_to_ground: as_flag(self.editor_flags.contains(EditorFlags::SNAP_TO_GROUND)),
            ai_node: as_flag(self.path_node.ai_node),

            audio_path: self.audio.path.clone(),
            volume: self.audio.volume,
            pitch: self.audio.pitch,
            pan: self.audio.pan,
            one_shot: as_flag(self.audio.one_shot),
            play_on_init: as_flag(self.audio.play_on_init),
            play_in_editor: as_flag(self.audio.play_in_editor),
            min_dist: self.audio.min_dist,
            max_dist: self.audio.max_dist,

            camera: as_flag(self.camera_attached),
            path_node: as_flag(self.path_node.is_node),
            path_node_start: as_flag(self.path_node.is_start),
            path_node_end: as_flag(self.path_node.is_end),
            parent_id: self.parent_id,
            editor_wireframe: as_flag(self.render.wireframe),
            name: self.name.clone(),

            light_type: self.light.kind,
            light_diffuse_r: self.light.diffuse.x,
            light_diffuse_g: self.light.diffuse.y,
            light_diffuse_b: self.light.diffuse.z,
            light_specular_r: self.light.specular.x,
            light_specular_g: self.light.specular.y,
            light_specular_b: self.light.specular.z,
            light_spot_cutoff: self.light.spot_cutoff,
            light_constant: self.light.constant,
            light_linear: self.light.linear,
            light_quadratic: self.light.quadratic,
        }
    }
}

// ============================================================================
// Stores
// ============================================================================

/// The persistence seam.
///
/// A SQL-backed collaborator implements this against its schema; the core
/// only ever sees record shapes. `save_objects` replaces the whole object
/// table.
pub trait SceneStore {
    fn load_objects(&mut self) -> Result<Vec<SceneObjectRecord>>;
    fn load_chunk(&mut self) -> Result<ChunkRecord>;
    fn save_objects(&mut self, objects: &[SceneObjectRecord]) -> Result<()>;
    fn save_chunk(&mut self, chunk: &ChunkRecord) -> Result<()>;
}

/// The document a [`JsonSceneStore`] keeps on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneDocument {
    pub objects: Vec<SceneObjectRecord>,
    pub chunk: Option<ChunkRecord>,
}

/// File-backed store serializing the whole scene as one JSON document.
#[derive(Debug, Clone)]
pub struct JsonSceneStore {
    path: PathBuf,
}

impl JsonSceneStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Writes a fresh document, replacing any existing file.
    pub fn create(path: impl Into<PathBuf>, document: &SceneDocument) -> Result<Self> {
        let store = Self::new(path);
        store.write_document(document)?;
        Ok(store)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> Result<SceneDocument> {
        let text = fs::read_to_string(&self.path).map_err(|source| LoamError::StoreUnavailable {
            path: self.path.clone(),
            source,
        })?;
        Ok(serde_json::from_str(&text)?)
    }

    fn write_document(&self, document: &SceneDocument) -> Result<()> {
        let text = serde_json::to_string_pretty(document)?;
        fs::write(&self.path, text)?;
        Ok(())
    }
}

impl SceneStore for JsonSceneStore {
    fn load_objects(&mut self) -> Result<Vec<SceneObjectRecord>> {
        Ok(self.read_document()?.objects)
    }

    fn load_chunk(&mut self) -> Result<ChunkRecord> {
        self.read_document()?.chunk.ok_or(LoamError::MissingChunk)
    }

    fn save_objects(&mut self, objects: &[SceneObjectRecord]) -> Result<()> {
        let mut document = self.read_document().unwrap_or_default();
        document.objects = objects.to_vec();
        self.write_document(&document)
    }

    fn save_chunk(&mut self, chunk: &ChunkRecord) -> Result<()> {
        let mut document = self.read_document().unwrap_or_default();
        document.chunk = Some(chunk.clone());
        self.write_document(&document)
    }
}

/// In-memory store for tests and headless sessions.
///
/// The document lives behind a shared handle so a caller can keep a clone
/// and inspect what the editor saved.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    document: Rc<RefCell<SceneDocument>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new(objects: Vec<SceneObjectRecord>, chunk: Option<ChunkRecord>) -> Self {
        Self {
            document: Rc::new(RefCell::new(SceneDocument { objects, chunk })),
        }
    }

    /// A second handle onto the same document.
    #[must_use]
    pub fn share(&self) -> Self {
        Self {
            document: Rc::clone(&self.document),
        }
    }

    #[must_use]
    pub fn objects(&self) -> Vec<SceneObjectRecord> {
        self.document.borrow().objects.clone()
    }

    #[must_use]
    pub fn chunk(&self) -> Option<ChunkRecord> {
        self.document.borrow().chunk.clone()
    }
}

impl SceneStore for MemoryStore {
    fn load_objects(&mut self) -> Result<Vec<SceneObjectRecord>> {
        Ok(self.document.borrow().objects.clone())
    }

    fn load_chunk(&mut self) -> Result<ChunkRecord> {
        self.document.borrow().chunk.clone().ok_or(LoamError::MissingChunk)
    }

    fn save_objects(&mut self, objects: &[SceneObjectRecord]) -> Result<()> {
        self.document.borrow_mut().objects = objects.to_vec();
        Ok(())
    }

    fn save_chunk(&mut self, chunk: &ChunkRecord) -> Result<()> {
        self.document.borrow_mut().chunk = Some(chunk.clone());
        Ok(())
    }
}
