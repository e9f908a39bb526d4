//! Scene object components
//!
//! A placed object is its id, its asset references, and a set of component
//! groups. The persisted row is flat (see `persist`); the in-memory model is
//! decomposed so that the editing code works against `Transform` or
//! `EditorFlags` instead of a 56-field bag. Values that persist as SQL
//! doubles stay `f64` here so a load/save cycle is lossless; geometry math
//! converts at the point of use.

use bitflags::bitflags;
use glam::{DVec3, EulerRot, Mat4, Quat};

/// Position, orientation, and scale.
///
/// Orientation is yaw/pitch/roll stored in degrees (x = pitch, y = yaw,
/// z = roll), matching the persisted row. The three components are
/// independent; nothing composes through `parent_id`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: DVec3,
    pub rotation_degrees: DVec3,
    pub scale: DVec3,
}

impl Transform {
    #[must_use]
    pub fn new() -> Self {
        Self {
            position: DVec3::ZERO,
            rotation_degrees: DVec3::ZERO,
            scale: DVec3::ONE,
        }
    }

    /// Rotation as a quaternion, yaw then pitch then roll.
    #[must_use]
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(
            EulerRot::YXZ,
            (self.rotation_degrees.y as f32).to_radians(),
            (self.rotation_degrees.x as f32).to_radians(),
            (self.rotation_degrees.z as f32).to_radians(),
        )
    }

    /// World matrix composed scale, then rotation, then translation.
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            self.scale.as_vec3(),
            self.rotation(),
            self.position.as_vec3(),
        )
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

/// In-game render settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderSettings {
    pub render: bool,
    pub wireframe: bool,
}

/// Collision and gameplay interaction metadata.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collision {
    pub enabled: bool,
    pub mesh_path: String,
    pub collectable: bool,
    pub destructable: bool,
    pub health_amount: i32,
}

/// Positional audio emitter parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AudioSource {
    pub path: String,
    pub volume: f64,
    pub pitch: f64,
    pub pan: f64,
    pub one_shot: bool,
    pub play_on_init: bool,
    pub play_in_editor: bool,
    pub min_dist: f64,
    pub max_dist: f64,
}

/// Light parameters. `kind` is the persisted light-type discriminant.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Light {
    pub kind: i32,
    pub diffuse: DVec3,
    pub specular: DVec3,
    pub spot_cutoff: f64,
    pub constant: f64,
    pub linear: f64,
    pub quadratic: f64,
}

/// Path-node linkage for AI routes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PathNode {
    pub is_node: bool,
    pub is_start: bool,
    pub is_end: bool,
    pub ai_node: bool,
}

bitflags! {
    /// Editor-only visibility flags.
    ///
    /// `HIGHLIGHTED` is session state driven by the selection dialog and is
    /// never persisted.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct EditorFlags: u32 {
        const RENDER         = 1 << 0;
        const TEXTURE_VIS    = 1 << 1;
        const NORMALS_VIS    = 1 << 2;
        const COLLISION_VIS  = 1 << 3;
        const PIVOT_VIS      = 1 << 4;
        const SNAP_TO_GROUND = 1 << 5;
        const HIGHLIGHTED    = 1 << 6;
    }
}

/// One placed object in the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    /// Stable identity, assigned by persistence. Must not collide.
    pub id: i32,
    /// Owning terrain chunk
    pub chunk_id: i32,
    pub name: String,
    pub model_path: String,
    pub texture_path: String,

    pub transform: Transform,
    pub render: RenderSettings,
    pub collision: Collision,
    pub audio: AudioSource,
    pub light: Light,
    pub path_node: PathNode,
    pub editor_flags: EditorFlags,

    pub pivot: DVec3,
    pub camera_attached: bool,
    /// Persisted verbatim; transforms never compose through it.
    pub parent_id: i32,
}

impl SceneObject {
    /// A bare object with identity `id` and neutral components.
    #[must_use]
    pub fn new(id: i32) -> Self {
        Self {
            id,
            chunk_id: 0,
            name: String::new(),
            model_path: String::new(),
            texture_path: String::new(),
            transform: Transform::new(),
            render: RenderSettings::default(),
            collision: Collision::default(),
            audio: AudioSource::default(),
            light: Light::default(),
            path_node: PathNode::default(),
            editor_flags: EditorFlags::RENDER,
            pivot: DVec3::ZERO,
            camera_attached: false,
            parent_id: 0,
        }
    }

    /// World matrix for rendering and picking.
    #[must_use]
    pub fn world_matrix(&self) -> Mat4 {
        self.transform.matrix()
    }

    #[must_use]
    pub fn highlighted(&self) -> bool {
        self.editor_flags.contains(EditorFlags::HIGHLIGHTED)
    }

    pub fn set_highlighted(&mut self, on: bool) {
        self.editor_flags.set(EditorFlags::HIGHLIGHTED, on);
    }
}
