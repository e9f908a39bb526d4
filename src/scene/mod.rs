//! Scene object model and registry

pub mod object;
pub mod registry;

pub use object::{
    AudioSource, Collision, EditorFlags, Light, PathNode, RenderSettings, SceneObject, Transform,
};
pub use registry::{NO_OBJECT, ObjectId, SceneRegistry, selection_from_sentinel, selection_to_sentinel};
