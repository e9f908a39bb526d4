#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod camera;
pub mod edit;
pub mod editor;
pub mod errors;
pub mod input;
pub mod persist;
pub mod picking;
pub mod scene;
pub mod terrain;

pub use camera::{EditorCamera, Viewport};
pub use edit::{EditLog, EditOp};
pub use editor::{DialogState, Editor};
pub use errors::{LoamError, Result};
pub use input::{ButtonState, Dispatcher, EditAction, FrameCommands, InputState, Key, MouseButton};
pub use persist::{ChunkRecord, JsonSceneStore, MemoryStore, SceneObjectRecord, SceneStore};
pub use picking::{BoundingBox, PickHit, PickTarget, Ray, pick};
pub use scene::{NO_OBJECT, ObjectId, SceneObject, SceneRegistry};
pub use terrain::{HeightMap, TERRAIN_HEIGHT_SCALE, TERRAIN_RESOLUTION, TerrainMesh};
