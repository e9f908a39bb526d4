//! Terrain chunk model
//!
//! One active terrain region: an authoritative heightmap plus the vertex
//! data derived from it.

pub mod chunk;
pub mod heightmap;

pub use chunk::{TERRAIN_HEIGHT_SCALE, TERRAIN_RESOLUTION, TerrainMesh, TerrainVertex, TextureLayer};
pub use heightmap::HeightMap;
