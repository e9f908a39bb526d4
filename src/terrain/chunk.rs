//! Terrain mesh model
//!
//! Owns the derived geometry for one terrain chunk and keeps it consistent
//! with the authoritative heightmap. Positions, normals, and texture
//! coordinates are fully derived state; only the heightmap bytes persist.
//!
//! The grid is `TERRAIN_RESOLUTION` cells on a side and is centered on the
//! origin. Render submission walks (resolution − 1)² quads; [`TerrainMesh::quad`]
//! states the adjacency and winding a renderer must preserve.

use std::path::{Path, PathBuf};

use glam::{Vec2, Vec3};

use crate::errors::Result;
use crate::persist::ChunkRecord;
use crate::terrain::heightmap::HeightMap;

/// Grid cells per side, constant across the system.
pub const TERRAIN_RESOLUTION: usize = 128;

/// World units per heightmap step: a 0-255 sample spans 0-63.75 units.
pub const TERRAIN_HEIGHT_SCALE: f32 = 0.25;

/// One texture layer with its tiling factor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextureLayer {
    pub path: String,
    pub tiling: f32,
}

/// One derived grid-cell vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerrainVertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
}

/// Derived geometry for the active terrain chunk.
#[derive(Debug, Clone)]
pub struct TerrainMesh {
    pub name: String,
    pub x_size_metres: f32,
    pub y_size_metres: f32,
    pub heightmap_path: PathBuf,

    pub diffuse: TextureLayer,
    pub splat_alpha_path: String,
    pub splats: [TextureLayer; 4],

    pub render_wireframe: bool,
    pub render_normals: bool,

    resolution: usize,
    heightmap: HeightMap,
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    uvs: Vec<Vec2>,
}

impl TerrainMesh {
    #[must_use]
    pub fn new() -> Self {
        let resolution = TERRAIN_RESOLUTION;
        let cells = resolution * resolution;
        Self {
            name: String::new(),
            x_size_metres: 512.0,
            y_size_metres: 512.0,
            heightmap_path: PathBuf::new(),
            diffuse: TextureLayer::default(),
            splat_alpha_path: String::new(),
            splats: Default::default(),
            render_wireframe: false,
            render_normals: false,
            resolution,
            heightmap: HeightMap::new(resolution),
            positions: vec![Vec3::ZERO; cells],
            normals: vec![Vec3::Y; cells],
            uvs: vec![Vec2::ZERO; cells],
        }
    }

    /// Copies chunk metadata out of a persisted record. No geometry side
    /// effects; call [`Self::load_heightmap`] and [`Self::initialise_batch`]
    /// afterwards.
    pub fn populate_chunk_data(&mut self, record: &ChunkRecord) {
        self.name = record.name.clone();
        self.x_size_metres = record.chunk_x_size_metres as f32;
        self.y_size_metres = record.chunk_y_size_metres as f32;
        self.heightmap_path = PathBuf::from(&record.heightmap_path);

        self.diffuse = TextureLayer {
            path: record.tex_diffuse_path.clone(),
            tiling: record.tex_diffuse_tiling as f32,
        };
        self.splat_alpha_path = record.tex_splat_alpha_path.clone();
        self.splats = [
            TextureLayer {
                path: record.tex_splat_1_path.clone(),
                tiling: record.tex_splat_1_tiling as f32,
            },
            TextureLayer {
                path: record.tex_splat_2_path.clone(),
                tiling: record.tex_splat_2_tiling as f32,
            },
            TextureLayer {
                path: record.tex_splat_3_path.clone(),
                tiling: record.tex_splat_3_tiling as f32,
            },
            TextureLayer {
                path: record.tex_splat_4_path.clone(),
                tiling: record.tex_splat_4_tiling as f32,
            },
        ];

        self.render_wireframe = record.render_wireframe != 0;
        self.render_normals = record.render_normals != 0;
    }

    /// Reads the heightmap from the recorded path. Must succeed before any
    /// geometry build; on failure the previous samples are kept.
    pub fn load_heightmap(&mut self) -> Result<()> {
        let path = self.heightmap_path.clone();
        self.heightmap = HeightMap::load(&path, self.resolution)?;
        Ok(())
    }

    /// Writes the current samples back to the recorded path, full overwrite.
    pub fn save_heightmap(&self) -> Result<()> {
        self.heightmap.save(&self.heightmap_path)
    }

    /// Builds the full vertex grid from the heightmap.
    ///
    /// The grid spans [-size/2, size/2] on x and z so the chunk is centered
    /// on the origin; y comes from the heightmap sample scaled by
    /// [`TERRAIN_HEIGHT_SCALE`]. Texture coordinates step 1/(resolution-1)
    /// per cell times the diffuse tiling factor, so the last cell in a row
    /// lands on the tiling boundary.
    pub fn initialise_batch(&mut self) {
        let scale = self.position_scale();
        let half = 0.5 * self.x_size_metres;
        let uv_step = 1.0 / (self.resolution as f32 - 1.0);
        let tiling = self.diffuse.tiling;

        for i in 0..self.resolution {
            for j in 0..self.resolution {
                let index = self.index(i, j);
                self.positions[index] = Vec3::new(
                    j as f32 * scale - half,
                    f32::from(self.heightmap.sample(i, j)) * TERRAIN_HEIGHT_SCALE,
                    i as f32 * scale - half,
                );
                self.normals[index] = Vec3::Y;
                self.uvs[index] = Vec2::new(uv_step * j as f32 * tiling, uv_step * i as f32 * tiling);
            }
        }

        self.calculate_normals();
    }

    /// Re-derives only the y component of every position from the current
    /// heightmap, then recomputes normals. Call after any height edit.
    pub fn update_terrain(&mut self) {
        for i in 0..self.resolution {
            for j in 0..self.resolution {
                let index = self.index(i, j);
                self.positions[index].y =
                    f32::from(self.heightmap.sample(i, j)) * TERRAIN_HEIGHT_SCALE;
            }
        }
        self.calculate_normals();
    }

    /// Recomputes every vertex normal from its neighbors' positions.
    ///
    /// Two tangents are taken from the row neighbors (j−1, j+1) and column
    /// neighbors (i−1, i+1) and crossed. Neighbor indices are clamped to the
    /// grid, so edge cells use a one-sided difference and every cell ends up
    /// with a defined normal.
    pub fn calculate_normals(&mut self) {
        let max = self.resolution - 1;
        for i in 0..self.resolution {
            for j in 0..self.resolution {
                let i0 = i.saturating_sub(1);
                let i1 = (i + 1).min(max);
                let j0 = j.saturating_sub(1);
                let j1 = (j + 1).min(max);

                let left_right = self.positions[self.index(i, j0)] - self.positions[self.index(i, j1)];
                let up_down = self.positions[self.index(i1, j)] - self.positions[self.index(i0, j)];

                let index = self.index(i, j);
                self.normals[index] = left_right.cross(up_down).normalize_or(Vec3::Y);
            }
        }
    }

    /// Procedural heightmap generation.
    //  TODO: implement generation; the operation exists in the tool's menu
    //  but has never been wired to an algorithm.
    pub fn generate_heightmap(&mut self) {
        log::warn!("heightmap generation is not implemented");
    }

    // ========================================================================
    // Height editing
    // ========================================================================

    #[must_use]
    pub fn height(&self, i: usize, j: usize) -> u8 {
        self.heightmap.sample(i, j)
    }

    /// Edits one sample. The caller is responsible for a
    /// [`Self::update_terrain`] pass before the next render.
    pub fn set_height(&mut self, i: usize, j: usize, value: u8) {
        self.heightmap.set(i, j, value);
    }

    #[must_use]
    pub fn heightmap(&self) -> &HeightMap {
        &self.heightmap
    }

    pub fn heightmap_mut(&mut self) -> &mut HeightMap {
        &mut self.heightmap
    }

    /// Replaces the whole heightmap, e.g. when loading from a custom source.
    pub fn set_heightmap(&mut self, heightmap: HeightMap) {
        self.heightmap = heightmap;
    }

    // ========================================================================
    // Derived geometry access
    // ========================================================================

    #[must_use]
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// World units per grid step along x and z.
    #[must_use]
    pub fn position_scale(&self) -> f32 {
        self.x_size_metres / (self.resolution as f32 - 1.0)
    }

    #[must_use]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    #[must_use]
    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    #[must_use]
    pub fn uvs(&self) -> &[Vec2] {
        &self.uvs
    }

    #[must_use]
    pub fn vertex(&self, i: usize, j: usize) -> TerrainVertex {
        let index = self.index(i, j);
        TerrainVertex {
            position: self.positions[index],
            normal: self.normals[index],
            uv: self.uvs[index],
        }
    }

    /// The quad spanning cells (i, j) .. (i+1, j+1), in submission order:
    /// `{cell(i,j), cell(i,j+1), cell(i+1,j+1), cell(i+1,j)}`.
    ///
    /// Valid for i, j in [0, resolution − 1).
    #[must_use]
    pub fn quad(&self, i: usize, j: usize) -> [TerrainVertex; 4] {
        [
            self.vertex(i, j),
            self.vertex(i, j + 1),
            self.vertex(i + 1, j + 1),
            self.vertex(i + 1, j),
        ]
    }

    /// Iterates all (resolution − 1)² quads row by row.
    pub fn quads(&self) -> impl Iterator<Item = [TerrainVertex; 4]> + '_ {
        let last = self.resolution - 1;
        (0..last).flat_map(move |i| (0..last).map(move |j| self.quad(i, j)))
    }

    #[must_use]
    pub fn heightmap_file(&self) -> &Path {
        &self.heightmap_path
    }

    fn index(&self, i: usize, j: usize) -> usize {
        i * self.resolution + j
    }
}

impl Default for TerrainMesh {
    fn default() -> Self {
        Self::new()
    }
}
