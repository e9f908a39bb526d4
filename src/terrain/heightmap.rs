//! Heightmap storage
//!
//! The on-disk format is a raw byte array: exactly resolution² unsigned
//! bytes, row-major, no header. Loading a missing or truncated file reports
//! an error and leaves the caller's previous state untouched; saving is a
//! full overwrite.

use std::fs;
use std::path::Path;

use crate::errors::{LoamError, Result};

/// A square grid of 8-bit elevation samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeightMap {
    resolution: usize,
    data: Vec<u8>,
}

impl HeightMap {
    /// A flat (all-zero) heightmap.
    #[must_use]
    pub fn new(resolution: usize) -> Self {
        Self {
            resolution,
            data: vec![0; resolution * resolution],
        }
    }

    /// Wraps an existing byte array, which must hold resolution² samples.
    pub fn from_bytes(resolution: usize, data: Vec<u8>) -> Result<Self> {
        let expected = resolution * resolution;
        if data.len() != expected {
            return Err(LoamError::HeightmapTruncated {
                path: Path::new("<memory>").to_path_buf(),
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { resolution, data })
    }

    /// Reads resolution² bytes from a raw heightmap file.
    ///
    /// A longer file is accepted (the tail is ignored with a warning); a
    /// shorter one is an error.
    pub fn load(path: &Path, resolution: usize) -> Result<Self> {
        let mut data = fs::read(path).map_err(|source| LoamError::HeightmapUnreadable {
            path: path.to_path_buf(),
            source,
        })?;

        let expected = resolution * resolution;
        if data.len() < expected {
            return Err(LoamError::HeightmapTruncated {
                path: path.to_path_buf(),
                expected,
                actual: data.len(),
            });
        }
        if data.len() > expected {
            log::warn!(
                "heightmap {path:?} holds {} bytes, using the first {expected}",
                data.len()
            );
            data.truncate(expected);
        }

        Ok(Self { resolution, data })
    }

    /// Writes the sample array verbatim, replacing any existing file.
    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, &self.data)?;
        log::info!("saved heightmap {path:?} ({} bytes)", self.data.len());
        Ok(())
    }

    #[must_use]
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Sample at grid cell (i, j): row i, column j.
    #[must_use]
    pub fn sample(&self, i: usize, j: usize) -> u8 {
        self.data[i * self.resolution + j]
    }

    pub fn set(&mut self, i: usize, j: usize, value: u8) {
        self.data[i * self.resolution + j] = value;
    }

    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }
}
