//! Error Types
//!
//! This module defines the error types used throughout the editor core.
//!
//! # Overview
//!
//! The main error type [`LoamError`] covers all failure modes including:
//! - Heightmap file loading and saving
//! - Scene store access
//! - Registry identity violations
//!
//! All public APIs return [`Result<T>`] which is an alias for
//! `std::result::Result<T, LoamError>`.

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for the editor core.
///
/// Note that the no-op conditions of editing (undo with an empty history,
/// paste with an empty clipboard, operations against a missing selection)
/// are deliberately not errors; they are silently ignored by the edit log.
#[derive(Error, Debug)]
pub enum LoamError {
    // ========================================================================
    // Terrain Errors
    // ========================================================================
    /// The heightmap file could not be opened or read.
    #[error("Cannot read heightmap {path:?}: {source}")]
    HeightmapUnreadable {
        /// Path the chunk record points at
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The heightmap file is shorter than one byte per grid cell.
    #[error("Heightmap {path:?} holds {actual} bytes, expected {expected}")]
    HeightmapTruncated {
        /// Path the chunk record points at
        path: PathBuf,
        /// resolution * resolution
        expected: usize,
        /// Bytes actually present
        actual: usize,
    },

    // ========================================================================
    // Persistence Errors
    // ========================================================================
    /// The scene store could not be opened.
    #[error("Scene store {path:?} unavailable: {source}")]
    StoreUnavailable {
        /// Location of the backing document
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The scene store holds no chunk record.
    #[error("Scene store has no chunk record")]
    MissingChunk,

    // ========================================================================
    // Registry Errors
    // ========================================================================
    /// An object with this id is already present in the registry.
    #[error("Object id {0} already present in the registry")]
    DuplicateId(i32),

    // ========================================================================
    // I/O & Format Errors
    // ========================================================================
    /// File I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Alias for `Result<T, LoamError>`.
pub type Result<T> = std::result::Result<T, LoamError>;
