//! Error types for ChromaTrace

use std::path::PathBuf;

use thiserror::Error;

/// Every fatal condition the library can report.
///
/// None of these are recovered from: a malformed object fails the whole
/// scene, and a failed write fails the whole render.
#[derive(Error, Debug)]
pub enum TraceError {
    /// The scene description could not be read from disk.
    #[error("failed to read scene file {path}: {source}")]
    SceneRead {
        /// Path that was being read
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// Missing or mistyped field, unknown shape type, bad numeric array.
    #[error("malformed scene description: {0}")]
    SceneFormat(#[from] serde_json::Error),

    /// Structurally valid JSON describing an unusable scene.
    #[error("invalid scene: {0}")]
    InvalidScene(String),

    /// A vector that must be non-zero (or non-parallel) is not.
    #[error("invalid vector: {0}")]
    InvalidVector(String),

    /// The output path does not name a lossless raster format.
    #[error("unsupported output format for {0}")]
    UnsupportedFormat(PathBuf),

    /// Encoding the image failed.
    #[error("failed to write image {path}: {source}")]
    ImageWrite {
        /// Destination path
        path: PathBuf,
        /// Underlying encoder failure
        #[source]
        source: image::ImageError,
    },

    /// Any other I/O failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TraceError>;
