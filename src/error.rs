//! Error types for `md3obj`

use std::path::PathBuf;

use thiserror::Error;

/// The error type for `md3obj` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== MD3 Format Errors ====================
    /// The file is not a valid MD3 file (missing IDP3 magic).
    #[error("invalid MD3 magic: expected IDP3, found {0:?}")]
    InvalidMd3Magic([u8; 4]),

    /// The MD3 version is not supported.
    #[error("unsupported MD3 version: {version} (expected 15)")]
    UnsupportedMd3Version {
        /// The version number found in the file.
        version: u32,
    },

    /// The header's declared end-of-data offset exceeds the file size.
    #[error("file appears truncated: declared end offset {ofs_end} exceeds file size {file_size}")]
    Truncated {
        /// The declared end-of-data offset.
        ofs_end: u64,
        /// The actual file size in bytes.
        file_size: u64,
    },

    /// A declared offset/length pair reaches past the end of the file.
    #[error("read of {len} bytes at offset {offset} exceeds file size {file_size}")]
    OutOfBounds {
        /// The requested read offset.
        offset: u64,
        /// The requested read length.
        len: u64,
        /// The actual file size in bytes.
        file_size: u64,
    },

    /// A surface block does not carry the IDP3 magic.
    #[error("invalid surface magic at surface {index}: expected IDP3, found {found:?}")]
    InvalidSurfaceMagic {
        /// Zero-based index of the offending surface.
        index: usize,
        /// The four bytes found in place of the magic.
        found: [u8; 4],
    },

    // ==================== Conversion Errors ====================
    /// A surface stores no vertex data for a requested animation frame.
    ///
    /// Surfaces whose frame count differs from the model's are accepted at
    /// decode time, so emission can ask for a frame a surface lacks.
    #[error("surface {surface} has no vertex data for frame {frame} ({available} frame(s) stored)")]
    MissingFrameData {
        /// Name of the surface missing the frame.
        surface: String,
        /// The requested zero-based frame index.
        frame: usize,
        /// Number of frames the surface actually stores.
        available: usize,
    },

    /// Merge mode could not load the minimum of two input models.
    #[error("merge requires at least two readable MD3 inputs ({loaded} of {requested} loaded)")]
    InsufficientMergeInputs {
        /// Number of successfully decoded inputs.
        loaded: usize,
        /// Number of inputs requested.
        requested: usize,
    },

    /// Some animation frames could not be written in single-file mode.
    #[error("failed to write {failed} of {total} frames: {first_error}")]
    FrameWritePartialFailure {
        /// Total number of frames attempted.
        total: usize,
        /// Number of frames that failed.
        failed: usize,
        /// The first error message encountered.
        first_error: String,
    },

    /// Output file could not be written.
    #[error("failed to write output {path}: {message}")]
    ObjWriteFailed {
        /// The output path; a partially written file may remain there.
        path: PathBuf,
        /// The underlying error message.
        message: String,
    },

    // ==================== Parsing Errors ====================
    /// JSON serialization error (inspect reports).
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for `md3obj` operations.
pub type Result<T> = std::result::Result<T, Error>;
