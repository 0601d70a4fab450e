//! # md3obj
//!
//! A pure-Rust library for decoding Quake III Arena MD3 models and
//! exporting them as Wavefront OBJ meshes.
//!
//! ## Supported Operations
//!
//! - **Decode** - Bounds-checked parsing of MD3 headers, surfaces,
//!   triangles, texture coordinates, multi-frame vertices, and tags
//! - **Single-file export** - One OBJ document per animation frame
//! - **Merge export** - Several models combined into one OBJ, placed in a
//!   shared space by their attachment tags
//! - **Inspect** - Model summaries, printable or serializable to JSON
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use md3obj::converter::convert_md3_to_obj;
//! use md3obj::geometry::ObjExportOptions;
//!
//! let report = convert_md3_to_obj(
//!     Path::new("railgun.md3"),
//!     None,
//!     ObjExportOptions::default(),
//! )?;
//! println!("wrote {} frame(s)", report.outputs.len());
//! # Ok::<(), md3obj::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `md3obj` command-line binary

pub mod converter;
pub mod error;
pub mod formats;
pub mod geometry;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::converter::{
        convert_md3_to_obj, merge_md3_to_obj, ConversionReport, MergeReport,
    };
    pub use crate::error::{Error, Result};
    pub use crate::formats::md3::{
        inspect_md3, Md3Header, Md3Info, Md3Model, Md3Tag, SurfaceData,
    };
    pub use crate::geometry::{decode_normal, ObjExportOptions};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
