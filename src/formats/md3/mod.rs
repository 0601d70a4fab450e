//! Quake III MD3 model format support
//!
//! Structured, bounds-checked decoding of the binary MD3 layout: file
//! header, surface blocks with surface-relative offsets, multi-frame
//! vertex data, and frame-0 attachment tags.

pub mod format;
pub mod inspect;
pub mod model;
pub mod reader;

// Public API exports
pub use format::{
    Md3Header, Md3SurfaceHeader, Md3Tag, Md3TexCoord, Md3Triangle, Md3Vertex, MD3_MAGIC,
    MD3_VERSION, MD3_XYZ_SCALE,
};
pub use inspect::{inspect_md3, Md3Info, Md3SurfaceInfo};
pub use model::{Md3Model, SurfaceData};
pub use reader::Md3Reader;
