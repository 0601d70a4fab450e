//! File format handlers

pub mod md3;

// Re-export the main model types for convenience
pub use md3::{Md3Header, Md3Model, Md3Tag, SurfaceData};
