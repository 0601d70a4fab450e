//! MD3 file inspection utilities

use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::formats::md3::model::Md3Model;

/// Summary of an MD3 file.
#[derive(Debug, Clone, Serialize)]
pub struct Md3Info {
    pub name: String,
    pub file_size: u64,
    pub num_frames: u32,
    pub num_tags: u32,
    pub surfaces: Vec<Md3SurfaceInfo>,
    /// Frame-0 tag names (empty when the tag block is absent or unreadable).
    pub tags: Vec<String>,
}

/// Summary of one surface.
#[derive(Debug, Clone, Serialize)]
pub struct Md3SurfaceInfo {
    pub name: String,
    pub vertex_count: u32,
    pub triangle_count: u32,
    pub frame_count: u32,
}

/// Decode a file and summarize its contents.
pub fn inspect_md3<P: AsRef<Path>>(source: P) -> Result<Md3Info> {
    let data = std::fs::read(source.as_ref())?;
    let model = Md3Model::from_bytes(&data)?;
    Ok(summarize(&model, data.len() as u64))
}

fn summarize(model: &Md3Model, file_size: u64) -> Md3Info {
    let surfaces = model
        .surfaces
        .iter()
        .map(|s| Md3SurfaceInfo {
            name: s.header.name.clone(),
            vertex_count: s.header.num_verts,
            triangle_count: s.header.num_triangles,
            frame_count: s.header.num_frames,
        })
        .collect();

    Md3Info {
        name: model.header.name.clone(),
        file_size,
        num_frames: model.header.num_frames,
        num_tags: model.header.num_tags,
        surfaces,
        tags: model.tags.iter().map(|t| t.name.clone()).collect(),
    }
}
