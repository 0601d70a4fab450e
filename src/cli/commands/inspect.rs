//! MD3 inspection command

use std::path::Path;

use crate::formats::md3::inspect_md3;

/// Inspect an MD3 file and display its structure.
pub fn run(source: &Path, json: bool) -> anyhow::Result<()> {
    let info = inspect_md3(source)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("MD3 File Information");
    println!("====================");
    println!("Name:      {}", info.name);
    println!("File size: {} bytes", info.file_size);
    println!("Frames:    {}", info.num_frames);
    println!("Tags:      {}", info.num_tags);
    println!();

    println!("Surfaces ({}):", info.surfaces.len());
    for surface in &info.surfaces {
        println!(
            "  - {} ({} vertices, {} triangles, {} frames)",
            surface.name, surface.vertex_count, surface.triangle_count, surface.frame_count
        );
    }

    if !info.tags.is_empty() {
        println!();
        println!("Frame-0 tags:");
        for tag in &info.tags {
            println!("  - {tag}");
        }
    }

    Ok(())
}
