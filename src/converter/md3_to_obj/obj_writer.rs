//! Wavefront OBJ emission
//!
//! OBJ numbers positions, texture coordinates, and normals in one flat,
//! 1-based global space, so emission runs in four passes over everything
//! being written: all `v` lines, all `vt` lines, all `vn` lines, then the
//! per-surface `g`/`f` groups referencing indices that are fully assigned
//! by the time faces are written. Vertices are emitted 1:1 with texcoords
//! and normals, so one index serves all three slots of a face corner.

use std::io::Write;

use glam::Vec2;

use crate::error::{Error, Result};
use crate::formats::md3::format::Md3Vertex;
use crate::formats::md3::model::{Md3Model, SurfaceData};
use crate::geometry::{decode_normal, ObjExportOptions};

/// Name given to the combined object in merge mode.
const MERGED_OBJECT_NAME: &str = "MergedMD3";

/// Assign each surface its 1-based starting OBJ index: a running prefix
/// sum of vertex counts in emission order.
pub fn base_indices(vertex_counts: impl IntoIterator<Item = usize>) -> Vec<usize> {
    let mut next = 1;
    vertex_counts
        .into_iter()
        .map(|count| {
            let base = next;
            next += count;
            base
        })
        .collect()
}

/// Fetch a surface's vertex block for `frame`, failing when the surface
/// stores fewer frames than requested. The decoder accepts surfaces whose
/// frame count differs from the model's, so emission must never assume
/// the model-level count.
fn frame_vertices<'a>(surface: &'a SurfaceData, frame: usize) -> Result<&'a [Md3Vertex]> {
    surface
        .frame_vertices(frame)
        .ok_or_else(|| Error::MissingFrameData {
            surface: surface.header.name.clone(),
            frame,
            available: surface.header.num_frames as usize,
        })
}

/// Write one animation frame of a model as a complete OBJ document.
pub fn write_obj_frame<W: Write>(
    out: &mut W,
    model: &Md3Model,
    frame: usize,
    options: ObjExportOptions,
) -> Result<()> {
    writeln!(out, "o {}", model.header.name)?;

    for surface in &model.surfaces {
        for vertex in frame_vertices(surface, frame)? {
            let p = options.apply_axis(vertex.position());
            writeln!(out, "v {:.6} {:.6} {:.6}", p.x, p.y, p.z)?;
        }
    }

    for surface in &model.surfaces {
        write_tex_coords(out, surface, options)?;
    }

    for surface in &model.surfaces {
        for vertex in frame_vertices(surface, frame)? {
            let n = options.apply_axis(decode_normal(vertex.normal));
            writeln!(out, "vn {:.6} {:.6} {:.6}", n.x, n.y, n.z)?;
        }
    }

    let bases = base_indices(model.surfaces.iter().map(SurfaceData::num_verts));
    for (surface, base) in model.surfaces.iter().zip(bases) {
        write_face_group(out, surface, base, options)?;
    }

    Ok(())
}

/// Write the first frame of several models as one combined OBJ document.
///
/// Models are emitted in slice order with a single running index counter
/// spanning all of them. Each model's positions and normals pass through
/// its first tag transform when it has one, identity otherwise.
pub fn write_merged_obj<W: Write>(
    out: &mut W,
    models: &[Md3Model],
    options: ObjExportOptions,
) -> Result<()> {
    writeln!(out, "o {MERGED_OBJECT_NAME}")?;

    for model in models {
        let tag = model.first_tag();
        for surface in &model.surfaces {
            for vertex in frame_vertices(surface, 0)? {
                let local = vertex.position();
                let world = tag.map_or(local, |t| t.transform_point(local));
                let p = options.apply_axis(world);
                writeln!(out, "v {:.6} {:.6} {:.6}", p.x, p.y, p.z)?;
            }
        }
    }

    for model in models {
        for surface in &model.surfaces {
            write_tex_coords(out, surface, options)?;
        }
    }

    for model in models {
        let tag = model.first_tag();
        for surface in &model.surfaces {
            for vertex in frame_vertices(surface, 0)? {
                let local = decode_normal(vertex.normal);
                let world = tag.map_or(local, |t| t.rotate(local));
                let n = options.apply_axis(world);
                writeln!(out, "vn {:.6} {:.6} {:.6}", n.x, n.y, n.z)?;
            }
        }
    }

    let bases = base_indices(
        models
            .iter()
            .flat_map(|m| m.surfaces.iter().map(SurfaceData::num_verts)),
    );
    let surfaces = models.iter().flat_map(|m| m.surfaces.iter());
    for (surface, base) in surfaces.zip(bases) {
        write_face_group(out, surface, base, options)?;
    }

    Ok(())
}

fn write_tex_coords<W: Write>(
    out: &mut W,
    surface: &SurfaceData,
    options: ObjExportOptions,
) -> Result<()> {
    for tc in &surface.tex_coords {
        let st = options.apply_uv(Vec2::new(tc.u, tc.v));
        writeln!(out, "vt {:.6} {:.6}", st.x, st.y)?;
    }
    Ok(())
}

fn write_face_group<W: Write>(
    out: &mut W,
    surface: &SurfaceData,
    base: usize,
    options: ObjExportOptions,
) -> Result<()> {
    writeln!(out, "g {}", surface.header.name)?;
    for triangle in &surface.triangles {
        let [a, b, c] = options.wind(triangle.indexes);
        let (i1, i2, i3) = (base + a as usize, base + b as usize, base + c as usize);
        writeln!(out, "f {i1}/{i1}/{i1} {i2}/{i2}/{i2} {i3}/{i3}/{i3}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_base_indices_are_prefix_sums() {
        assert_eq!(base_indices([3, 5, 2]), vec![1, 4, 9]);
        assert_eq!(base_indices([7]), vec![1]);
        assert_eq!(base_indices(std::iter::empty()), Vec::<usize>::new());
    }

    #[test]
    fn test_base_indices_span_models() {
        // Two models with surfaces [a, b] and [c]: the counter keeps
        // running across the model boundary.
        assert_eq!(base_indices([2, 3, 4]), vec![1, 3, 6]);
    }
}
