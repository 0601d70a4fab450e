//! In-memory MD3 model and the decode walk that builds it

use std::io::Cursor;
use std::path::Path;

use crate::error::Result;
use crate::formats::md3::format::{
    Md3Header, Md3SurfaceHeader, Md3Tag, Md3TexCoord, Md3Triangle, Md3Vertex,
};
use crate::formats::md3::reader::Md3Reader;

/// One decoded surface: its header plus owned geometry blocks.
///
/// `vertices` holds `num_verts * num_frames` entries, frame-major: frame
/// `f` occupies `f * num_verts .. (f + 1) * num_verts`.
#[derive(Debug, Clone)]
pub struct SurfaceData {
    pub header: Md3SurfaceHeader,
    pub triangles: Vec<Md3Triangle>,
    pub tex_coords: Vec<Md3TexCoord>,
    pub vertices: Vec<Md3Vertex>,
}

impl SurfaceData {
    /// Vertices per frame.
    pub fn num_verts(&self) -> usize {
        self.header.num_verts as usize
    }

    /// The vertex block for one animation frame, or `None` when the
    /// surface stores fewer frames than `frame` requires. Surfaces may
    /// legally store a different frame count than the model declares, so
    /// callers must not index by the model-level count.
    pub fn frame_vertices(&self, frame: usize) -> Option<&[Md3Vertex]> {
        let start = frame.checked_mul(self.num_verts())?;
        let end = start.checked_add(self.num_verts())?;
        self.vertices.get(start..end)
    }
}

/// A fully decoded MD3 model.
///
/// Ownership is tree-shaped; dropping the model releases every decoded
/// block, including on the error paths out of [`Md3Model::from_bytes`].
#[derive(Debug, Clone)]
pub struct Md3Model {
    pub header: Md3Header,
    pub surfaces: Vec<SurfaceData>,
    /// Frame-0 attachment tags. Empty when the file has none or when the
    /// tag block could not be read (tag failures are soft).
    pub tags: Vec<Md3Tag>,
}

impl Md3Model {
    /// Decode a model from raw file bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut reader = Md3Reader::new(data);

        let header_bytes = reader.read_at(0, Md3Header::SIZE as u64)?;
        let header = Md3Header::read(&mut Cursor::new(header_bytes), reader.len())?;

        let tags = decode_tags(&mut reader, &header);
        let surfaces = decode_surfaces(&mut reader, &header)?;

        Ok(Self {
            header,
            surfaces,
            tags,
        })
    }

    /// Read and decode a model from a file on disk.
    pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read(path.as_ref())?;
        Self::from_bytes(&data)
    }

    /// The first attachment tag, used to place this model in merge mode.
    pub fn first_tag(&self) -> Option<&Md3Tag> {
        self.tags.first()
    }

    /// Total vertices across all surfaces for a single frame.
    pub fn frame_vertex_count(&self) -> usize {
        self.surfaces.iter().map(SurfaceData::num_verts).sum()
    }
}

/// Walk the surface list sequentially from `ofs_surfaces`.
///
/// Each surface header is read at the current cursor position; the blocks
/// it declares are read at offsets relative to the surface's start, and
/// the cursor then jumps to `surface_start + ofs_end` so padding between
/// surfaces is skipped. Any failure aborts the whole decode.
fn decode_surfaces(reader: &mut Md3Reader<'_>, header: &Md3Header) -> Result<Vec<SurfaceData>> {
    reader.set_position(u64::from(header.ofs_surfaces))?;

    let mut surfaces = Vec::with_capacity(header.num_surfaces as usize);
    for s in 0..header.num_surfaces as usize {
        let surface_start = reader.position();

        let head_bytes = reader.read_cursor(Md3SurfaceHeader::SIZE as u64)?;
        let surf = Md3SurfaceHeader::read(&mut Cursor::new(head_bytes), s)?;

        if surf.num_frames != header.num_frames {
            tracing::warn!(
                surface = %surf.name,
                surface_frames = surf.num_frames,
                model_frames = header.num_frames,
                "surface frame count differs from model frame count"
            );
        }

        let triangles = read_block(
            reader,
            surface_start + u64::from(surf.ofs_triangles),
            u64::from(surf.num_triangles),
            Md3Triangle::SIZE,
            Md3Triangle::read,
        )?;

        let tex_coords = read_block(
            reader,
            surface_start + u64::from(surf.ofs_st),
            u64::from(surf.num_verts),
            Md3TexCoord::SIZE,
            Md3TexCoord::read,
        )?;

        let vertices = read_block(
            reader,
            surface_start + u64::from(surf.ofs_verts),
            u64::from(surf.num_verts) * u64::from(surf.num_frames),
            Md3Vertex::SIZE,
            Md3Vertex::read,
        )?;

        reader.set_position(surface_start + u64::from(surf.ofs_end))?;

        surfaces.push(SurfaceData {
            header: surf,
            triangles,
            tex_coords,
            vertices,
        });
    }

    Ok(surfaces)
}

/// Read a counted block of fixed-size records at an absolute offset.
fn read_block<'a, T>(
    reader: &mut Md3Reader<'a>,
    offset: u64,
    count: u64,
    record_size: usize,
    read_one: impl Fn(&mut Cursor<&'a [u8]>) -> Result<T>,
) -> Result<Vec<T>> {
    // Hostile counts could wrap the byte length; treat that as a read
    // past the end of the file.
    let byte_len = count
        .checked_mul(record_size as u64)
        .ok_or(crate::error::Error::OutOfBounds {
            offset,
            len: u64::MAX,
            file_size: reader.len(),
        })?;
    let bytes = reader.read_at(offset, byte_len)?;
    let mut cursor = Cursor::new(bytes);
    let mut records = Vec::with_capacity(count as usize);
    for _ in 0..count {
        records.push(read_one(&mut cursor)?);
    }
    Ok(records)
}

/// Read the frame-0 tag set. Tag failures are soft: a model whose tag
/// block is unreadable is treated as having no tags, never rejected.
fn decode_tags(reader: &mut Md3Reader<'_>, header: &Md3Header) -> Vec<Md3Tag> {
    if header.num_tags == 0 {
        return Vec::new();
    }

    let result = read_block(
        reader,
        u64::from(header.ofs_tags),
        u64::from(header.num_tags),
        Md3Tag::SIZE,
        Md3Tag::read,
    );

    match result {
        Ok(tags) => tags,
        Err(e) => {
            tracing::warn!(model = %header.name, error = %e, "could not read tags; treating model as untagged");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use byteorder::{LittleEndian as LE, WriteBytesExt};
    use crate::error::Error;
    use crate::formats::md3::format::{MAX_QPATH, MD3_MAGIC, MD3_VERSION};

    fn push_name(buf: &mut Vec<u8>, name: &str) {
        let mut raw = [0u8; MAX_QPATH];
        raw[..name.len()].copy_from_slice(name.as_bytes());
        buf.extend_from_slice(&raw);
    }

    /// One surface with `num_verts` vertices, one triangle, `num_frames`
    /// frames. Geometry is laid out immediately after the surface header.
    fn surface_bytes(name: &str, num_verts: u32, num_frames: u32) -> Vec<u8> {
        let tri_size = 12u32;
        let st_size = num_verts * 8;
        let vert_size = num_verts * num_frames * 8;

        let ofs_triangles = 108;
        let ofs_st = ofs_triangles + tri_size;
        let ofs_verts = ofs_st + st_size;
        let ofs_end = ofs_verts + vert_size;

        let mut buf = Vec::new();
        buf.extend_from_slice(&MD3_MAGIC);
        push_name(&mut buf, name);
        for value in [
            0,
            num_frames,
            0,
            num_verts,
            1,
            ofs_triangles,
            0,
            ofs_st,
            ofs_verts,
            ofs_end,
        ] {
            buf.write_u32::<LE>(value).unwrap();
        }

        // One triangle over the first three vertices (wrapping if fewer).
        for i in 0..3u32 {
            buf.write_u32::<LE>(i % num_verts).unwrap();
        }
        for i in 0..num_verts {
            buf.write_f32::<LE>(i as f32 * 0.1).unwrap();
            buf.write_f32::<LE>(i as f32 * 0.2).unwrap();
        }
        for frame in 0..num_frames {
            for i in 0..num_verts {
                buf.write_i16::<LE>((frame * 64 + i * 32) as i16).unwrap();
                buf.write_i16::<LE>(0).unwrap();
                buf.write_i16::<LE>(0).unwrap();
                buf.write_u16::<LE>(0).unwrap();
            }
        }
        buf
    }

    fn model_bytes(num_frames: u32, surfaces: &[Vec<u8>], num_tags: u32, ofs_tags: u32) -> Vec<u8> {
        let surfaces_len: usize = surfaces.iter().map(Vec::len).sum();
        let ofs_surfaces = 108u32;
        let ofs_end = ofs_surfaces + surfaces_len as u32;

        let mut buf = Vec::new();
        buf.extend_from_slice(&MD3_MAGIC);
        buf.write_u32::<LE>(MD3_VERSION).unwrap();
        push_name(&mut buf, "test_model");
        for value in [
            0,
            num_frames,
            num_tags,
            surfaces.len() as u32,
            0,
            ofs_end,
            ofs_tags,
            ofs_surfaces,
            ofs_end,
        ] {
            buf.write_u32::<LE>(value).unwrap();
        }
        for surface in surfaces {
            buf.extend_from_slice(surface);
        }
        buf
    }

    #[test]
    fn test_decode_single_surface_model() {
        let data = model_bytes(2, &[surface_bytes("body", 3, 2)], 0, 0);
        let model = Md3Model::from_bytes(&data).unwrap();

        assert_eq!(model.header.name, "test_model");
        assert_eq!(model.surfaces.len(), 1);
        assert_eq!(model.surfaces[0].header.name, "body");
        assert_eq!(model.surfaces[0].triangles.len(), 1);
        assert_eq!(model.surfaces[0].tex_coords.len(), 3);
        assert_eq!(model.surfaces[0].vertices.len(), 6);
        assert!(model.tags.is_empty());
    }

    #[test]
    fn test_decode_multiple_surfaces_with_padding() {
        // Pad the first surface so the second only parses if the cursor
        // jumps by the declared surface end offset.
        let mut first = surface_bytes("head", 2, 1);
        let declared_end = first.len() as u32 + 16;
        first[104..108].copy_from_slice(&declared_end.to_le_bytes());
        first.extend_from_slice(&[0xAA; 16]);

        let second = surface_bytes("torso", 4, 1);
        let data = model_bytes(1, &[first, second], 0, 0);
        let model = Md3Model::from_bytes(&data).unwrap();

        assert_eq!(model.surfaces.len(), 2);
        assert_eq!(model.surfaces[1].header.name, "torso");
        assert_eq!(model.frame_vertex_count(), 6);
    }

    #[test]
    fn test_decode_fails_on_surface_block_overrun() {
        let mut surface = surface_bytes("body", 3, 1);
        // Point the vertex block past the end of the file.
        surface[100..104].copy_from_slice(&0xFFFF_u32.to_le_bytes());
        let data = model_bytes(1, &[surface], 0, 0);

        let err = Md3Model::from_bytes(&data).unwrap_err();
        assert!(matches!(err, Error::OutOfBounds { .. }));
    }

    #[test]
    fn test_decode_fails_on_bad_surface_magic() {
        let mut surface = surface_bytes("body", 3, 1);
        surface[0..4].copy_from_slice(b"XXXX");
        let data = model_bytes(1, &[surface], 0, 0);

        let err = Md3Model::from_bytes(&data).unwrap_err();
        assert!(matches!(err, Error::InvalidSurfaceMagic { index: 0, .. }));
    }

    #[test]
    fn test_frame_vertices_refuses_frames_the_surface_lacks() {
        // The decoder accepts a surface storing fewer frames than the
        // model declares; the accessor must refuse the missing frame
        // rather than slice past the vertex buffer.
        let data = model_bytes(2, &[surface_bytes("body", 3, 1)], 0, 0);
        let model = Md3Model::from_bytes(&data).unwrap();

        assert_eq!(model.surfaces[0].frame_vertices(0).unwrap().len(), 3);
        assert!(model.surfaces[0].frame_vertices(1).is_none());
    }

    #[test]
    fn test_unreadable_tags_degrade_to_none() {
        // num_tags > 0 but ofs_tags points past the end of the file; the
        // model must still decode, just without tags.
        let data = model_bytes(1, &[surface_bytes("body", 3, 1)], 2, 0xFFFF);
        let model = Md3Model::from_bytes(&data).unwrap();
        assert!(model.tags.is_empty());
        assert_eq!(model.surfaces.len(), 1);
    }

    #[test]
    fn test_tags_decode_when_present() {
        let mut tag_block = Vec::new();
        push_name(&mut tag_block, "tag_weapon");
        for value in [
            1.0f32, 2.0, 3.0, // origin
            1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, // identity axes
        ] {
            tag_block.write_f32::<LE>(value).unwrap();
        }

        let surface = surface_bytes("body", 2, 1);
        let ofs_tags = 108 + surface.len() as u32;
        let mut data = model_bytes(1, &[surface], 1, ofs_tags);
        data.extend_from_slice(&tag_block);
        // Widen the declared end to cover the appended tag block.
        let total = data.len() as u32;
        data[104..108].copy_from_slice(&total.to_le_bytes());

        let model = Md3Model::from_bytes(&data).unwrap();
        assert_eq!(model.tags.len(), 1);
        assert_eq!(model.tags[0].name, "tag_weapon");
        assert_eq!(model.tags[0].origin, glam::Vec3::new(1.0, 2.0, 3.0));
    }
}
