//! MD3 file format structures
//!
//! Based on the id Software Quake III Arena model format, version 15.
//! All multi-byte fields are little-endian and packed with no padding.

use byteorder::{LittleEndian, ReadBytesExt};
use glam::Vec3;
use std::io::Read;

use crate::error::{Error, Result};

/// Magic tag at the start of the file header and of every surface block.
pub const MD3_MAGIC: [u8; 4] = *b"IDP3";

/// The only supported format version.
pub const MD3_VERSION: u32 = 15;

/// Vertex positions are stored as fixed-point with 6 fractional bits.
pub const MD3_XYZ_SCALE: f32 = 1.0 / 64.0;

/// Length of every name field in the format.
pub const MAX_QPATH: usize = 64;

/// Read a fixed-length, NUL-padded name field.
fn read_name<R: Read>(reader: &mut R) -> Result<String> {
    let mut raw = [0u8; MAX_QPATH];
    reader.read_exact(&mut raw)?;
    let end = raw.iter().position(|&b| b == 0).unwrap_or(MAX_QPATH);
    Ok(String::from_utf8_lossy(&raw[..end]).into_owned())
}

/// File header (108 bytes at offset 0)
#[derive(Debug, Clone)]
pub struct Md3Header {
    /// Model display name
    pub name: String,
    /// Unused flag bits
    pub flags: u32,
    /// Number of animation frames
    pub num_frames: u32,
    /// Number of attachment tags (per frame)
    pub num_tags: u32,
    /// Number of surfaces
    pub num_surfaces: u32,
    /// Number of skins (legacy, unused by the format)
    pub num_skins: u32,
    /// Offset to the frame bounds block
    pub ofs_frames: u32,
    /// Offset to the tag block
    pub ofs_tags: u32,
    /// Offset to the first surface block
    pub ofs_surfaces: u32,
    /// Offset to the end of model data
    pub ofs_end: u32,
}

impl Md3Header {
    pub const SIZE: usize = 108;

    /// Read and validate the file header.
    ///
    /// `file_size` is the true byte length of the backing file; the
    /// declared end-of-data offset must not exceed it.
    pub fn read<R: Read>(reader: &mut R, file_size: u64) -> Result<Self> {
        let mut magic = [0u8; 4];
        reader.read_exact(&mut magic)?;
        if magic != MD3_MAGIC {
            return Err(Error::InvalidMd3Magic(magic));
        }

        let version = reader.read_u32::<LittleEndian>()?;
        if version != MD3_VERSION {
            return Err(Error::UnsupportedMd3Version { version });
        }

        let name = read_name(reader)?;
        let flags = reader.read_u32::<LittleEndian>()?;
        let num_frames = reader.read_u32::<LittleEndian>()?;
        let num_tags = reader.read_u32::<LittleEndian>()?;
        let num_surfaces = reader.read_u32::<LittleEndian>()?;
        let num_skins = reader.read_u32::<LittleEndian>()?;
        let ofs_frames = reader.read_u32::<LittleEndian>()?;
        let ofs_tags = reader.read_u32::<LittleEndian>()?;
        let ofs_surfaces = reader.read_u32::<LittleEndian>()?;
        let ofs_end = reader.read_u32::<LittleEndian>()?;

        if u64::from(ofs_end) > file_size {
            return Err(Error::Truncated {
                ofs_end: u64::from(ofs_end),
                file_size,
            });
        }

        Ok(Self {
            name,
            flags,
            num_frames,
            num_tags,
            num_surfaces,
            num_skins,
            ofs_frames,
            ofs_tags,
            ofs_surfaces,
            ofs_end,
        })
    }
}

/// Surface header (108 bytes at the start of each surface block).
///
/// All offsets in this header are relative to the surface block's own
/// start, not to the start of the file.
#[derive(Debug, Clone)]
pub struct Md3SurfaceHeader {
    /// Surface name (becomes the OBJ group name)
    pub name: String,
    /// Unused flag bits
    pub flags: u32,
    /// Number of animation frames in this surface's vertex block
    pub num_frames: u32,
    /// Number of shader records (not decoded)
    pub num_shaders: u32,
    /// Vertices per frame
    pub num_verts: u32,
    /// Triangle count
    pub num_triangles: u32,
    /// Offset to the triangle block
    pub ofs_triangles: u32,
    /// Offset to the shader block (not decoded)
    pub ofs_shaders: u32,
    /// Offset to the texture coordinate block
    pub ofs_st: u32,
    /// Offset to the all-frames vertex block
    pub ofs_verts: u32,
    /// Offset to the end of this surface block
    pub ofs_end: u32,
}

impl Md3SurfaceHeader {
    pub const SIZE: usize = 108;

    /// Read a surface header. `index` is used only for error reporting.
    pub fn read<R: Read>(reader: &mut R, index: usize) -> Result<Self> {
        let mut magic = [0u8; 4];
        reader.read_exact(&mut magic)?;
        if magic != MD3_MAGIC {
            return Err(Error::InvalidSurfaceMagic {
                index,
                found: magic,
            });
        }

        let name = read_name(reader)?;

        Ok(Self {
            name,
            flags: reader.read_u32::<LittleEndian>()?,
            num_frames: reader.read_u32::<LittleEndian>()?,
            num_shaders: reader.read_u32::<LittleEndian>()?,
            num_verts: reader.read_u32::<LittleEndian>()?,
            num_triangles: reader.read_u32::<LittleEndian>()?,
            ofs_triangles: reader.read_u32::<LittleEndian>()?,
            ofs_shaders: reader.read_u32::<LittleEndian>()?,
            ofs_st: reader.read_u32::<LittleEndian>()?,
            ofs_verts: reader.read_u32::<LittleEndian>()?,
            ofs_end: reader.read_u32::<LittleEndian>()?,
        })
    }
}

/// Triangle record (12 bytes): three indices into the surface's vertex block.
#[derive(Debug, Clone, Copy)]
pub struct Md3Triangle {
    pub indexes: [u32; 3],
}

impl Md3Triangle {
    pub const SIZE: usize = 12;

    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        let mut indexes = [0u32; 3];
        for index in &mut indexes {
            *index = reader.read_u32::<LittleEndian>()?;
        }
        Ok(Self { indexes })
    }
}

/// Texture coordinate record (8 bytes), one per vertex, frame-invariant.
#[derive(Debug, Clone, Copy)]
pub struct Md3TexCoord {
    pub u: f32,
    pub v: f32,
}

impl Md3TexCoord {
    pub const SIZE: usize = 8;

    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        Ok(Self {
            u: reader.read_f32::<LittleEndian>()?,
            v: reader.read_f32::<LittleEndian>()?,
        })
    }
}

/// Vertex record (8 bytes): fixed-point position plus an encoded normal.
///
/// The normal packs two angles into 16 bits: latitude in the high byte,
/// longitude in the low byte, each in units of pi/128. See
/// [`crate::geometry::decode_normal`].
#[derive(Debug, Clone, Copy)]
pub struct Md3Vertex {
    /// Position components, scaled by [`MD3_XYZ_SCALE`]
    pub xyz: [i16; 3],
    /// Packed normal angles
    pub normal: u16,
}

impl Md3Vertex {
    pub const SIZE: usize = 8;

    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        let mut xyz = [0i16; 3];
        for component in &mut xyz {
            *component = reader.read_i16::<LittleEndian>()?;
        }
        Ok(Self {
            xyz,
            normal: reader.read_u16::<LittleEndian>()?,
        })
    }

    /// Decode the fixed-point position into model units.
    pub fn position(&self) -> Vec3 {
        Vec3::new(
            f32::from(self.xyz[0]) * MD3_XYZ_SCALE,
            f32::from(self.xyz[1]) * MD3_XYZ_SCALE,
            f32::from(self.xyz[2]) * MD3_XYZ_SCALE,
        )
    }
}

/// Tag record (112 bytes): a named rigid transform attaching one model to
/// another. `axis` holds the orientation as three row vectors.
#[derive(Debug, Clone)]
pub struct Md3Tag {
    pub name: String,
    pub origin: Vec3,
    pub axis: [Vec3; 3],
}

impl Md3Tag {
    pub const SIZE: usize = 112;

    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        let name = read_name(reader)?;
        let origin = read_vec3(reader)?;
        let axis = [read_vec3(reader)?, read_vec3(reader)?, read_vec3(reader)?];
        Ok(Self { name, origin, axis })
    }
}

fn read_vec3<R: Read>(reader: &mut R) -> Result<Vec3> {
    Ok(Vec3::new(
        reader.read_f32::<LittleEndian>()?,
        reader.read_f32::<LittleEndian>()?,
        reader.read_f32::<LittleEndian>()?,
    ))
}
