//! Coordinate and normal math for MD3 export
//!
//! Everything here is pure: the export policies are an explicit value
//! passed into the emitters, never ambient state.

use glam::{Vec2, Vec3};

use crate::formats::md3::format::Md3Tag;

/// Angle unit used by the packed normal encoding.
const NORMAL_SCALE: f32 = std::f32::consts::PI / 128.0;

/// Decode a packed MD3 normal into a unit vector.
///
/// The high byte is a latitude index, the low byte a longitude index,
/// each in units of pi/128. The result is unit length by construction;
/// no renormalization is applied.
pub fn decode_normal(encoded: u16) -> Vec3 {
    let lat = f32::from((encoded >> 8) & 0xFF) * NORMAL_SCALE;
    let lng = f32::from(encoded & 0xFF) * NORMAL_SCALE;
    Vec3::new(
        lat.cos() * lng.sin(),
        lat.sin() * lng.sin(),
        lng.cos(),
    )
}

/// Export policy switches, both enabled by default.
///
/// MD3 is Z-up while OBJ consumers usually expect Y-up, so `swap_yz`
/// exchanges the second and third components of positions and normals.
/// When it is disabled the triangle winding must be reversed instead to
/// keep faces outward; see [`ObjExportOptions::wind`]. `flip_uvs` inverts
/// the V texture coordinate for image origins at the bottom-left.
#[derive(Debug, Clone, Copy)]
pub struct ObjExportOptions {
    pub swap_yz: bool,
    pub flip_uvs: bool,
}

impl Default for ObjExportOptions {
    fn default() -> Self {
        Self {
            swap_yz: true,
            flip_uvs: true,
        }
    }
}

impl ObjExportOptions {
    /// Apply the axis policy to a position or normal.
    pub fn apply_axis(self, v: Vec3) -> Vec3 {
        if self.swap_yz {
            Vec3::new(v.x, v.z, v.y)
        } else {
            v
        }
    }

    /// Apply the UV policy. `u` is never modified.
    pub fn apply_uv(self, st: Vec2) -> Vec2 {
        if self.flip_uvs {
            Vec2::new(st.x, 1.0 - st.y)
        } else {
            st
        }
    }

    /// Order the three indices of a face for emission. With the axis swap
    /// disabled the handedness changes, so the winding is reversed (first
    /// and third exchanged) to preserve the intended facing.
    pub fn wind(self, indexes: [u32; 3]) -> [u32; 3] {
        if self.swap_yz {
            indexes
        } else {
            [indexes[2], indexes[1], indexes[0]]
        }
    }
}

impl Md3Tag {
    /// Place a local-space point into the shared merge space:
    /// `world = origin + axes . local`, with `axis` as row vectors.
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.origin
            + Vec3::new(
                self.axis[0].dot(local),
                self.axis[1].dot(local),
                self.axis[2].dot(local),
            )
    }

    /// Rotate a direction into the shared merge space (no translation).
    pub fn rotate(&self, local: Vec3) -> Vec3 {
        Vec3::new(
            self.axis[0].dot(local),
            self.axis[1].dot(local),
            self.axis[2].dot(local),
        )
    }
}
