//! Fixed-size records stored inside a LOD block

use crate::cursor::{FixedSize, fixed_str};
use binrw::BinRead;

/// Scale of the 16.16 fixed-point texture coordinates
pub const UV_SCALE: f32 = 65536.0;

/// Size of a part-animation record
pub const PART_ANIM_SIZE: usize = 0x0C;

/// Size of a collision-plane record
pub const COL_PLANE_SIZE: usize = 0x08;

/// Size of a collision-volume record
pub const COL_VOLUME_SIZE: usize = 0x50;

/// Vertex position or normal
#[derive(BinRead, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[br(little)]
pub struct Vec4 {
    /// X
    pub x: i16,
    /// Y
    pub y: i16,
    /// Z
    pub z: i16,
    /// W
    pub w: i16,
}

impl FixedSize for Vec4 {
    const SIZE: usize = 8;
}

impl Vec4 {
    /// X, Y and Z as floats
    pub fn xyz(self) -> [f32; 3] {
        [f32::from(self.x), f32::from(self.y), f32::from(self.z)]
    }
}

/// 72-byte triangle record
#[derive(BinRead, Debug, Clone, PartialEq, Eq)]
#[br(little)]
pub struct ModelFace {
    /// Unused
    pub reserved: i16,
    /// Surface type
    pub surface_index: i16,
    /// U coordinate per corner, 16.16 fixed point
    pub tu: [i32; 3],
    /// V coordinate per corner, 16.16 fixed point
    pub tv: [i32; 3],
    /// Vertex index per corner, local to the owning sub-object
    pub vertices: [i16; 3],
    /// Normal index per corner, local to the owning sub-object
    pub normals: [i16; 3],
    /// Plane distance
    pub distance: i32,
    /// Bounding box
    pub bounds: [i32; 6],
    /// Index into the LOD's material table
    pub material_index: i32,
}

impl FixedSize for ModelFace {
    const SIZE: usize = 72;
}

impl ModelFace {
    /// Texture coordinate of corner `k` (0..3)
    pub fn uv(&self, k: usize) -> [f32; 2] {
        // 16.16 values lose precision past 2^24, far outside texture space
        #[allow(clippy::cast_precision_loss)]
        [self.tu[k] as f32 / UV_SCALE, self.tv[k] as f32 / UV_SCALE]
    }
}

/// 112-byte sub-object record
#[derive(BinRead, Debug, Clone, PartialEq, Eq)]
#[br(little)]
pub struct ModelSubObject {
    /// Unused
    pub gap0: i32,
    /// Vertices owned by this sub-object
    pub n_verts: i32,
    /// In-memory pointer
    pub ptr_verts: i32,
    /// Faces owned by this sub-object
    pub n_faces: i32,
    /// In-memory pointer
    pub ptr_faces: i32,
    /// Normals owned by this sub-object
    pub n_normals: i32,
    /// In-memory pointer
    pub ptr_normals: i32,
    /// Collision volumes owned by this sub-object
    pub n_col_volumes: i32,
    /// In-memory pointer
    pub ptr_col_volumes: i32,
    /// Bone this sub-object is attached to
    pub parent_bone: i32,
    /// Offset relative to the parent bone
    pub diff_offset_raw: [i32; 3],
    /// Bone offset
    pub bone_offset_raw: [i32; 3],
    /// Unused
    pub gap1: [u8; 48],
}

impl FixedSize for ModelSubObject {
    const SIZE: usize = 112;
}

impl ModelSubObject {
    /// Vertex count, zero when negative
    pub fn vertex_count(&self) -> usize {
        usize::try_from(self.n_verts).unwrap_or(0)
    }

    /// Face count, zero when negative
    pub fn face_count(&self) -> usize {
        usize::try_from(self.n_faces).unwrap_or(0)
    }

    /// Normal count, zero when negative
    pub fn normal_count(&self) -> usize {
        usize::try_from(self.n_normals).unwrap_or(0)
    }

    /// Bone offset as the engine applies it: the low byte shifted right by 8
    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    pub fn bone_offset(&self) -> [i32; 3] {
        self.bone_offset_raw.map(|raw| i32::from(raw as u8) >> 8)
    }

    /// Parent-relative offset truncated to its low byte
    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    pub fn diff_offset(&self) -> [u8; 3] {
        self.diff_offset_raw.map(|raw| raw as u8)
    }
}

/// 120-byte material record
#[derive(BinRead, Debug, Clone, PartialEq, Eq)]
#[br(little)]
pub struct ModelMaterial {
    /// NUL-padded material name
    pub name: [u8; 16],
    /// Material flags
    pub flags: u8,
    /// Padding
    pub pad: [u8; 3],
    /// Unused
    pub gap: u32,
    /// Unused
    pub reserved0: [u32; 7],
    /// Texture slot used by faces with this material
    pub texture_index: u8,
    /// Secondary index
    pub index_b: u8,
    /// Secondary index
    pub index_w: u8,
    /// Secondary index
    pub index_a: u8,
    /// Unused
    pub reserved1: [u32; 16],
}

impl FixedSize for ModelMaterial {
    const SIZE: usize = 0x78;
}

impl ModelMaterial {
    /// Material name
    pub fn name(&self) -> String {
        fixed_str(&self.name)
    }
}
