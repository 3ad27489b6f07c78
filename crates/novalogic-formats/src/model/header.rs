//! 3DI file header and level-of-detail table

use crate::cursor::{FixedSize, fixed_str};
use binrw::BinRead;

/// Signature of version 8 files, `3DI\x08`
pub const MODEL_SIGNATURE: u32 = 0x0849_4433;

/// Tag of the generic LOD renderer, `crng`
pub const RENDER_GENERIC: u32 = 0x676E_7263;

/// Renderer selected for a level of detail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderType {
    /// Level not rendered
    None,
    /// Generic renderer
    Generic,
    /// Unrecognised tag
    Other(u32),
}

impl From<u32> for RenderType {
    fn from(tag: u32) -> Self {
        match tag {
            0 => Self::None,
            RENDER_GENERIC => Self::Generic,
            other => Self::Other(other),
        }
    }
}

/// Level-of-detail table
#[derive(BinRead, Debug, Clone, PartialEq, Eq)]
#[br(little)]
pub struct LodInfo {
    /// Number of LOD blocks in the file
    pub count: u32,
    /// Switch distances for high, medium, low and tiny detail
    pub distances: [u32; 4],
    /// Render-type tags for high, medium, low and tiny detail
    pub render_tags: [u32; 4],
}

impl FixedSize for LodInfo {
    const SIZE: usize = 36;
}

impl LodInfo {
    /// Render types for high, medium, low and tiny detail
    pub fn render_types(&self) -> [RenderType; 4] {
        self.render_tags.map(RenderType::from)
    }
}

/// 128-byte file header
#[derive(BinRead, Debug, Clone, PartialEq, Eq)]
#[br(little)]
pub struct ModelHeader {
    /// File signature
    pub signature: u32,
    /// NUL-padded model name
    pub name: [u8; 12],
    /// Unused
    pub gap0: u32,
    /// Level-of-detail table
    pub lod_info: LodInfo,
    /// Unused
    pub gap1: [u8; 68],
    /// Number of embedded textures
    pub texture_count: i32,
}

impl FixedSize for ModelHeader {
    const SIZE: usize = 128;
}

impl ModelHeader {
    /// Model name
    pub fn name(&self) -> String {
        fixed_str(&self.name)
    }
}
