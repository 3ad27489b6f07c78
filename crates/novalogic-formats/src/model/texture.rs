//! Embedded paletted textures

use crate::cursor::{ByteCursor, FixedSize, fixed_str};
use crate::image::Palette;
use crate::model::error::{ModelError, ModelResult};
use binrw::BinRead;

/// Size of the palette following each texture, 256 B,G,R,A entries
pub const PALETTE_SIZE: usize = 1024;

/// 52-byte texture header
#[derive(BinRead, Debug, Clone, PartialEq, Eq)]
#[br(little)]
pub struct TextureHeader {
    /// NUL-padded texture name
    pub name: [u8; 28],
    /// Length of the scanline data that follows
    pub byte_size: i32,
    /// Texture slot referenced by materials
    pub index: u16,
    /// Texture flags
    pub flags: u16,
    /// Width in pixels
    pub width: u16,
    /// Height in pixels
    pub height: u16,
    /// In-memory pointers written by the engine
    pub reserved: [u32; 3],
}

impl FixedSize for TextureHeader {
    const SIZE: usize = 52;
}

/// A decoded texture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelTexture {
    /// Texture name
    pub name: String,
    /// Texture slot referenced by materials
    pub index: u16,
    /// Texture flags
    pub flags: u16,
    /// Width in pixels
    pub width: u16,
    /// Height in pixels
    pub height: u16,
    /// Bytes per source pixel: 1 for index only, 2 for index and alpha
    pub stride: usize,
    /// Row-major R,G,B,A pixels
    pub pixels: Vec<u8>,
}

impl ModelTexture {
    /// Read a header, its scanlines and palette
    pub fn read(cursor: &mut ByteCursor<'_>) -> ModelResult<Self> {
        let header: TextureHeader = cursor.read_record()?;
        let byte_size = usize::try_from(header.byte_size).map_err(|_| {
            ModelError::MalformedRecord(format!(
                "texture {} has negative size {}",
                fixed_str(&header.name),
                header.byte_size
            ))
        })?;
        let scanlines = cursor.read_bytes(byte_size)?;
        let palette = cursor.read_bytes(PALETTE_SIZE)?;
        Self::decode(&header, scanlines, palette)
    }

    /// Expand palette indices to R,G,B,A.
    ///
    /// Pixels are read linearly, `stride` bytes apart, which only lines up
    /// with the engine's layout for power-of-two sizes.
    pub fn decode(header: &TextureHeader, scanlines: &[u8], palette: &[u8]) -> ModelResult<Self> {
        let name = fixed_str(&header.name);
        let area = usize::from(header.width) * usize::from(header.height);
        if area == 0 {
            return Err(ModelError::MalformedRecord(format!(
                "texture {name} is {}x{}",
                header.width, header.height
            )));
        }

        let stride = scanlines.len() / area;
        if !matches!(stride, 1 | 2) {
            return Err(ModelError::MalformedRecord(format!(
                "texture {name} has {} bytes for {area} pixels",
                scanlines.len()
            )));
        }

        let palette = Palette::new(palette, 4);
        let mut pixels = Vec::with_capacity(area * 4);
        for source in scanlines.chunks_exact(stride).take(area) {
            let index = source[0];
            let alpha = if stride == 2 { source[1] } else { u8::MAX };
            let bgra = palette.entry(index).ok_or_else(|| {
                ModelError::MalformedRecord(format!(
                    "texture {name} colour {index} outside a {}-entry palette",
                    palette.len()
                ))
            })?;
            pixels.extend_from_slice(&[bgra[2], bgra[1], bgra[0], alpha]);
        }

        Ok(Self {
            name,
            index: header.index,
            flags: header.flags,
            width: header.width,
            height: header.height,
            stride,
            pixels,
        })
    }

    /// R,G,B,A of one pixel
    pub fn pixel(&self, x: u16, y: u16) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let start = (usize::from(y) * usize::from(self.width) + usize::from(x)) * 4;
        let px = self.pixels.get(start..start + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}
