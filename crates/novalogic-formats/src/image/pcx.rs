//! ZSoft PCX decoder
//!
//! Only single-plane 8-bit indexed images are decoded, which covers every
//! PCX the games ship. Version 5 files carry a 256-colour palette after the
//! pixel data, introduced by the byte `0x0C`; older files use the 16-colour
//! map in the header.
//!
//! Pixel data is run-length encoded: a byte with both high bits set is a
//! run count (low 6 bits) followed by the value to repeat, any other byte is
//! a literal pixel.

use crate::cursor::{ByteCursor, FixedSize};
use crate::image::error::{ImageError, ImageResult};
use crate::image::palette::Palette;
use crate::image::{DecodedImage, PixelFormat};
use binrw::BinRead;
use tracing::debug;

/// Manufacturer byte of every ZSoft PCX file
pub const PCX_MANUFACTURER: u8 = 10;

/// Encoding byte for run-length encoded data
pub const PCX_ENCODING_RLE: u8 = 1;

/// Byte introducing the trailing 256-colour palette
pub const PALETTE_MARKER: u8 = 0x0C;

/// Size of the trailing 256-colour palette
pub const VGA_PALETTE_SIZE: usize = 768;

const RUN_FLAG: u8 = 0xC0;
const RUN_MASK: u8 = 0x3F;

/// Image window in pixel coordinates, inclusive
#[derive(BinRead, Debug, Clone, Copy, PartialEq, Eq)]
#[br(little)]
pub struct PcxWindow {
    /// Left edge
    pub x_min: u16,
    /// Top edge
    pub y_min: u16,
    /// Right edge
    pub x_max: u16,
    /// Bottom edge
    pub y_max: u16,
}

/// 128-byte PCX header
#[derive(BinRead, Debug, Clone, PartialEq, Eq)]
#[br(little)]
pub struct PcxHeader {
    /// Always 10
    pub manufacturer: u8,
    /// Format version; 5 and above may carry a 256-colour palette
    pub version: u8,
    /// 1 for run-length encoding
    pub encoding: u8,
    /// Bits per pixel per plane
    pub bits_per_pixel: u8,
    /// Image bounds
    pub window: PcxWindow,
    /// Horizontal resolution
    pub h_dpi: u16,
    /// Vertical resolution
    pub v_dpi: u16,
    /// 16-colour RGB palette
    pub colormap: [u8; 48],
    /// Unused
    pub reserved: u8,
    /// Colour planes
    pub planes: u8,
    /// Bytes per scanline per plane, always even
    pub bytes_per_line: u16,
    /// Palette interpretation hint
    pub palette_info: u16,
    /// Horizontal screen size
    pub h_screen_size: u16,
    /// Vertical screen size
    pub v_screen_size: u16,
    /// Padding to 128 bytes
    pub filler: [u8; 54],
}

impl FixedSize for PcxHeader {
    const SIZE: usize = 128;
}

impl PcxHeader {
    /// Image width in pixels
    pub fn width(&self) -> ImageResult<u32> {
        span(self.window.x_min, self.window.x_max, "x")
    }

    /// Image height in pixels
    pub fn height(&self) -> ImageResult<u32> {
        span(self.window.y_min, self.window.y_max, "y")
    }

    /// Whether the image stores 24-bit colour as three 8-bit planes
    pub fn is_rgb_planes(&self) -> bool {
        self.version >= 5 && self.bits_per_pixel == 8 && self.planes == 3
    }

    /// Whether a 256-colour palette follows the pixel data
    pub fn has_vga_palette(&self) -> bool {
        self.version >= 5
    }

    fn check_supported(&self) -> ImageResult<()> {
        check_manufacturer(self.manufacturer)?;
        if self.is_rgb_planes() {
            return Err(ImageError::Unsupported(
                "24-bit PCX stored as three colour planes".to_string(),
            ));
        }
        if self.encoding != PCX_ENCODING_RLE {
            return Err(ImageError::Unsupported(format!(
                "PCX encoding {}",
                self.encoding
            )));
        }
        if self.bits_per_pixel != 8 || self.planes != 1 {
            return Err(ImageError::Unsupported(format!(
                "PCX with {} bits per pixel and {} planes",
                self.bits_per_pixel, self.planes
            )));
        }
        Ok(())
    }
}

fn span(min: u16, max: u16, axis: &str) -> ImageResult<u32> {
    if max < min {
        return Err(ImageError::MalformedRecord(format!(
            "PCX window {axis} range {min}..={max} is inverted"
        )));
    }
    Ok(u32::from(max - min) + 1)
}

fn check_manufacturer(manufacturer: u8) -> ImageResult<()> {
    if manufacturer != PCX_MANUFACTURER {
        return Err(ImageError::UnsupportedFormat(format!(
            "PCX manufacturer byte {manufacturer:#04x}, expected {PCX_MANUFACTURER:#04x}"
        )));
    }
    Ok(())
}

/// Expand run-length encoded scanlines until `total` bytes are produced
pub fn decode_scanlines(cursor: &mut ByteCursor<'_>, total: usize) -> ImageResult<Vec<u8>> {
    // A two byte run yields at most 63 bytes
    let ceiling = cursor.remaining().saturating_mul(usize::from(RUN_MASK));
    if total > ceiling {
        return Err(ImageError::TruncatedData {
            offset: cursor.position(),
            expected: total,
            actual: ceiling,
        });
    }

    let mut out = Vec::with_capacity(total);
    while out.len() < total {
        let control = cursor.read_u8()?;
        let (count, value) = if control & RUN_FLAG == RUN_FLAG {
            (usize::from(control & RUN_MASK), cursor.read_u8()?)
        } else {
            (1, control)
        };

        if out.len() + count > total {
            return Err(ImageError::MalformedRecord(format!(
                "PCX run of {count} at byte {} overflows {total} bytes of scanlines",
                out.len()
            )));
        }
        out.resize(out.len() + count, value);
    }
    Ok(out)
}

/// A decoded PCX file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PcxImage {
    /// Source header
    pub header: PcxHeader,
    /// Pixels as [`PixelFormat::Bgr24`]
    pub image: DecodedImage,
}

impl PcxImage {
    /// Decode a whole PCX file
    pub fn decode(data: &[u8]) -> ImageResult<Self> {
        if let Some(&manufacturer) = data.first() {
            check_manufacturer(manufacturer)?;
        }
        let mut cursor = ByteCursor::new(data);
        let header: PcxHeader = cursor.read_record()?;
        header.check_supported()?;

        let width = header.width()?;
        let height = header.height()?;
        let line_len = usize::from(header.bytes_per_line);
        if (width as usize) > line_len {
            return Err(ImageError::MalformedRecord(format!(
                "PCX width {width} exceeds {line_len} bytes per line"
            )));
        }

        let total = line_len
            .checked_mul(height as usize)
            .ok_or_else(|| ImageError::MalformedRecord("PCX scanline size overflows".to_string()))?;
        let indices = decode_scanlines(&mut cursor, total)?;

        let palette_data = if header.has_vga_palette() {
            let marker = cursor.read_u8()?;
            if marker != PALETTE_MARKER {
                return Err(ImageError::MalformedRecord(format!(
                    "PCX palette marker {marker:#04x}, expected {PALETTE_MARKER:#04x}"
                )));
            }
            cursor.read_bytes(VGA_PALETTE_SIZE)?
        } else {
            &header.colormap[..]
        };
        let palette = Palette::new(palette_data, 3);

        let mut pixels = Vec::with_capacity(width as usize * height as usize * 3);
        for row in indices.chunks_exact(line_len) {
            for &index in &row[..width as usize] {
                let rgb = palette.entry(index).ok_or_else(|| {
                    ImageError::MalformedRecord(format!(
                        "PCX colour index {index} outside a {}-entry palette",
                        palette.len()
                    ))
                })?;
                pixels.extend_from_slice(&[rgb[2], rgb[1], rgb[0]]);
            }
        }

        debug!(
            "Decoded PCX v{} {}x{} ({} palette entries)",
            header.version,
            width,
            height,
            palette.len()
        );

        Ok(Self {
            header,
            image: DecodedImage {
                width,
                height,
                format: PixelFormat::Bgr24,
                pixels,
            },
        })
    }
}
