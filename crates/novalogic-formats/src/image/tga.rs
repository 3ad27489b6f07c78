//! Truevision TGA decoder
//!
//! Supports uncompressed true-colour images (type 2, 24 or 32 bits) and
//! run-length encoded true-colour images (type 10, 24 bits). Images are
//! stored bottom row first; the decoder returns them top row first.
//!
//! Raw packets in RLE data have their red and blue channels swapped relative
//! to run packets. Game assets were authored against that behaviour, so it is
//! kept.

use crate::cursor::{ByteCursor, FixedSize};
use crate::image::error::{ImageError, ImageResult};
use crate::image::{DecodedImage, PixelFormat};
use binrw::BinRead;
use std::io::Cursor;
use tracing::debug;

/// Signature found in the footer of version 2 files
pub const TGA_SIGNATURE: &[u8; 16] = b"TRUEVISION-XFILE";

const RLE_PACKET_FLAG: u8 = 0x80;
const RLE_COUNT_MASK: u8 = 0x7F;

/// TGA image type codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TgaImageType {
    /// No image data
    NoImage,
    /// Uncompressed colour-mapped
    ColorMapped,
    /// Uncompressed true colour
    TrueColor,
    /// Uncompressed greyscale
    Grayscale,
    /// Run-length encoded colour-mapped
    RleColorMapped,
    /// Run-length encoded true colour
    RleTrueColor,
    /// Run-length encoded greyscale
    RleGrayscale,
}

impl TgaImageType {
    /// Map a header type code
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::NoImage),
            1 => Some(Self::ColorMapped),
            2 => Some(Self::TrueColor),
            3 => Some(Self::Grayscale),
            9 => Some(Self::RleColorMapped),
            10 => Some(Self::RleTrueColor),
            11 => Some(Self::RleGrayscale),
            _ => None,
        }
    }
}

/// 18-byte TGA header
#[derive(BinRead, Debug, Clone, PartialEq, Eq)]
#[br(little)]
pub struct TgaHeader {
    /// Length of the image ID field after the header
    pub id_length: u8,
    /// 1 when a colour map is present
    pub color_map_type: u8,
    /// Image type code
    pub image_type: u8,
    /// First colour map index
    pub color_map_first: u16,
    /// Colour map entries
    pub color_map_length: u16,
    /// Bits per colour map entry
    pub color_map_entry_size: u8,
    /// Horizontal origin
    pub x_origin: u16,
    /// Vertical origin
    pub y_origin: u16,
    /// Width in pixels
    pub width: u16,
    /// Height in pixels
    pub height: u16,
    /// Bits per pixel
    pub pixel_depth: u8,
    /// Alpha depth and origin bits
    pub descriptor: u8,
}

impl FixedSize for TgaHeader {
    const SIZE: usize = 18;
}

/// 26-byte footer of version 2 files
#[derive(BinRead, Debug, Clone, PartialEq, Eq)]
#[br(little)]
pub struct TgaFooter {
    /// Offset of the extension area
    pub extension_offset: u32,
    /// Offset of the developer directory
    pub developer_offset: u32,
    /// `TRUEVISION-XFILE` in version 2 files
    pub signature: [u8; 16],
    /// `.`
    pub period: u8,
    /// NUL
    pub terminator: u8,
}

impl FixedSize for TgaFooter {
    const SIZE: usize = 26;
}

impl TgaFooter {
    /// Signature, period and terminator all match a version 2 footer
    pub fn is_new_style(&self) -> bool {
        &self.signature == TGA_SIGNATURE && self.period == b'.' && self.terminator == 0
    }
}

/// Original or new-style TGA file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TgaVariant {
    /// No footer signature
    Original,
    /// Footer with the `TRUEVISION-XFILE` signature
    New,
}

impl TgaVariant {
    /// Classify a whole file by its footer
    pub fn detect(data: &[u8]) -> Self {
        let Some(start) = data.len().checked_sub(TgaFooter::SIZE) else {
            return Self::Original;
        };
        match TgaFooter::read(&mut Cursor::new(&data[start..])) {
            Ok(footer) if footer.is_new_style() => Self::New,
            _ => Self::Original,
        }
    }
}

/// A decoded TGA file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TgaImage {
    /// Source header
    pub header: TgaHeader,
    /// File variant, informational only
    pub variant: TgaVariant,
    /// Pixels, top row first
    pub image: DecodedImage,
}

impl TgaImage {
    /// Decode a whole TGA file
    pub fn decode(data: &[u8]) -> ImageResult<Self> {
        let variant = TgaVariant::detect(data);
        let mut cursor = ByteCursor::new(data);
        let header: TgaHeader = cursor.read_record()?;

        let image_type = TgaImageType::from_code(header.image_type).ok_or_else(|| {
            ImageError::UnsupportedFormat(format!("TGA image type {}", header.image_type))
        })?;
        if header.id_length != 0 {
            return Err(ImageError::Unsupported(format!(
                "TGA with a {} byte image ID field",
                header.id_length
            )));
        }
        if header.color_map_type != 0 {
            return Err(ImageError::Unsupported("colour-mapped TGA".to_string()));
        }

        let width = u32::from(header.width);
        let height = u32::from(header.height);
        let pixel_count = width as usize * height as usize;

        let (format, pixels) = match (image_type, header.pixel_depth) {
            (TgaImageType::TrueColor, depth @ (24 | 32)) => {
                let format = if depth == 24 {
                    PixelFormat::Bgr24
                } else {
                    PixelFormat::Bgra32
                };
                let len = cursor.checked_len(pixel_count, format.bytes_per_pixel())?;
                (format, cursor.read_bytes(len)?.to_vec())
            }
            (TgaImageType::RleTrueColor, 24) => {
                (PixelFormat::Bgr24, decode_rle24(&mut cursor, pixel_count)?)
            }
            (image_type, depth) => {
                return Err(ImageError::Unsupported(format!(
                    "TGA {image_type:?} at {depth} bits per pixel"
                )));
            }
        };

        let mut image = DecodedImage {
            width,
            height,
            format,
            pixels,
        };
        image.flip_vertical();

        debug!(
            "Decoded {:?} TGA {:?} {}x{}",
            variant, image_type, width, height
        );

        Ok(Self {
            header,
            variant,
            image,
        })
    }
}

/// Expand 24-bit RLE packets into `pixel_count` pixels
fn decode_rle24(cursor: &mut ByteCursor<'_>, pixel_count: usize) -> ImageResult<Vec<u8>> {
    // A four byte run packet yields at most 128 pixels
    let ceiling = cursor.remaining().saturating_mul(32);
    if pixel_count > ceiling {
        return Err(ImageError::TruncatedData {
            offset: cursor.position(),
            expected: pixel_count,
            actual: ceiling,
        });
    }

    // Packets run across row boundaries as one stream; a packet that ends
    // in the next row is kept whole rather than cut at the row end.
    let mut out = Vec::with_capacity(pixel_count * 3);
    let mut decoded = 0;
    while decoded < pixel_count {
        let packet = cursor.read_u8()?;
        let count = usize::from(packet & RLE_COUNT_MASK) + 1;
        if decoded + count > pixel_count {
            return Err(ImageError::MalformedRecord(format!(
                "TGA packet of {count} pixels at pixel {decoded} overflows {pixel_count} pixels"
            )));
        }

        if packet & RLE_PACKET_FLAG != 0 {
            let pixel = cursor.read_array::<3>()?;
            for _ in 0..count {
                out.extend_from_slice(&pixel);
            }
        } else {
            for _ in 0..count {
                let [b, g, r] = cursor.read_array::<3>()?;
                out.extend_from_slice(&[r, g, b]);
            }
        }
        decoded += count;
    }
    Ok(out)
}
