//! Image decoders for PCX and TGA files
//!
//! Both decoders produce a [`DecodedImage`]: a tightly packed, top-to-bottom
//! pixel buffer in the channel order the legacy tools handed to their
//! bitmaps (blue first). Writing images is out of scope.
//!
//! # Usage
//!
//! ```rust,no_run
//! use novalogic_formats::image::{PcxImage, PixelFormat, TgaImage};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let pcx = PcxImage::decode(&std::fs::read("MENU.PCX")?)?;
//! assert_eq!(pcx.image.format, PixelFormat::Bgr24);
//!
//! let tga = TgaImage::decode(&std::fs::read("SKY.TGA")?)?;
//! println!("{}x{}", tga.image.width, tga.image.height);
//! # Ok(())
//! # }
//! ```

mod error;
pub mod palette;
pub mod pcx;
pub mod tga;

pub use error::{ImageError, ImageResult};
pub use palette::Palette;
pub use pcx::{PcxHeader, PcxImage};
pub use tga::{TgaFooter, TgaHeader, TgaImage, TgaVariant};

/// Pixel layout of a decoded buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// 3 bytes per pixel, blue, green, red
    Bgr24,
    /// 4 bytes per pixel, blue, green, red, alpha
    Bgra32,
}

impl PixelFormat {
    /// Bytes per pixel
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Bgr24 => 3,
            Self::Bgra32 => 4,
        }
    }
}

/// A decoded image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Channel layout of `pixels`
    pub format: PixelFormat,
    /// Packed rows, top row first, no padding
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    /// Bytes per row
    pub fn row_len(&self) -> usize {
        self.width as usize * self.format.bytes_per_pixel()
    }

    /// One row of pixels
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        let len = self.row_len();
        let start = (y as usize).checked_mul(len)?;
        self.pixels.get(start..start + len)
    }

    /// Channels of one pixel
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.width {
            return None;
        }
        let bpp = self.format.bytes_per_pixel();
        let start = x as usize * bpp;
        self.row(y).map(|row| &row[start..start + bpp])
    }

    /// Reverse the row order in place
    pub fn flip_vertical(&mut self) {
        let len = self.row_len();
        if len == 0 {
            return;
        }
        let rows = self.pixels.len() / len;
        for top in 0..rows / 2 {
            let bottom = rows - 1 - top;
            let (head, tail) = self.pixels.split_at_mut(bottom * len);
            head[top * len..(top + 1) * len].swap_with_slice(&mut tail[..len]);
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn image(width: u32, height: u32, pixels: Vec<u8>) -> DecodedImage {
        DecodedImage {
            width,
            height,
            format: PixelFormat::Bgr24,
            pixels,
        }
    }

    #[test]
    fn test_pixel_access() {
        let img = image(2, 1, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(img.row_len(), 6);
        assert_eq!(img.pixel(1, 0).unwrap(), &[4, 5, 6]);
        assert!(img.pixel(2, 0).is_none());
        assert!(img.pixel(0, 1).is_none());
    }

    #[test]
    fn test_flip_vertical_odd_rows() {
        let mut img = image(1, 3, vec![1, 1, 1, 2, 2, 2, 3, 3, 3]);
        img.flip_vertical();
        assert_eq!(img.pixels, vec![3, 3, 3, 2, 2, 2, 1, 1, 1]);
    }

    #[test]
    fn test_flip_vertical_keeps_row_contents() {
        let mut img = image(2, 2, vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]);
        img.flip_vertical();
        assert_eq!(img.pixels, vec![7, 8, 9, 10, 11, 12, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_flip_empty() {
        let mut img = image(0, 0, Vec::new());
        img.flip_vertical();
        assert!(img.pixels.is_empty());
    }
}
