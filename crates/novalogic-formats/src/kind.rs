//! File-kind detection and preview decoding for archive entries
//!
//! Archives carry no type information beyond the entry name, so the kind is
//! taken from the extension, the same way the game tools pick a viewer.

use crate::image::{ImageError, PcxImage, TgaImage};
use crate::model::{ModelError, ModelFile};
use crate::pff::PffError;
use thiserror::Error;

/// Error from any reader in this crate
#[derive(Debug, Error)]
pub enum FormatError {
    /// Archive error
    #[error(transparent)]
    Archive(#[from] PffError),

    /// Model error
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Image error
    #[error(transparent)]
    Image(#[from] ImageError),
}

/// Kind of an archive entry, by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    /// `.pcx` image
    Pcx,
    /// `.tga` image
    Tga,
    /// `.3di` model
    Model,
    /// `.jpg` or `.jpeg` image
    Jpeg,
    /// `.wav` sound
    Wav,
    /// `.scr` obfuscated script
    Script,
    /// Anything else
    Unknown,
}

impl FileKind {
    /// Classify a file name by its extension, ignoring case
    pub fn from_name(name: &str) -> Self {
        let Some((_, ext)) = name.rsplit_once('.') else {
            return Self::Unknown;
        };
        match ext.to_ascii_lowercase().as_str() {
            "pcx" => Self::Pcx,
            "tga" => Self::Tga,
            "3di" => Self::Model,
            "jpg" | "jpeg" => Self::Jpeg,
            "wav" => Self::Wav,
            "scr" => Self::Script,
            _ => Self::Unknown,
        }
    }

    /// Whether [`Preview::decode`] parses this kind into a structure
    pub fn is_decodable(self) -> bool {
        matches!(self, Self::Pcx | Self::Tga | Self::Model)
    }
}

/// Decoded contents of an archive entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    /// PCX image
    Pcx(PcxImage),
    /// TGA image
    Tga(TgaImage),
    /// 3DI model
    Model(Box<ModelFile>),
    /// Bytes of a kind that is not decoded here
    Raw(FileKind, Vec<u8>),
}

impl Preview {
    /// Decode `data` according to the kind implied by `name`
    pub fn decode(name: &str, data: &[u8]) -> Result<Self, FormatError> {
        let preview = match FileKind::from_name(name) {
            FileKind::Pcx => Self::Pcx(PcxImage::decode(data)?),
            FileKind::Tga => Self::Tga(TgaImage::decode(data)?),
            FileKind::Model => Self::Model(Box::new(ModelFile::parse(data)?)),
            kind => Self::Raw(kind, data.to_vec()),
        };
        Ok(preview)
    }

    /// Kind the preview was decoded as
    pub fn kind(&self) -> FileKind {
        match self {
            Self::Pcx(_) => FileKind::Pcx,
            Self::Tga(_) => FileKind::Tga,
            Self::Model(_) => FileKind::Model,
            Self::Raw(kind, _) => *kind,
        }
    }
}
