//! 3DI model reader
//!
//! A 3DI file is a 128-byte header followed by the embedded textures and
//! then one block per level of detail. Everything is read strictly in order;
//! every count is checked against the bytes left in the buffer before any
//! table is allocated, and the first inconsistency aborts the whole parse.
//!
//! Only version 8 files (`3DI\x08`) are understood.
//!
//! # Usage
//!
//! ```rust,no_run
//! use novalogic_formats::model::ModelFile;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let model = ModelFile::open("TANK.3DI")?;
//! for lod in &model.lods {
//!     for mesh in lod.build_meshes()? {
//!         println!("material {}: {} triangles", mesh.material_index, mesh.triangle_count());
//!     }
//! }
//! # Ok(())
//! # }
//! ```

mod error;
pub mod header;
pub mod lod;
pub mod mesh;
pub mod records;
pub mod texture;

pub use error::{ModelError, ModelResult};
pub use header::{LodInfo, MODEL_SIGNATURE, ModelHeader, RenderType};
pub use lod::{LodHeader, ModelLod};
pub use mesh::MaterialMesh;
pub use records::{ModelFace, ModelMaterial, ModelSubObject, Vec4};
pub use texture::{ModelTexture, PALETTE_SIZE, TextureHeader};

use crate::cursor::{ByteCursor, FixedSize};
use binrw::BinRead;
use std::fmt;
use std::path::Path;
use tracing::debug;

/// A parsed 3DI model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelFile {
    /// Model name from the header
    pub name: String,
    /// Level-of-detail table
    pub lod_info: LodInfo,
    /// Embedded textures
    pub textures: Vec<ModelTexture>,
    /// Level-of-detail blocks, highest detail first
    pub lods: Vec<ModelLod>,
}

impl ModelFile {
    /// Parse a whole model file
    pub fn parse(data: &[u8]) -> ModelResult<Self> {
        let mut cursor = ByteCursor::new(data);

        let signature = cursor.read_u32()?;
        if signature != MODEL_SIGNATURE {
            return Err(ModelError::UnsupportedFormat(format!(
                "3DI signature {signature:#010x}, expected {MODEL_SIGNATURE:#010x}"
            )));
        }
        cursor.seek(0)?;
        let header: ModelHeader = cursor.read_record()?;

        let texture_count = table_count(
            &cursor,
            header.texture_count,
            TextureHeader::SIZE + PALETTE_SIZE,
            "texture",
        )?;
        let mut textures = Vec::with_capacity(texture_count);
        for _ in 0..texture_count {
            textures.push(ModelTexture::read(&mut cursor)?);
        }

        let lod_count = table_count(&cursor, header.lod_info.count, LodHeader::SIZE, "LOD")?;
        let mut lods = Vec::with_capacity(lod_count);
        for _ in 0..lod_count {
            lods.push(ModelLod::read(&mut cursor)?);
        }

        let name = header.name();
        debug!(
            "Parsed 3DI model {}: {} textures, {} LODs, {} trailing bytes",
            name,
            textures.len(),
            lods.len(),
            cursor.remaining()
        );

        Ok(Self {
            name,
            lod_info: header.lod_info,
            textures,
            lods,
        })
    }

    /// Read and parse a model file
    pub fn open<P: AsRef<Path>>(path: P) -> ModelResult<Self> {
        let data = std::fs::read(path)?;
        Self::parse(&data)
    }

    /// Texture whose slot matches `index`
    pub fn texture(&self, index: u8) -> Option<&ModelTexture> {
        self.textures.iter().find(|t| t.index == u16::from(index))
    }
}

/// Validate a table count against the bytes left in the buffer
fn table_count<C>(
    cursor: &ByteCursor<'_>,
    count: C,
    record_size: usize,
    what: &str,
) -> ModelResult<usize>
where
    C: TryInto<usize> + Copy + fmt::Display,
{
    let n: usize = count
        .try_into()
        .map_err(|_| ModelError::MalformedRecord(format!("invalid {what} count {count}")))?;
    cursor.checked_len(n, record_size)?;
    Ok(n)
}

/// Read a table of fixed-size records after validating its count
fn read_table<T>(cursor: &mut ByteCursor<'_>, count: i32, what: &str) -> ModelResult<Vec<T>>
where
    T: FixedSize + for<'b> BinRead<Args<'b> = ()>,
{
    let n = table_count(cursor, count, T::SIZE, what)?;
    let mut records = Vec::with_capacity(n);
    for _ in 0..n {
        records.push(cursor.read_record()?);
    }
    Ok(records)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_utils::{LodSpec, ModelBuilder, two_part_lod};
    use pretty_assertions::assert_eq;

    fn palette() -> Vec<u8> {
        vec![0x40; PALETTE_SIZE]
    }

    #[test]
    fn test_parse_complete_model() {
        let data = ModelBuilder::new("TANK")
            .texture("BODY", 2, 2, &[0, 0, 0, 0], &palette())
            .lod(&two_part_lod())
            .lod(&LodSpec::default())
            .build();

        let model = ModelFile::parse(&data).unwrap();
        assert_eq!(model.name, "TANK");
        assert_eq!(model.lod_info.count, 2);
        assert_eq!(model.textures.len(), 1);
        assert_eq!(model.textures[0].pixels, [0x40, 0x40, 0x40, 0xFF].repeat(4));
        assert_eq!(model.lods.len(), 2);
        assert_eq!(model.lods[0].faces.len(), 2);
        assert!(model.lods[1].faces.is_empty());
        assert!(model.texture(0).is_some());
        assert!(model.texture(1).is_none());
    }

    #[test]
    fn test_wrong_signature_rejected_first() {
        let mut data = ModelBuilder::new("X").build();
        data[3] = 0x07;
        assert!(matches!(
            ModelFile::parse(&data),
            Err(ModelError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            ModelFile::parse(b"PFF3"),
            Err(ModelError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_short_input() {
        assert!(matches!(
            ModelFile::parse(b"3D"),
            Err(ModelError::TruncatedData { .. })
        ));
        assert!(matches!(
            ModelFile::parse(b"3DI\x08\0\0\0\0"),
            Err(ModelError::TruncatedData { .. })
        ));
    }

    #[test]
    fn test_negative_texture_count() {
        let data = ModelBuilder::new("X").texture_count(-1).build();
        assert!(matches!(
            ModelFile::parse(&data),
            Err(ModelError::MalformedRecord(_))
        ));
    }

    #[test]
    fn test_oversized_counts() {
        let data = ModelBuilder::new("X").texture_count(i32::MAX).build();
        assert!(matches!(
            ModelFile::parse(&data),
            Err(ModelError::TruncatedData { .. })
        ));

        let data = ModelBuilder::new("X").lod_count(u32::MAX).build();
        assert!(matches!(
            ModelFile::parse(&data),
            Err(ModelError::TruncatedData { .. })
        ));
    }

    #[test]
    fn test_truncated_lod() {
        let mut data = ModelBuilder::new("X").lod(&two_part_lod()).build();
        data.truncate(data.len() - 1);
        assert!(matches!(
            ModelFile::parse(&data),
            Err(ModelError::TruncatedData { .. })
        ));
    }

    #[test]
    fn test_open_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("TANK.3DI");
        std::fs::write(&path, ModelBuilder::new("TANK").lod(&two_part_lod()).build()).unwrap();
        let model = ModelFile::open(&path).unwrap();
        assert_eq!(model.lods.len(), 1);

        assert!(matches!(
            ModelFile::open(dir.path().join("MISSING.3DI")),
            Err(ModelError::Io(_))
        ));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_arbitrary_bytes_never_panic(tail in proptest::collection::vec(any::<u8>(), 0..512)) {
                let mut data = MODEL_SIGNATURE.to_le_bytes().to_vec();
                data.extend_from_slice(&tail);
                let _ = ModelFile::parse(&data);
            }

            #[test]
            fn prop_any_truncation_fails(cut in 0usize..1000) {
                let data = ModelBuilder::new("TANK")
                    .texture("BODY", 2, 2, &[0, 1, 2, 3], &palette())
                    .lod(&two_part_lod())
                    .build();
                let cut = cut % data.len();
                prop_assert!(ModelFile::parse(&data[..cut]).is_err());
            }
        }
    }
}
