//! Builders for synthetic archives, models and images used by unit tests

#![allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]

use crate::image::pcx::{PALETTE_MARKER, PCX_ENCODING_RLE, PCX_MANUFACTURER};
use crate::model::MODEL_SIGNATURE;
use crate::pff::{HEADER_SIZE, NAME_LEN, PFF3_SIGNATURE};

/// One directory record to emit
#[derive(Debug, Clone)]
struct PffSpec {
    name: String,
    data: Vec<u8>,
    deleted: bool,
    offset: Option<u32>,
    size: Option<u32>,
    modified: u32,
}

/// Builds a PFF3 archive: header, entry data, then the directory table
#[derive(Debug, Clone)]
pub struct PffBuilder {
    record_size: u32,
    entries: Vec<PffSpec>,
}

impl Default for PffBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PffBuilder {
    pub fn new() -> Self {
        Self {
            record_size: 32,
            entries: Vec::new(),
        }
    }

    pub fn record_size(mut self, record_size: u32) -> Self {
        self.record_size = record_size;
        self
    }

    pub fn file(mut self, name: &str, data: &[u8]) -> Self {
        self.entries.push(PffSpec {
            name: name.to_string(),
            data: data.to_vec(),
            deleted: false,
            offset: None,
            size: None,
            modified: 1_000_000_000,
        });
        self
    }

    pub fn deleted(mut self, name: &str, data: &[u8]) -> Self {
        self.entries.push(PffSpec {
            name: name.to_string(),
            data: data.to_vec(),
            deleted: true,
            offset: None,
            size: None,
            modified: 0,
        });
        self
    }

    /// Record pointing at an explicit offset and size, with no data of its own
    pub fn raw(mut self, name: &str, offset: u32, size: u32) -> Self {
        self.entries.push(PffSpec {
            name: name.to_string(),
            data: Vec::new(),
            deleted: false,
            offset: Some(offset),
            size: Some(size),
            modified: 0,
        });
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut body = Vec::new();
        let mut records = Vec::new();
        for spec in &self.entries {
            let offset = HEADER_SIZE + body.len() as u32;
            body.extend_from_slice(&spec.data);

            let mut record = Vec::with_capacity(self.record_size as usize);
            record.extend_from_slice(&u32::from(spec.deleted).to_le_bytes());
            record.extend_from_slice(&spec.offset.unwrap_or(offset).to_le_bytes());
            record.extend_from_slice(&spec.size.unwrap_or(spec.data.len() as u32).to_le_bytes());
            record.extend_from_slice(&spec.modified.to_le_bytes());
            let mut name = [0u8; NAME_LEN];
            let bytes = spec.name.as_bytes();
            let len = bytes.len().min(NAME_LEN);
            name[..len].copy_from_slice(&bytes[..len]);
            record.extend_from_slice(&name);
            record.push(0);
            // Checksum slot and any unknown trailer
            record.resize(self.record_size as usize, 0xAB);
            records.push(record);
        }

        let table_offset = HEADER_SIZE + body.len() as u32;
        let mut data = Vec::new();
        data.extend_from_slice(&HEADER_SIZE.to_le_bytes());
        data.extend_from_slice(&PFF3_SIGNATURE.to_le_bytes());
        data.extend_from_slice(&(self.entries.len() as u32).to_le_bytes());
        data.extend_from_slice(&self.record_size.to_le_bytes());
        data.extend_from_slice(&table_offset.to_le_bytes());
        data.extend_from_slice(&body);
        for record in records {
            data.extend_from_slice(&record);
        }
        data
    }
}

/// Builds a PCX file; defaults to version 5, 8 bits, one plane, RLE
#[derive(Debug, Clone)]
pub struct PcxBuilder {
    width: u16,
    height: u16,
    version: u8,
    planes: u8,
    bytes_per_line: u16,
    colormap: [u8; 48],
    scanlines: Vec<u8>,
    palette: Option<Vec<u8>>,
}

impl PcxBuilder {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            version: 5,
            planes: 1,
            bytes_per_line: width + (width & 1),
            colormap: [0; 48],
            scanlines: Vec::new(),
            palette: None,
        }
    }

    pub fn version(mut self, version: u8) -> Self {
        self.version = version;
        self
    }

    pub fn planes(mut self, planes: u8) -> Self {
        self.planes = planes;
        self
    }

    pub fn bytes_per_line(mut self, bytes_per_line: u16) -> Self {
        self.bytes_per_line = bytes_per_line;
        self
    }

    pub fn colormap(mut self, colormap: [u8; 48]) -> Self {
        self.colormap = colormap;
        self
    }

    /// Already RLE-encoded scanline bytes
    pub fn scanlines(mut self, scanlines: &[u8]) -> Self {
        self.scanlines = scanlines.to_vec();
        self
    }

    /// 768-byte palette appended after the marker
    pub fn vga_palette(mut self, palette: &[u8]) -> Self {
        self.palette = Some(palette.to_vec());
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut data = vec![PCX_MANUFACTURER, self.version, PCX_ENCODING_RLE, 8];
        for value in [0, 0, self.width.saturating_sub(1), self.height.saturating_sub(1)] {
            data.extend_from_slice(&value.to_le_bytes());
        }
        data.extend_from_slice(&72u16.to_le_bytes());
        data.extend_from_slice(&72u16.to_le_bytes());
        data.extend_from_slice(&self.colormap);
        data.push(0);
        data.push(self.planes);
        data.extend_from_slice(&self.bytes_per_line.to_le_bytes());
        data.extend_from_slice(&1u16.to_le_bytes());
        data.extend_from_slice(&[0; 4]);
        data.extend_from_slice(&[0; 54]);
        data.extend_from_slice(&self.scanlines);
        if let Some(palette) = &self.palette {
            data.push(PALETTE_MARKER);
            data.extend_from_slice(palette);
        }
        data
    }
}

/// TGA file with no ID field or colour map
pub fn tga_bytes(image_type: u8, width: u16, height: u16, depth: u8, body: &[u8]) -> Vec<u8> {
    let mut data = vec![0, 0, image_type, 0, 0, 0, 0, 0];
    data.extend_from_slice(&0u16.to_le_bytes());
    data.extend_from_slice(&0u16.to_le_bytes());
    data.extend_from_slice(&width.to_le_bytes());
    data.extend_from_slice(&height.to_le_bytes());
    data.push(depth);
    data.push(0);
    data.extend_from_slice(body);
    data
}

/// Texture header, scanlines and palette
pub fn texture_bytes(name: &str, width: u16, height: u16, scanlines: &[u8], palette: &[u8]) -> Vec<u8> {
    let mut data = fixed_name::<28>(name).to_vec();
    data.extend_from_slice(&(scanlines.len() as i32).to_le_bytes());
    data.extend_from_slice(&0u16.to_le_bytes());
    data.extend_from_slice(&0u16.to_le_bytes());
    data.extend_from_slice(&width.to_le_bytes());
    data.extend_from_slice(&height.to_le_bytes());
    data.extend_from_slice(&[0; 12]);
    data.extend_from_slice(scanlines);
    data.extend_from_slice(palette);
    data
}

#[derive(Debug, Clone, Default)]
pub struct FaceSpec {
    pub vertices: [i16; 3],
    pub normals: [i16; 3],
    pub tu: [i32; 3],
    pub tv: [i32; 3],
    pub material_index: i32,
}

pub fn face_bytes(face: &FaceSpec) -> Vec<u8> {
    let mut data = Vec::with_capacity(72);
    data.extend_from_slice(&0i16.to_le_bytes());
    data.extend_from_slice(&1i16.to_le_bytes());
    for v in face.tu.iter().chain(&face.tv) {
        data.extend_from_slice(&v.to_le_bytes());
    }
    for v in face.vertices.iter().chain(&face.normals) {
        data.extend_from_slice(&v.to_le_bytes());
    }
    data.extend_from_slice(&0i32.to_le_bytes());
    data.extend_from_slice(&[0; 24]);
    data.extend_from_slice(&face.material_index.to_le_bytes());
    data
}

#[derive(Debug, Clone, Default)]
pub struct SubObjectSpec {
    pub n_verts: i32,
    pub n_faces: i32,
    pub n_normals: i32,
    pub diff_offset_raw: [i32; 3],
    pub bone_offset_raw: [i32; 3],
}

pub fn sub_object_bytes(sub: &SubObjectSpec) -> Vec<u8> {
    let mut data = Vec::with_capacity(112);
    let fields = [0, sub.n_verts, 0, sub.n_faces, 0, sub.n_normals, 0, 0, 0, -1];
    for v in fields
        .iter()
        .chain(&sub.diff_offset_raw)
        .chain(&sub.bone_offset_raw)
    {
        data.extend_from_slice(&v.to_le_bytes());
    }
    data.extend_from_slice(&[0; 48]);
    data
}

pub fn material_bytes(name: &str, texture_index: u8) -> Vec<u8> {
    let mut data = fixed_name::<16>(name).to_vec();
    data.push(0);
    data.extend_from_slice(&[0; 3]);
    data.extend_from_slice(&[0; 4]);
    data.extend_from_slice(&[0; 28]);
    data.extend_from_slice(&[texture_index, 0, 0, 0]);
    data.extend_from_slice(&[0; 64]);
    data
}

#[derive(Debug, Clone, Default)]
pub struct LodSpec {
    pub flags: i32,
    pub vertices: Vec<[i16; 4]>,
    pub normals: Vec<[i16; 4]>,
    pub faces: Vec<FaceSpec>,
    pub sub_objects: Vec<SubObjectSpec>,
    pub part_anims: usize,
    pub col_planes: usize,
    pub col_volumes: usize,
    pub materials: Vec<(String, u8)>,
}

/// LOD with two sub-objects of one triangle each, using materials 0 and 1
pub fn two_part_lod() -> LodSpec {
    let face = |material_index| FaceSpec {
        vertices: [0, 1, 2],
        normals: [0, 1, 2],
        tu: [0, 0x8000, 0x1_0000],
        tv: [0; 3],
        material_index,
    };
    let sub = SubObjectSpec {
        n_verts: 3,
        n_faces: 1,
        n_normals: 3,
        diff_offset_raw: [1, 2, 3],
        bone_offset_raw: [0x40, 0x80, 0xFF],
    };
    LodSpec {
        flags: 1,
        vertices: (0..6).map(|i| [i * 10, 0, 0, 0]).collect(),
        normals: (0..6).map(|i| [0, 0, i, 0]).collect(),
        faces: vec![face(0), face(1)],
        sub_objects: vec![sub.clone(), sub],
        part_anims: 0,
        col_planes: 0,
        col_volumes: 0,
        materials: vec![("BODY".to_string(), 0), ("TURRET".to_string(), 1)],
    }
}

pub fn lod_bytes(lod: &LodSpec) -> Vec<u8> {
    let mut data = Vec::new();
    data.extend_from_slice(&[0; 16]);
    data.extend_from_slice(&lod.flags.to_le_bytes());
    data.extend_from_slice(&[0; 4 * 11]);
    data.extend_from_slice(&[0; 64]);
    let counts = [
        lod.vertices.len(),
        lod.normals.len(),
        lod.faces.len(),
        lod.sub_objects.len(),
        lod.part_anims,
        lod.materials.len(),
        lod.col_planes,
        lod.col_volumes,
    ];
    for count in counts {
        data.extend_from_slice(&(count as i32).to_le_bytes());
        data.extend_from_slice(&0u32.to_le_bytes());
    }

    for v in lod.vertices.iter().chain(&lod.normals) {
        for c in v {
            data.extend_from_slice(&c.to_le_bytes());
        }
    }
    for face in &lod.faces {
        data.extend_from_slice(&face_bytes(face));
    }
    for sub in &lod.sub_objects {
        data.extend_from_slice(&sub_object_bytes(sub));
    }
    data.resize(
        data.len() + lod.part_anims * 0x0C + lod.col_planes * 0x08 + lod.col_volumes * 0x50,
        0xEE,
    );
    for (name, texture_index) in &lod.materials {
        data.extend_from_slice(&material_bytes(name, *texture_index));
    }
    data
}

/// Builds a version 8 3DI file
#[derive(Debug, Clone)]
pub struct ModelBuilder {
    name: String,
    textures: Vec<Vec<u8>>,
    lods: Vec<Vec<u8>>,
    texture_count: Option<i32>,
    lod_count: Option<u32>,
}

impl ModelBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            textures: Vec::new(),
            lods: Vec::new(),
            texture_count: None,
            lod_count: None,
        }
    }

    pub fn texture(mut self, name: &str, width: u16, height: u16, scanlines: &[u8], palette: &[u8]) -> Self {
        self.textures
            .push(texture_bytes(name, width, height, scanlines, palette));
        self
    }

    pub fn lod(mut self, lod: &LodSpec) -> Self {
        self.lods.push(lod_bytes(lod));
        self
    }

    /// Override the header's texture count
    pub fn texture_count(mut self, count: i32) -> Self {
        self.texture_count = Some(count);
        self
    }

    /// Override the header's LOD count
    pub fn lod_count(mut self, count: u32) -> Self {
        self.lod_count = Some(count);
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut data = MODEL_SIGNATURE.to_le_bytes().to_vec();
        data.extend_from_slice(&fixed_name::<12>(&self.name));
        data.extend_from_slice(&0u32.to_le_bytes());
        let lod_count = self.lod_count.unwrap_or(self.lods.len() as u32);
        data.extend_from_slice(&lod_count.to_le_bytes());
        for distance in [100u32, 200, 400, 800] {
            data.extend_from_slice(&distance.to_le_bytes());
        }
        data.extend_from_slice(&[0; 16]);
        data.extend_from_slice(&[0; 68]);
        let texture_count = self.texture_count.unwrap_or(self.textures.len() as i32);
        data.extend_from_slice(&texture_count.to_le_bytes());
        for texture in &self.textures {
            data.extend_from_slice(texture);
        }
        for lod in &self.lods {
            data.extend_from_slice(lod);
        }
        data
    }
}

fn fixed_name<const N: usize>(name: &str) -> [u8; N] {
    let mut out = [0u8; N];
    let bytes = name.as_bytes();
    let len = bytes.len().min(N);
    out[..len].copy_from_slice(&bytes[..len]);
    out
}
