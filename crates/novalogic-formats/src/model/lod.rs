//! Level-of-detail blocks
//!
//! A LOD stores every sub-object's vertices, normals and faces in single
//! shared tables. Each sub-object owns a contiguous run of each table, in
//! sub-object order, and face indices are relative to the start of the
//! owning sub-object's run.

use crate::cursor::{ByteCursor, FixedSize};
use crate::model::error::{ModelError, ModelResult};
use crate::model::records::{
    COL_PLANE_SIZE, COL_VOLUME_SIZE, ModelFace, ModelMaterial, ModelSubObject, PART_ANIM_SIZE,
    Vec4,
};
use crate::model::{read_table, table_count};
use binrw::BinRead;
use tracing::trace;

/// LOD flag: vertices are offset by their sub-object's bone offset
pub const LOD_FLAG_BONE_OFFSETS: i32 = 1;

/// 192-byte LOD header
#[derive(BinRead, Debug, Clone, PartialEq, Eq)]
#[br(little)]
pub struct LodHeader {
    /// Unused
    pub reserved0: [i32; 4],
    /// LOD flags
    pub flags: i32,
    /// Block length
    pub length: i32,
    /// In-memory pointer
    pub ptr_model_info: u32,
    /// Bounding sphere radius
    pub sphere_radius: i32,
    /// Bounding circle radius
    pub circle_radius: i32,
    /// Depth extent
    pub z_total: i32,
    /// x min, x max, y min, y max, z min, z max
    pub bounds: [i32; 6],
    /// Unused
    pub reserved1: [i32; 16],
    /// Vertex count
    pub n_vertices: i32,
    /// In-memory pointer
    pub ptr_vertices: u32,
    /// Normal count
    pub n_normals: i32,
    /// In-memory pointer
    pub ptr_normals: u32,
    /// Face count
    pub n_faces: i32,
    /// In-memory pointer
    pub ptr_faces: u32,
    /// Sub-object count
    pub n_sub_objects: i32,
    /// In-memory pointer
    pub ptr_sub_objects: u32,
    /// Part-animation count
    pub n_part_anims: i32,
    /// In-memory pointer
    pub ptr_part_anims: u32,
    /// Material count
    pub n_materials: i32,
    /// In-memory pointer
    pub ptr_materials: u32,
    /// Collision-plane count
    pub n_col_planes: i32,
    /// In-memory pointer
    pub ptr_col_planes: u32,
    /// Collision-volume count
    pub n_col_volumes: i32,
    /// In-memory pointer
    pub ptr_col_volumes: u32,
}

impl FixedSize for LodHeader {
    const SIZE: usize = 192;
}

/// One level of detail
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelLod {
    /// Raw header
    pub header: LodHeader,
    /// Vertex positions
    pub vertices: Vec<Vec4>,
    /// Vertex normals
    pub normals: Vec<Vec4>,
    /// Triangles
    pub faces: Vec<ModelFace>,
    /// Sub-objects partitioning the vertex, normal and face tables
    pub sub_objects: Vec<ModelSubObject>,
    /// Material table
    pub materials: Vec<ModelMaterial>,
}

impl ModelLod {
    /// Read one LOD block
    pub fn read(cursor: &mut ByteCursor<'_>) -> ModelResult<Self> {
        let header: LodHeader = cursor.read_record()?;

        let vertices = read_table(cursor, header.n_vertices, "vertex")?;
        let normals = read_table(cursor, header.n_normals, "normal")?;
        let faces = read_table(cursor, header.n_faces, "face")?;
        let sub_objects: Vec<ModelSubObject> =
            read_table(cursor, header.n_sub_objects, "sub-object")?;

        for (skip, size, what) in [
            (header.n_part_anims, PART_ANIM_SIZE, "part animation"),
            (header.n_col_planes, COL_PLANE_SIZE, "collision plane"),
            (header.n_col_volumes, COL_VOLUME_SIZE, "collision volume"),
        ] {
            let count = table_count(cursor, skip, size, what)?;
            cursor.skip(count * size)?;
        }

        let materials = read_table(cursor, header.n_materials, "material")?;

        for (index, sub) in sub_objects.iter().enumerate() {
            if sub.n_verts < 0 || sub.n_faces < 0 || sub.n_normals < 0 {
                return Err(ModelError::MalformedRecord(format!(
                    "sub-object {index} has negative counts ({} vertices, {} faces, {} normals)",
                    sub.n_verts, sub.n_faces, sub.n_normals
                )));
            }
        }

        trace!(
            "LOD: {} vertices, {} faces, {} sub-objects, {} materials",
            vertices.len(),
            faces.len(),
            sub_objects.len(),
            materials.len()
        );

        Ok(Self {
            header,
            vertices,
            normals,
            faces,
            sub_objects,
            materials,
        })
    }

    /// LOD flags
    pub fn flags(&self) -> i32 {
        self.header.flags
    }

    /// Whether vertices are shifted by their sub-object's bone offset
    pub fn uses_bone_offsets(&self) -> bool {
        self.header.flags & LOD_FLAG_BONE_OFFSETS != 0
    }

    /// Index of sub-object `n`'s first face
    pub fn face_offset(&self, n: usize) -> usize {
        self.sub_objects
            .iter()
            .take(n)
            .map(ModelSubObject::face_count)
            .sum()
    }

    /// Index of sub-object `n`'s first vertex
    pub fn vec_offset(&self, n: usize) -> usize {
        self.sub_objects
            .iter()
            .take(n)
            .map(ModelSubObject::vertex_count)
            .sum()
    }

    /// Index of sub-object `n`'s first normal
    pub fn normal_offset(&self, n: usize) -> usize {
        self.sub_objects
            .iter()
            .take(n)
            .map(ModelSubObject::normal_count)
            .sum()
    }

    /// Resolve a face's local vertex index to an index into [`Self::vertices`]
    pub fn global_vertex_index(&self, sub_object: usize, local: i16) -> Option<usize> {
        usize::try_from(local)
            .ok()
            .map(|local| self.vec_offset(sub_object) + local)
    }

    /// Resolve a face's local normal index to an index into [`Self::normals`]
    pub fn global_normal_index(&self, sub_object: usize, local: i16) -> Option<usize> {
        usize::try_from(local)
            .ok()
            .map(|local| self.normal_offset(sub_object) + local)
    }

    /// Faces owned by sub-object `n`
    pub fn sub_object_faces(&self, n: usize) -> &[ModelFace] {
        let Some(sub) = self.sub_objects.get(n) else {
            return &[];
        };
        let start = self.face_offset(n).min(self.faces.len());
        let end = (start + sub.face_count()).min(self.faces.len());
        &self.faces[start..end]
    }
}
