//! Flattening a LOD into per-material triangle lists

use crate::model::error::{ModelError, ModelResult};
use crate::model::lod::ModelLod;

/// Triangles sharing one material, three vertices per triangle
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MaterialMesh {
    /// Index into the LOD's material table
    pub material_index: i32,
    /// Vertex positions
    pub positions: Vec<[f32; 3]>,
    /// Vertex normals
    pub normals: Vec<[f32; 3]>,
    /// Texture coordinates
    pub uvs: Vec<[f32; 2]>,
}

impl MaterialMesh {
    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Texture slot of this mesh's material
    pub fn texture_index(&self, lod: &ModelLod) -> Option<u8> {
        let index = usize::try_from(self.material_index).ok()?;
        lod.materials.get(index).map(|m| m.texture_index)
    }
}

impl ModelLod {
    /// Group every sub-object's triangles by material.
    ///
    /// Meshes appear in the order their material is first used. Positions
    /// have the sub-object bone offset removed when the LOD enables it.
    pub fn build_meshes(&self) -> ModelResult<Vec<MaterialMesh>> {
        let mut meshes: Vec<MaterialMesh> = Vec::new();
        let mut first_face = 0;
        let mut first_vertex = 0;
        let mut first_normal = 0;

        for (s, sub) in self.sub_objects.iter().enumerate() {
            let bone = if self.uses_bone_offsets() {
                sub.bone_offset()
            } else {
                [0; 3]
            };
            #[allow(clippy::cast_precision_loss)]
            let bone = bone.map(|v| v as f32);

            for f in 0..sub.face_count() {
                let face = self.faces.get(first_face + f).ok_or_else(|| {
                    ModelError::MalformedRecord(format!(
                        "sub-object {s} face {f} is past the {} faces in the LOD",
                        self.faces.len()
                    ))
                })?;

                let slot = match meshes
                    .iter()
                    .position(|m| m.material_index == face.material_index)
                {
                    Some(slot) => slot,
                    None => {
                        meshes.push(MaterialMesh {
                            material_index: face.material_index,
                            ..MaterialMesh::default()
                        });
                        meshes.len() - 1
                    }
                };
                let mesh = &mut meshes[slot];

                for k in 0..3 {
                    let vertex = offset_index(first_vertex, face.vertices[k])
                        .and_then(|i| self.vertices.get(i))
                        .ok_or_else(|| {
                            ModelError::MalformedRecord(format!(
                                "sub-object {s} face {f} vertex {} out of range",
                                face.vertices[k]
                            ))
                        })?;
                    let normal = offset_index(first_normal, face.normals[k])
                        .and_then(|i| self.normals.get(i))
                        .ok_or_else(|| {
                            ModelError::MalformedRecord(format!(
                                "sub-object {s} face {f} normal {} out of range",
                                face.normals[k]
                            ))
                        })?;

                    let [x, y, z] = vertex.xyz();
                    mesh.positions.push([x - bone[0], y - bone[1], z - bone[2]]);
                    mesh.normals.push(normal.xyz());
                    mesh.uvs.push(face.uv(k));
                }
            }

            first_face += sub.face_count();
            first_vertex += sub.vertex_count();
            first_normal += sub.normal_count();
        }

        Ok(meshes)
    }
}

/// Local record index shifted to the LOD-wide table
fn offset_index(first: usize, local: i16) -> Option<usize> {
    usize::try_from(local).ok().map(|local| first + local)
}
