//! `.ZMS` mesh decoding and encoding
//!
//! A mesh file declares its per-vertex layout once, in a file-level
//! attribute bitmask; every vertex then carries exactly the enabled fields.
//! On the wire the fields are attribute-major: all positions, then all
//! normals, and so on in declared order. Encoding mirrors decoding exactly,
//! so a decode/encode pass over a valid file is byte-identical.

use std::path::Path;

use bitflags::bitflags;
use glam::{Vec2, Vec3};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::io::{BinaryCursor, BinaryWriter};

bitflags! {
    /// File-level vertex attribute mask.
    ///
    /// Field presence is uniform across the whole mesh and determined
    /// solely by this value; there is no per-vertex variation.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
    pub struct VertexFormat: i32 {
        const POSITION = 1 << 1;
        const NORMAL = 1 << 2;
        const COLOR = 1 << 3;
        const BONE_WEIGHT = 1 << 4;
        const BONE_INDEX = 1 << 5;
        const TANGENT = 1 << 6;
        const UV1 = 1 << 7;
        const UV2 = 1 << 8;
        const UV3 = 1 << 9;
        const UV4 = 1 << 10;
    }
}

impl VertexFormat {
    /// Skinning needs both weights and indices; files with only one of the
    /// two flags set carry neither block.
    pub fn bones_enabled(self) -> bool {
        self.contains(Self::BONE_WEIGHT | Self::BONE_INDEX)
    }
}

/// One decoded vertex. Fields not enabled by the file mask keep their
/// default values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MeshVertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub color: [f32; 4],
    pub bone_weights: [f32; 4],
    pub bone_indices: [i16; 4],
    pub tangent: Vec3,
    pub uv1: Vec2,
    pub uv2: Vec2,
    pub uv3: Vec2,
    pub uv4: Vec2,
}

/// A decoded mesh file.
#[derive(Debug, Clone, Serialize)]
pub struct MeshFile {
    pub identifier: String,
    pub version: u32,
    pub format: VertexFormat,
    pub bounding_min: Vec3,
    pub bounding_max: Vec3,
    /// Skeleton bone indices referenced by this mesh's bone-index channel.
    pub bones: Vec<i16>,
    #[serde(skip)]
    pub vertices: Vec<MeshVertex>,
    /// Triangle index triples in storage order. The mesh builder re-emits
    /// them reversed to flip the winding.
    #[serde(skip)]
    pub indices: Vec<[i16; 3]>,
    pub materials: Vec<i16>,
    pub strips: Vec<i16>,
    /// Vertex buffer pool hint (static/dynamic/system); `ZMS0008` only.
    pub pool: i16,
    /// Non-fatal decode notes, e.g. best-effort version fallback.
    pub warnings: Vec<String>,
}

impl MeshFile {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = super::read_file(path)?;
        Self::from_bytes(&data)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut cursor = BinaryCursor::new(data);
        Self::read(&mut cursor)
    }

    pub fn read(cursor: &mut BinaryCursor<'_>) -> Result<Self> {
        let identifier = cursor.read_cstring()?;
        let mut warnings = Vec::new();
        let version = match identifier.as_str() {
            "ZMS0007" => 7,
            "ZMS0008" => 8,
            other if other.starts_with("ZMS") => {
                let parsed = other[3..].parse::<u32>().unwrap_or(8);
                let nearest = if parsed <= 7 { 7 } else { 8 };
                tracing::warn!(identifier = other, nearest, "unsupported mesh version");
                warnings.push(format!(
                    "unsupported mesh version {other}, decoding as ZMS000{nearest}"
                ));
                nearest
            }
            other => {
                return Err(Error::InvalidMagic {
                    expected: "ZMS0007/ZMS0008",
                    found: other.to_string(),
                });
            }
        };

        let format = VertexFormat::from_bits_retain(cursor.read_i32()?);
        let bounding_min = cursor.read_vec3()?;
        let bounding_max = cursor.read_vec3()?;

        let bone_count = cursor.read_i16()?;
        let mut bones = Vec::with_capacity(bone_count.max(0) as usize);
        for _ in 0..bone_count {
            bones.push(cursor.read_i16()?);
        }

        let vertex_count = cursor.read_i16()?.max(0) as usize;
        let mut vertices = vec![MeshVertex::default(); vertex_count];

        if format.contains(VertexFormat::POSITION) {
            for vertex in &mut vertices {
                vertex.position = cursor.read_vec3()?;
            }
        }
        if format.contains(VertexFormat::NORMAL) {
            for vertex in &mut vertices {
                vertex.normal = cursor.read_vec3()?;
            }
        }
        if format.contains(VertexFormat::COLOR) {
            for vertex in &mut vertices {
                for channel in &mut vertex.color {
                    *channel = cursor.read_f32()?;
                }
            }
        }
        if format.bones_enabled() {
            for vertex in &mut vertices {
                for weight in &mut vertex.bone_weights {
                    *weight = cursor.read_f32()?;
                }
                for index in &mut vertex.bone_indices {
                    *index = cursor.read_i16()?;
                }
            }
        }
        if format.contains(VertexFormat::TANGENT) {
            for vertex in &mut vertices {
                vertex.tangent = cursor.read_vec3()?;
            }
        }
        if format.contains(VertexFormat::UV1) {
            for vertex in &mut vertices {
                vertex.uv1 = cursor.read_vec2()?;
            }
        }
        if format.contains(VertexFormat::UV2) {
            for vertex in &mut vertices {
                vertex.uv2 = cursor.read_vec2()?;
            }
        }
        if format.contains(VertexFormat::UV3) {
            for vertex in &mut vertices {
                vertex.uv3 = cursor.read_vec2()?;
            }
        }
        if format.contains(VertexFormat::UV4) {
            for vertex in &mut vertices {
                vertex.uv4 = cursor.read_vec2()?;
            }
        }

        let index_count = cursor.read_i16()?.max(0) as usize;
        let mut indices = Vec::with_capacity(index_count);
        for _ in 0..index_count {
            let x = cursor.read_i16()?;
            let y = cursor.read_i16()?;
            let z = cursor.read_i16()?;
            indices.push([x, y, z]);
        }

        let material_count = cursor.read_i16()?.max(0) as usize;
        let mut materials = Vec::with_capacity(material_count);
        for _ in 0..material_count {
            materials.push(cursor.read_i16()?);
        }

        let strip_count = cursor.read_i16()?.max(0) as usize;
        let mut strips = Vec::with_capacity(strip_count);
        for _ in 0..strip_count {
            strips.push(cursor.read_i16()?);
        }

        let pool = if version >= 8 { cursor.read_i16()? } else { 0 };

        tracing::debug!(
            vertices = vertices.len(),
            triangles = indices.len(),
            format = format.bits(),
            version,
            "decoded mesh"
        );

        Ok(Self {
            identifier,
            version,
            format,
            bounding_min,
            bounding_max,
            bones,
            vertices,
            indices,
            materials,
            strips,
            pool,
            warnings,
        })
    }

    /// Encode with the original identifier and attribute mask; decoding a
    /// valid file and encoding it again is byte-identical.
    pub fn write(&self, writer: &mut BinaryWriter) {
        writer.write_cstring(&self.identifier);
        writer.write_i32(self.format.bits());
        writer.write_vec3(self.bounding_min);
        writer.write_vec3(self.bounding_max);

        writer.write_i16(self.bones.len() as i16);
        for &bone in &self.bones {
            writer.write_i16(bone);
        }

        writer.write_i16(self.vertices.len() as i16);
        if self.format.contains(VertexFormat::POSITION) {
            for vertex in &self.vertices {
                writer.write_vec3(vertex.position);
            }
        }
        if self.format.contains(VertexFormat::NORMAL) {
            for vertex in &self.vertices {
                writer.write_vec3(vertex.normal);
            }
        }
        if self.format.contains(VertexFormat::COLOR) {
            for vertex in &self.vertices {
                for channel in vertex.color {
                    writer.write_f32(channel);
                }
            }
        }
        if self.format.bones_enabled() {
            for vertex in &self.vertices {
                for weight in vertex.bone_weights {
                    writer.write_f32(weight);
                }
                for index in vertex.bone_indices {
                    writer.write_i16(index);
                }
            }
        }
        if self.format.contains(VertexFormat::TANGENT) {
            for vertex in &self.vertices {
                writer.write_vec3(vertex.tangent);
            }
        }
        if self.format.contains(VertexFormat::UV1) {
            for vertex in &self.vertices {
                writer.write_vec2(vertex.uv1);
            }
        }
        if self.format.contains(VertexFormat::UV2) {
            for vertex in &self.vertices {
                writer.write_vec2(vertex.uv2);
            }
        }
        if self.format.contains(VertexFormat::UV3) {
            for vertex in &self.vertices {
                writer.write_vec2(vertex.uv3);
            }
        }
        if self.format.contains(VertexFormat::UV4) {
            for vertex in &self.vertices {
                writer.write_vec2(vertex.uv4);
            }
        }

        writer.write_i16(self.indices.len() as i16);
        for triple in &self.indices {
            for &index in triple {
                writer.write_i16(index);
            }
        }

        writer.write_i16(self.materials.len() as i16);
        for &material in &self.materials {
            writer.write_i16(material);
        }

        writer.write_i16(self.strips.len() as i16);
        for &strip in &self.strips {
            writer.write_i16(strip);
        }

        if self.version >= 8 {
            writer.write_i16(self.pool);
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = BinaryWriter::new();
        self.write(&mut writer);
        writer.into_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn sample_mesh(identifier: &str, format: VertexFormat) -> MeshFile {
        let version = if identifier == "ZMS0007" { 7 } else { 8 };
        let vertices = (0..4)
            .map(|i| {
                let f = i as f32;
                MeshVertex {
                    position: Vec3::new(f, f * 2.0, f * 3.0),
                    normal: Vec3::Z,
                    color: [1.0, 0.5, 0.25, 1.0],
                    bone_weights: [1.0, 0.0, 0.0, 0.0],
                    bone_indices: [i as i16, 0, 0, 0],
                    tangent: Vec3::X,
                    uv1: Vec2::new(f * 0.1, f * 0.2),
                    uv2: Vec2::new(f * 0.3, f * 0.4),
                    ..MeshVertex::default()
                }
            })
            .collect();

        MeshFile {
            identifier: identifier.to_string(),
            version,
            format,
            bounding_min: Vec3::ZERO,
            bounding_max: Vec3::new(3.0, 6.0, 9.0),
            bones: vec![0, 2],
            vertices,
            indices: vec![[0, 1, 2], [2, 1, 3]],
            materials: vec![0],
            strips: Vec::new(),
            pool: 0,
            warnings: Vec::new(),
        }
    }

    #[test]
    fn test_mesh_decode_position_uv_only() {
        let format = VertexFormat::POSITION | VertexFormat::UV1;
        let bytes = sample_mesh("ZMS0008", format).to_bytes();

        let zms = MeshFile::from_bytes(&bytes).unwrap();
        assert_eq!(zms.version, 8);
        assert_eq!(zms.format, format);
        assert_eq!(zms.vertices.len(), 4);
        assert_eq!(zms.indices.len(), 2);

        // Only the enabled fields round-tripped; the rest stay default.
        let v = &zms.vertices[1];
        assert_eq!(v.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(v.uv1, Vec2::new(0.1, 0.2));
        assert_eq!(v.normal, Vec3::ZERO);
        assert_eq!(v.uv2, Vec2::ZERO);
        assert_eq!(v.bone_weights, [0.0; 4]);
    }

    #[test]
    fn test_mesh_skinned_decode() {
        let format = VertexFormat::POSITION
            | VertexFormat::NORMAL
            | VertexFormat::BONE_WEIGHT
            | VertexFormat::BONE_INDEX
            | VertexFormat::UV1;
        let bytes = sample_mesh("ZMS0008", format).to_bytes();

        let zms = MeshFile::from_bytes(&bytes).unwrap();
        assert!(zms.format.bones_enabled());
        assert_eq!(zms.bones, vec![0, 2]);
        assert_eq!(zms.vertices[3].bone_indices, [3, 0, 0, 0]);
        assert_eq!(zms.vertices[3].bone_weights, [1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_mesh_bone_flags_require_both() {
        let format = VertexFormat::POSITION | VertexFormat::BONE_WEIGHT;
        assert!(!format.bones_enabled());
    }

    #[test]
    fn test_mesh_v7_has_no_pool() {
        let format = VertexFormat::POSITION;
        let v7 = sample_mesh("ZMS0007", format).to_bytes();
        let v8 = sample_mesh("ZMS0008", format).to_bytes();
        assert_eq!(v7.len() + 2, v8.len());

        let zms = MeshFile::from_bytes(&v7).unwrap();
        assert_eq!(zms.version, 7);
        assert_eq!(zms.pool, 0);
    }

    #[test]
    fn test_mesh_version_fallback_warns() {
        let mut mesh = sample_mesh("ZMS0008", VertexFormat::POSITION);
        mesh.identifier = "ZMS0009".to_string();
        let zms = MeshFile::from_bytes(&mesh.to_bytes()).unwrap();
        assert_eq!(zms.version, 8);
        assert_eq!(zms.warnings.len(), 1);
    }

    #[test]
    fn test_mesh_invalid_magic() {
        let err = MeshFile::from_bytes(b"HIM0001\0rest").unwrap_err();
        assert!(matches!(err, crate::Error::InvalidMagic { .. }));
    }

    #[test]
    fn test_mesh_truncated_vertex_block() {
        let bytes = sample_mesh("ZMS0008", VertexFormat::POSITION).to_bytes();
        let err = MeshFile::from_bytes(&bytes[..40]).unwrap_err();
        assert!(matches!(err, crate::Error::Truncated { .. }));
    }
}
