//! Mesh reconstruction
//!
//! [`GeometryBuilder`] is accumulation-style: optional attributes are
//! staged per vertex and the position add commits the record, so position
//! always comes last. [`build_mesh`] drives it straight-line from the
//! file-level attribute mask - attribute presence never varies per vertex.
//! Index triples are appended in reverse component order to flip the
//! triangle winding for the target renderer's front-face convention.

use std::path::{Path, PathBuf};

use glam::{Vec2, Vec3};
use serde::Serialize;

use crate::formats::zms::{MeshFile, VertexFormat};
use crate::transform::convert_position;

/// A renderable vertex/index buffer with declared attribute channels.
///
/// As produced by [`build_mesh`], channel vectors are either empty
/// (attribute absent) or exactly `positions.len()` long. One surface per
/// geometry.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MeshGeometry {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub colors: Vec<[f32; 4]>,
    pub bone_indices: Vec<[u16; 4]>,
    pub bone_weights: Vec<[f32; 4]>,
    pub tangents: Vec<Vec3>,
    pub uv1: Vec<Vec2>,
    pub uv2: Vec<Vec2>,
    pub indices: Vec<[u32; 3]>,
}

impl MeshGeometry {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    pub fn is_skinned(&self) -> bool {
        !self.bone_weights.is_empty()
    }
}

/// Accumulates vertices attribute-by-attribute; `add_vertex` commits.
#[derive(Debug, Default)]
pub struct GeometryBuilder {
    staged_normal: Option<Vec3>,
    staged_color: Option<[f32; 4]>,
    staged_bones: Option<([u16; 4], [f32; 4])>,
    staged_tangent: Option<Vec3>,
    staged_uv1: Option<Vec2>,
    staged_uv2: Option<Vec2>,
    geometry: MeshGeometry,
}

impl GeometryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_normal(&mut self, normal: Vec3) -> &mut Self {
        self.staged_normal = Some(normal);
        self
    }

    pub fn set_color(&mut self, color: [f32; 4]) -> &mut Self {
        self.staged_color = Some(color);
        self
    }

    pub fn set_bones(&mut self, indices: [u16; 4], weights: [f32; 4]) -> &mut Self {
        self.staged_bones = Some((indices, weights));
        self
    }

    pub fn set_tangent(&mut self, tangent: Vec3) -> &mut Self {
        self.staged_tangent = Some(tangent);
        self
    }

    pub fn set_uv1(&mut self, uv: Vec2) -> &mut Self {
        self.staged_uv1 = Some(uv);
        self
    }

    pub fn set_uv2(&mut self, uv: Vec2) -> &mut Self {
        self.staged_uv2 = Some(uv);
        self
    }

    /// Commit the staged attributes and the position as one vertex record.
    pub fn add_vertex(&mut self, position: Vec3) -> &mut Self {
        if let Some(normal) = self.staged_normal.take() {
            self.geometry.normals.push(normal);
        }
        if let Some(color) = self.staged_color.take() {
            self.geometry.colors.push(color);
        }
        if let Some((indices, weights)) = self.staged_bones.take() {
            self.geometry.bone_indices.push(indices);
            self.geometry.bone_weights.push(weights);
        }
        if let Some(tangent) = self.staged_tangent.take() {
            self.geometry.tangents.push(tangent);
        }
        if let Some(uv) = self.staged_uv1.take() {
            self.geometry.uv1.push(uv);
        }
        if let Some(uv) = self.staged_uv2.take() {
            self.geometry.uv2.push(uv);
        }
        self.geometry.positions.push(position);
        self
    }

    pub fn add_triangle(&mut self, triangle: [u32; 3]) -> &mut Self {
        self.geometry.indices.push(triangle);
        self
    }

    pub fn build(self) -> MeshGeometry {
        self.geometry
    }
}

/// Reconstruct renderable geometry from a decoded mesh file.
pub fn build_mesh(file: &MeshFile) -> MeshGeometry {
    let format = file.format;
    let mut builder = GeometryBuilder::new();

    for vertex in &file.vertices {
        if format.contains(VertexFormat::NORMAL) {
            builder.set_normal(convert_position(vertex.normal));
        }
        if format.contains(VertexFormat::COLOR) {
            builder.set_color(vertex.color);
        }
        if format.bones_enabled() {
            let indices = vertex.bone_indices.map(|i| i.max(0) as u16);
            builder.set_bones(indices, vertex.bone_weights);
        }
        if format.contains(VertexFormat::TANGENT) {
            builder.set_tangent(convert_position(vertex.tangent));
        }
        if format.contains(VertexFormat::UV1) {
            builder.set_uv1(vertex.uv1);
        }
        if format.contains(VertexFormat::UV2) {
            builder.set_uv2(vertex.uv2);
        }
        builder.add_vertex(convert_position(vertex.position));
    }

    // Stored winding assumes the source handedness; reverse each triple.
    for &[x, y, z] in &file.indices {
        builder.add_triangle([z.max(0) as u32, y.max(0) as u32, x.max(0) as u32]);
    }

    builder.build()
}

/// A single material referencing an external texture file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Material {
    pub texture: PathBuf,
}

/// Locate the texture belonging to a mesh by swapping its extension.
///
/// Tries both extension casings, PNG before DDS.
pub fn locate_texture<P: AsRef<Path>>(mesh_path: P) -> Option<PathBuf> {
    locate_texture_with(mesh_path, |candidate| candidate.exists())
}

/// [`locate_texture`] with an injectable existence probe, for hosts that
/// resolve files through their own storage layer.
pub fn locate_texture_with<P, F>(mesh_path: P, exists: F) -> Option<PathBuf>
where
    P: AsRef<Path>,
    F: Fn(&Path) -> bool,
{
    for extension in ["png", "PNG", "dds", "DDS"] {
        let candidate = mesh_path.as_ref().with_extension(extension);
        if exists(&candidate) {
            return Some(candidate);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::zms::MeshVertex;

    fn mesh_file(format: VertexFormat, vertices: Vec<MeshVertex>) -> MeshFile {
        MeshFile {
            identifier: "ZMS0008".to_string(),
            version: 8,
            format,
            bounding_min: Vec3::ZERO,
            bounding_max: Vec3::ONE,
            bones: Vec::new(),
            vertices,
            indices: vec![[0, 1, 2]],
            materials: Vec::new(),
            strips: Vec::new(),
            pool: 0,
            warnings: Vec::new(),
        }
    }

    #[test]
    fn test_position_only_mesh() {
        let file = mesh_file(
            VertexFormat::POSITION,
            vec![
                MeshVertex {
                    position: Vec3::new(1.0, 2.0, 3.0),
                    ..MeshVertex::default()
                },
                MeshVertex::default(),
                MeshVertex::default(),
            ],
        );

        let geometry = build_mesh(&file);
        assert_eq!(geometry.vertex_count(), 3);
        // Axis conversion swaps the non-vertical axes.
        assert_eq!(geometry.positions[0], Vec3::new(1.0, 3.0, 2.0));
        assert!(geometry.normals.is_empty());
        assert!(geometry.uv1.is_empty());
        assert!(!geometry.is_skinned());
    }

    #[test]
    fn test_enabled_channels_match_vertex_count() {
        let vertex = MeshVertex {
            position: Vec3::ONE,
            normal: Vec3::new(0.0, 0.0, 1.0),
            uv1: Vec2::new(0.5, 0.5),
            ..MeshVertex::default()
        };
        let file = mesh_file(
            VertexFormat::POSITION | VertexFormat::NORMAL | VertexFormat::UV1,
            vec![vertex; 4],
        );

        let geometry = build_mesh(&file);
        assert_eq!(geometry.positions.len(), 4);
        assert_eq!(geometry.normals.len(), 4);
        assert_eq!(geometry.uv1.len(), 4);
        assert!(geometry.colors.is_empty());
        assert!(geometry.tangents.is_empty());
        // Normals go through the same conversion as positions.
        assert_eq!(geometry.normals[0], Vec3::Y);
    }

    #[test]
    fn test_winding_is_reversed() {
        let mut file = mesh_file(VertexFormat::POSITION, vec![MeshVertex::default(); 4]);
        file.indices = vec![[0, 1, 2], [2, 3, 1]];

        let geometry = build_mesh(&file);
        assert_eq!(geometry.indices[0], [2, 1, 0]);
        assert_eq!(geometry.indices[1], [1, 3, 2]);
    }

    #[test]
    fn test_skinned_channels() {
        let vertex = MeshVertex {
            position: Vec3::ONE,
            bone_indices: [2, 0, 0, 0],
            bone_weights: [0.75, 0.25, 0.0, 0.0],
            ..MeshVertex::default()
        };
        let file = mesh_file(
            VertexFormat::POSITION | VertexFormat::BONE_WEIGHT | VertexFormat::BONE_INDEX,
            vec![vertex; 3],
        );

        let geometry = build_mesh(&file);
        assert!(geometry.is_skinned());
        assert_eq!(geometry.bone_indices[0], [2, 0, 0, 0]);
        assert_eq!(geometry.bone_weights[0], [0.75, 0.25, 0.0, 0.0]);
    }

    #[test]
    fn test_builder_commits_on_position() {
        let mut builder = GeometryBuilder::new();
        builder.set_normal(Vec3::Y).set_uv1(Vec2::ZERO);
        builder.add_vertex(Vec3::ZERO);
        // No staged attributes for the second vertex: nothing carries over.
        builder.add_vertex(Vec3::ONE);

        let geometry = builder.build();
        assert_eq!(geometry.positions.len(), 2);
        assert_eq!(geometry.normals.len(), 1);
        assert_eq!(geometry.uv1.len(), 1);
    }

    #[test]
    fn test_texture_lookup_prefers_png() {
        let probe =
            |existing: &'static [&'static str]| move |p: &Path| existing.contains(&p.to_str().unwrap());

        let found = locate_texture_with("models/CART01.ZMS", probe(&["models/CART01.png", "models/CART01.dds"]));
        assert_eq!(found, Some(PathBuf::from("models/CART01.png")));

        let found = locate_texture_with("models/CART01.ZMS", probe(&["models/CART01.DDS"]));
        assert_eq!(found, Some(PathBuf::from("models/CART01.DDS")));

        let found = locate_texture_with("models/CART01.ZMS", probe(&[]));
        assert_eq!(found, None);
    }
}
