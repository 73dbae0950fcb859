//! Host-facing scene composition
//!
//! The import entry points wrap the decoders and builders into a
//! scene-graph-shaped composite: a named root with named children, plain
//! data all the way down. Importers are stateless; construct, call, drop.

use std::path::Path;

use glam::{Quat, Vec3};
use serde::Serialize;

use crate::error::Result;
use crate::formats::ifo::ObjectPlacement;
use crate::formats::zmd::SkeletonFile;
use crate::formats::zms::MeshFile;
use crate::mesh::{Material, MeshGeometry, build_mesh, locate_texture};
use crate::skeleton::Skeleton;
use crate::terrain::{Terrain, TerrainChunk, TerrainSettings, assemble_terrain};
use crate::transform::{convert_position, convert_rotation};

/// Payload of a scene node.
#[derive(Debug, Serialize)]
pub enum NodeKind {
    /// Structural node; transform only.
    Group,
    /// A terrain chunk with its re-tiled geometry.
    TerrainChunk(TerrainChunk),
    /// Renderable geometry with an optional material.
    Mesh {
        geometry: MeshGeometry,
        material: Option<Material>,
    },
    /// A bone hierarchy with rest transforms.
    Skeleton(Skeleton),
}

/// One node of the composite handed to the host.
#[derive(Debug, Serialize)]
pub struct SceneNode {
    pub name: String,
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
    pub children: Vec<SceneNode>,
    pub kind: NodeKind,
}

impl SceneNode {
    fn group(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            children: Vec::new(),
            kind: NodeKind::Group,
        }
    }

    /// Compose importer outputs under one root, the shape the host consumes.
    pub fn root(children: Vec<SceneNode>) -> Self {
        Self {
            children,
            ..Self::group("scene")
        }
    }
}

/// Assemble a zone directory into a `terrain` node with one child per
/// chunk, each positioned in world space and carrying its object
/// placements as grandchildren.
pub fn import_terrain<P: AsRef<Path>>(dir: P, settings: &TerrainSettings) -> Result<SceneNode> {
    let terrain: Terrain = assemble_terrain(dir, settings)?;

    let mut root = SceneNode::group("terrain");
    for chunk in terrain.chunks {
        let mut node = SceneNode::group(chunk.coordinate.to_string());
        node.translation = chunk.world_offset;
        node.children = chunk
            .map_data
            .placements()
            .map(placement_node)
            .collect();
        node.kind = NodeKind::TerrainChunk(chunk);
        root.children.push(node);
    }
    Ok(root)
}

fn placement_node(placement: &ObjectPlacement) -> SceneNode {
    SceneNode {
        name: placement.name.clone(),
        translation: convert_position(placement.position),
        rotation: convert_rotation(placement.rotation),
        scale: convert_position(placement.scale),
        children: Vec::new(),
        kind: NodeKind::Group,
    }
}

/// Decode a mesh file into a named mesh node. A material is attached when
/// the geometry's single surface can be bound to a texture located next to
/// the mesh file.
pub fn import_mesh<P: AsRef<Path>>(path: P) -> Result<SceneNode> {
    let path = path.as_ref();
    let file = MeshFile::from_path(path)?;
    let geometry = build_mesh(&file);
    let material = locate_texture(path).map(|texture| Material { texture });

    Ok(SceneNode {
        kind: NodeKind::Mesh { geometry, material },
        ..SceneNode::group(node_name(path, "mesh"))
    })
}

/// Decode a skeleton file into a named skeleton node.
pub fn import_skeleton<P: AsRef<Path>>(path: P) -> Result<SceneNode> {
    let path = path.as_ref();
    let file = SkeletonFile::from_path(path)?;
    let skeleton = Skeleton::from_file(&file)?;

    Ok(SceneNode {
        kind: NodeKind::Skeleton(skeleton),
        ..SceneNode::group(node_name(path, "skeleton"))
    })
}

fn node_name(path: &Path, fallback: &str) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(fallback)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_composition() {
        let root = SceneNode::root(vec![SceneNode::group("terrain"), SceneNode::group("rig")]);
        assert_eq!(root.name, "scene");
        assert_eq!(root.children.len(), 2);
        assert!(matches!(root.kind, NodeKind::Group));
    }

    #[test]
    fn test_placement_node_transforms_into_target_convention() {
        let placement = ObjectPlacement {
            name: "OBJ001".to_string(),
            warp_id: 0,
            event_id: 0,
            object_type: 1,
            object_id: 7,
            map_position: (320, 320),
            rotation: Quat::IDENTITY,
            position: Vec3::new(1.0, 2.0, 3.0),
            scale: Vec3::ONE,
        };

        let node = placement_node(&placement);
        assert_eq!(node.name, "OBJ001");
        assert_eq!(node.translation, Vec3::new(1.0, 3.0, 2.0));
    }
}
