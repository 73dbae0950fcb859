//! Asset inspection commands
//!
//! Decodes a single file and prints a summary (or a JSON dump) of what it
//! contains.

use std::path::Path;

use anyhow::bail;
use rosethorn::formats::him::HeightmapFile;
use rosethorn::formats::ifo::MapDataFile;
use rosethorn::formats::til::TileFile;
use rosethorn::formats::zmd::SkeletonFile;
use rosethorn::formats::zms::MeshFile;
use rosethorn::mesh::{build_mesh, locate_texture};
use rosethorn::skeleton::Skeleton;

/// Inspect an asset file, dispatching on its extension.
pub fn inspect(path: &Path, json: bool) -> anyhow::Result<()> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "him" => {
            let him = HeightmapFile::from_path(path)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&him)?);
            } else {
                println!("Heightmap: {}", path.display());
                println!("  Grid:   {}x{}", him.width, him.height);
                println!("  Scale:  {}", him.scale);
                println!("  Range:  {} .. {}", him.min_height, him.max_height);
            }
        }
        "til" => {
            let til = TileFile::from_path(path)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&til)?);
            } else {
                println!("Tile grid: {}", path.display());
                println!("  Grid:  {}x{}", til.width, til.height);
            }
        }
        "ifo" => {
            let ifo = MapDataFile::from_path(path)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&ifo)?);
            } else {
                println!("Map data: {}", path.display());
                println!("  Decorations:   {}", ifo.decorations.len());
                println!("  Constructions: {}", ifo.constructions.len());
            }
        }
        "zmd" => {
            let zmd = SkeletonFile::from_path(path)?;
            print_warnings(&zmd.warnings);
            if json {
                println!("{}", serde_json::to_string_pretty(&zmd)?);
            } else {
                println!("Skeleton: {}", path.display());
                println!("  Version:     {}", zmd.identifier);
                println!("  Bones:       {}", zmd.bones.len());
                println!("  Attachments: {}", zmd.dummies.len());
            }
        }
        "zms" => {
            let zms = MeshFile::from_path(path)?;
            print_warnings(&zms.warnings);
            if json {
                println!("{}", serde_json::to_string_pretty(&zms)?);
            } else {
                println!("Mesh: {}", path.display());
                println!("  Version:   {}", zms.identifier);
                println!("  Format:    {:?}", zms.format);
                println!("  Vertices:  {}", zms.vertices.len());
                println!("  Triangles: {}", zms.indices.len());
                println!("  Bones:     {}", zms.bones.len());
            }
        }
        other => bail!("unrecognized asset extension: {other:?}"),
    }

    Ok(())
}

/// Print the bone hierarchy of a skeleton file as an indented tree.
pub fn skeleton_tree(path: &Path) -> anyhow::Result<()> {
    let zmd = SkeletonFile::from_path(path)?;
    print_warnings(&zmd.warnings);
    let skeleton = Skeleton::from_file(&zmd)?;

    println!("Skeleton: {} ({} bones)", path.display(), skeleton.bones.len());
    if !skeleton.bones.is_empty() {
        print_bone(&skeleton, 0, 0);
    }
    for attachment in &skeleton.attachments {
        println!(
            "  [{}] <- {}",
            attachment.name, skeleton.bones[attachment.parent].name
        );
    }
    Ok(())
}

fn print_bone(skeleton: &Skeleton, bone: usize, depth: usize) {
    println!("{:indent$}{}", "", skeleton.bones[bone].name, indent = depth * 2);
    for child in skeleton.children_of(bone) {
        print_bone(skeleton, child, depth + 1);
    }
}

/// Reconstruct a mesh and report the resulting geometry buffer.
pub fn mesh_summary(path: &Path) -> anyhow::Result<()> {
    let zms = MeshFile::from_path(path)?;
    print_warnings(&zms.warnings);
    let geometry = build_mesh(&zms);

    println!("Mesh: {}", path.display());
    println!("  Vertices:  {}", geometry.vertex_count());
    println!("  Triangles: {}", geometry.triangle_count());
    println!("  Skinned:   {}", geometry.is_skinned());

    let mut channels = vec!["position"];
    if !geometry.normals.is_empty() {
        channels.push("normal");
    }
    if !geometry.colors.is_empty() {
        channels.push("color");
    }
    if geometry.is_skinned() {
        channels.push("bones");
    }
    if !geometry.tangents.is_empty() {
        channels.push("tangent");
    }
    if !geometry.uv1.is_empty() {
        channels.push("uv1");
    }
    if !geometry.uv2.is_empty() {
        channels.push("uv2");
    }
    println!("  Channels:  {}", channels.join(", "));

    match locate_texture(path) {
        Some(texture) => println!("  Texture:   {}", texture.display()),
        None => println!("  Texture:   not found"),
    }
    Ok(())
}

fn print_warnings(warnings: &[String]) {
    for warning in warnings {
        tracing::warn!("{warning}");
    }
}
