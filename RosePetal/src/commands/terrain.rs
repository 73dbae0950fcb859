//! Terrain assembly dry-run
//!
//! Assembles a zone directory exactly the way a host import would, then
//! prints what came out instead of handing it to an engine.

use std::path::Path;

use rosethorn::terrain::{TerrainSettings, assemble_terrain};

pub fn report(path: &Path, tile_size: usize, chunk_world_size: f32) -> anyhow::Result<()> {
    let settings = TerrainSettings {
        tile_size,
        chunk_world_size,
    };

    let terrain = assemble_terrain(path, &settings)?;

    println!("Zone: {}", path.display());
    println!("  Chunks: {} ({}x{})", terrain.chunks.len(), terrain.width, terrain.height);

    let mut tiles = 0;
    let mut triangles = 0;
    let mut placements = 0;
    for chunk in &terrain.chunks {
        tiles += chunk.tiles.len();
        triangles += chunk.tiles.iter().map(|t| t.indices.len()).sum::<usize>();
        placements += chunk.map_data.placements().count();
    }
    println!("  Tiles:      {tiles}");
    println!("  Triangles:  {triangles}");
    println!("  Placements: {placements}");

    for chunk in &terrain.chunks {
        println!(
            "  [{}] grid ({}, {}) at ({}, {}, {}) - {} tiles, {} objects",
            chunk.coordinate,
            chunk.grid_position.0,
            chunk.grid_position.1,
            chunk.world_offset.x,
            chunk.world_offset.y,
            chunk.world_offset.z,
            chunk.tiles.len(),
            chunk.map_data.placements().count(),
        );
    }
    Ok(())
}
