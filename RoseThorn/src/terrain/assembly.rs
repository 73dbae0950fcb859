//! Chunk decoding and re-tiling
//!
//! Each complete chunk decodes into a heightmap/tile-grid/map-data triplet,
//! then the heightmap is cut into fixed-size sub-patches. Tile origins
//! stride `tile_size - 1`, so adjacent tiles share their seam row/column -
//! the shared edge is what keeps the stitched terrain crack-free.

use glam::Vec3;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::formats::him::HeightmapFile;
use crate::formats::ifo::MapDataFile;
use crate::formats::til::TileFile;
use crate::terrain::discovery::{ChunkCoordinate, ChunkFileSet, ChunkIndex};

/// Terrain reconstruction settings.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TerrainSettings {
    /// Vertices per tile edge. Must be at least 2 and tile the heightmap
    /// evenly: `(width - 1) % (tile_size - 1) == 0`.
    pub tile_size: usize,
    /// World-space edge length of one chunk, in the source engine's map
    /// units. 160 matches the original client's zone layout; kept
    /// configurable rather than hardcoded.
    pub chunk_world_size: f32,
}

impl Default for TerrainSettings {
    fn default() -> Self {
        Self {
            tile_size: 5,
            chunk_world_size: 160.0,
        }
    }
}

impl TerrainSettings {
    fn validate(&self, heightmap: &HeightmapFile) -> Result<()> {
        if self.tile_size < 2 {
            return Err(Error::InvalidSettings {
                message: format!("tile size {} is below the minimum of 2", self.tile_size),
            });
        }
        let width = heightmap.width as usize;
        let height = heightmap.height as usize;
        if width < self.tile_size || height < self.tile_size {
            return Err(Error::InvalidSettings {
                message: format!(
                    "tile size {} exceeds heightmap extent {width}x{height}",
                    self.tile_size
                ),
            });
        }
        let span = self.tile_size - 1;
        if (width - 1) % span != 0 || (height - 1) % span != 0 {
            return Err(Error::InvalidSettings {
                message: format!(
                    "tile size {} does not evenly tile a {width}x{height} heightmap",
                    self.tile_size
                ),
            });
        }
        Ok(())
    }
}

/// One re-tiled sub-patch of a chunk heightmap.
#[derive(Debug, Clone, Serialize)]
pub struct TerrainTile {
    /// Vertex-window origin inside the chunk grid.
    pub origin: (usize, usize),
    /// Vertices per edge.
    pub size: usize,
    /// Chunk-local vertex positions, row-major over the window.
    pub positions: Vec<Vec3>,
    /// Triangle index triples into `positions`.
    pub indices: Vec<[u32; 3]>,
}

/// One assembled terrain chunk.
#[derive(Debug, Serialize)]
pub struct TerrainChunk {
    /// Raw coordinate from the file names.
    pub coordinate: ChunkCoordinate,
    /// Normalized position in the zone grid.
    pub grid_position: (usize, usize),
    /// World-space offset of the chunk origin.
    pub world_offset: Vec3,
    pub heightmap: HeightmapFile,
    pub tile_grid: TileFile,
    pub map_data: MapDataFile,
    pub tiles: Vec<TerrainTile>,
}

/// A fully assembled zone.
#[derive(Debug, Serialize)]
pub struct Terrain {
    /// Zone extent in chunks per axis.
    pub width: usize,
    pub height: usize,
    pub chunks: Vec<TerrainChunk>,
}

/// Discover, decode, and re-tile every chunk of a zone directory.
///
/// Any missing or malformed chunk aborts the whole terrain; a partial zone
/// is never returned.
pub fn assemble_terrain<P: AsRef<std::path::Path>>(
    dir: P,
    settings: &TerrainSettings,
) -> Result<Terrain> {
    let index = ChunkIndex::scan(dir)?;
    let sets = index.complete()?;

    let mut chunks = Vec::with_capacity(sets.len());
    for ((x, y), set) in sets {
        let coordinate = index.coordinate_at(x, y);
        chunks.push(assemble_chunk(coordinate, (x, y), &set, settings)?);
    }

    tracing::debug!(
        chunks = chunks.len(),
        width = index.width,
        height = index.height,
        "assembled terrain"
    );

    Ok(Terrain {
        width: index.width,
        height: index.height,
        chunks,
    })
}

/// Decode one chunk triplet and cut its heightmap into tiles.
pub fn assemble_chunk(
    coordinate: ChunkCoordinate,
    grid_position: (usize, usize),
    files: &ChunkFileSet,
    settings: &TerrainSettings,
) -> Result<TerrainChunk> {
    let heightmap = HeightmapFile::from_path(&files.heightmap)?;
    let tile_grid = TileFile::from_path(&files.tile_grid)?;
    let map_data = MapDataFile::from_path(&files.map_data)?;

    let tiles = tile_heightmap(&heightmap, settings)?;
    let world_offset = Vec3::new(
        grid_position.0 as f32 * settings.chunk_world_size,
        0.0,
        grid_position.1 as f32 * settings.chunk_world_size,
    );

    Ok(TerrainChunk {
        coordinate,
        grid_position,
        world_offset,
        heightmap,
        tile_grid,
        map_data,
        tiles,
    })
}

/// Cut a heightmap into seam-sharing tiles.
pub fn tile_heightmap(
    heightmap: &HeightmapFile,
    settings: &TerrainSettings,
) -> Result<Vec<TerrainTile>> {
    settings.validate(heightmap)?;
    if heightmap.scale <= 0.0 {
        return Err(Error::InvalidFormat(format!(
            "heightmap scale {} is not positive",
            heightmap.scale
        )));
    }

    let size = settings.tile_size;
    let span = size - 1;
    let width = heightmap.width as usize;
    let height = heightmap.height as usize;
    let tile_count_x = (width - 1) / span;
    let tile_count_y = (height - 1) / span;
    let spacing = settings.chunk_world_size / (width - 1) as f32;

    let mut tiles = Vec::with_capacity(tile_count_x * tile_count_y);
    for tile_y in 0..tile_count_y {
        for tile_x in 0..tile_count_x {
            let origin = (tile_x * span, tile_y * span);
            tiles.push(build_tile(heightmap, origin, size, spacing));
        }
    }
    Ok(tiles)
}

fn build_tile(
    heightmap: &HeightmapFile,
    origin: (usize, usize),
    size: usize,
    spacing: f32,
) -> TerrainTile {
    let mut positions = Vec::with_capacity(size * size);
    for y in 0..size {
        for x in 0..size {
            let grid_x = origin.0 + x;
            let grid_y = origin.1 + y;
            positions.push(Vec3::new(
                grid_x as f32 * spacing,
                heightmap.sample(grid_x, grid_y) / heightmap.scale,
                grid_y as f32 * spacing,
            ));
        }
    }

    // Two triangles per quad over the local vertex window.
    let stride = size as u32;
    let mut indices = Vec::with_capacity((size - 1) * (size - 1) * 2);
    for y in 0..size as u32 - 1 {
        for x in 0..stride - 1 {
            let i = y * stride + x;
            indices.push([i, i + 1, i + stride]);
            indices.push([i + 1, i + stride + 1, i + stride]);
        }
    }

    TerrainTile {
        origin,
        size,
        positions,
        indices,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_heightmap(width: i32, height: i32) -> HeightmapFile {
        let count = (width * height) as usize;
        let samples: Vec<f32> = (0..count).map(|i| i as f32).collect();
        HeightmapFile {
            width,
            height,
            grid_count: (width - 1) * (height - 1),
            scale: 100.0,
            min_height: 0.0,
            max_height: (count - 1) as f32,
            samples,
        }
    }

    #[test]
    fn test_tile_count_for_full_chunk() {
        let him = flat_heightmap(65, 65);
        let tiles = tile_heightmap(&him, &TerrainSettings::default()).unwrap();
        assert_eq!(tiles.len(), 16 * 16);
        assert!(tiles.iter().all(|t| t.positions.len() == 25));
        assert!(tiles.iter().all(|t| t.indices.len() == 32));
    }

    #[test]
    fn test_adjacent_tiles_share_seam_vertices() {
        let him = flat_heightmap(65, 65);
        let settings = TerrainSettings::default();
        let tiles = tile_heightmap(&him, &settings).unwrap();

        let size = settings.tile_size;
        let left = &tiles[0];
        let right = &tiles[1];
        for row in 0..size {
            let left_edge = left.positions[row * size + (size - 1)];
            let right_edge = right.positions[row * size];
            assert_eq!(left_edge, right_edge);
        }

        let below = &tiles[16];
        for column in 0..size {
            let bottom_edge = left.positions[(size - 1) * size + column];
            let top_edge = below.positions[column];
            assert_eq!(bottom_edge, top_edge);
        }
    }

    #[test]
    fn test_tile_heights_are_scaled() {
        let him = flat_heightmap(5, 5);
        let settings = TerrainSettings {
            tile_size: 5,
            chunk_world_size: 160.0,
        };
        let tiles = tile_heightmap(&him, &settings).unwrap();
        // Sample 6 is at grid (1, 1); height = 6 / 100.
        let tile = &tiles[0];
        assert_eq!(tile.positions[6].y, 0.06);
        assert_eq!(tile.positions[6].x, 40.0);
        assert_eq!(tile.positions[6].z, 40.0);
    }

    #[test]
    fn test_quad_winding() {
        let him = flat_heightmap(5, 5);
        let tiles = tile_heightmap(
            &him,
            &TerrainSettings {
                tile_size: 5,
                chunk_world_size: 160.0,
            },
        )
        .unwrap();
        assert_eq!(tiles[0].indices[0], [0, 1, 5]);
        assert_eq!(tiles[0].indices[1], [1, 6, 5]);
    }

    #[test]
    fn test_settings_validation() {
        let him = flat_heightmap(65, 65);

        let err = tile_heightmap(
            &him,
            &TerrainSettings {
                tile_size: 1,
                chunk_world_size: 160.0,
            },
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidSettings { .. }));

        // 6 does not evenly tile 65 vertices (64 % 5 != 0)
        let err = tile_heightmap(
            &him,
            &TerrainSettings {
                tile_size: 6,
                chunk_world_size: 160.0,
            },
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidSettings { .. }));
    }

    #[test]
    fn test_zero_scale_is_rejected() {
        let mut him = flat_heightmap(5, 5);
        him.scale = 0.0;
        let err = tile_heightmap(&him, &TerrainSettings::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidFormat(_)));
    }
}
