//! Terrain chunk discovery and assembly
//!
//! A zone directory holds one heightmap (`.HIM`), tile grid (`.TIL`) and
//! map data (`.IFO`) file per chunk, all named by a `<x>_<y>` coordinate
//! stem. The raw coordinates are arbitrary integers (a zone may span
//! `30_30..34_33`), so [`discovery`] first derives a dense zero-based grid
//! from the observed bounds, then [`assembly`] decodes each complete chunk
//! and re-tiles its heightmap into fixed-size sub-patches that share seam
//! vertices with their neighbors.

pub mod assembly;
pub mod discovery;

pub use assembly::{Terrain, TerrainChunk, TerrainSettings, TerrainTile, assemble_terrain};
pub use discovery::{
    ChunkCoordinate, ChunkFileKind, ChunkFileSet, ChunkIndex, ScanEntry, scan_directory,
};
