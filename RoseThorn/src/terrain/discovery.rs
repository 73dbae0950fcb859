//! Two-pass chunk file discovery
//!
//! Pass one derives the coordinate bounds from every entry whose stem
//! parses as `<int>_<int>` - chunk files and chunk-named subdirectories
//! both count, so zones that carry lightmap subdirectories and bare
//! file-only fixtures index identically. Pass two drops each recognized
//! file into the dense, zero-based grid. Entries that match neither
//! pattern are skipped silently by design.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use walkdir::WalkDir;

use crate::error::{Error, Result};

/// The three file kinds that make up one terrain chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChunkFileKind {
    Heightmap,
    TileGrid,
    MapData,
}

impl ChunkFileKind {
    /// Classify by file extension, case-insensitive.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "him" => Some(Self::Heightmap),
            "til" => Some(Self::TileGrid),
            "ifo" => Some(Self::MapData),
            _ => None,
        }
    }
}

impl fmt::Display for ChunkFileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Heightmap => write!(f, "heightmap"),
            Self::TileGrid => write!(f, "tile grid"),
            Self::MapData => write!(f, "map data"),
        }
    }
}

/// A raw chunk coordinate parsed from a `<x>_<y>` stem. Not zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ChunkCoordinate {
    pub x: i32,
    pub y: i32,
}

impl ChunkCoordinate {
    /// Parse `"33_33"` style stems. Returns `None` for anything else.
    pub fn parse(stem: &str) -> Option<Self> {
        let (x, y) = stem.split_once('_')?;
        Some(Self {
            x: x.parse().ok()?,
            y: y.parse().ok()?,
        })
    }

    fn of_entry(entry: &ScanEntry) -> Option<Self> {
        let stem = entry.path.file_stem()?.to_str()?;
        Self::parse(stem)
    }
}

impl fmt::Display for ChunkCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.x, self.y)
    }
}

/// One directory entry handed to discovery. Decouples the scan from any
/// particular traversal API; hosts with their own file systems can build
/// these directly.
#[derive(Debug, Clone)]
pub struct ScanEntry {
    pub path: PathBuf,
    pub is_dir: bool,
}

/// List the immediate entries of a zone directory.
pub fn scan_directory<P: AsRef<Path>>(dir: P) -> Result<Vec<ScanEntry>> {
    let mut entries = Vec::new();
    for entry in WalkDir::new(dir.as_ref()).min_depth(1).max_depth(1) {
        let entry = entry?;
        entries.push(ScanEntry {
            is_dir: entry.file_type().is_dir(),
            path: entry.into_path(),
        });
    }
    Ok(entries)
}

/// The three resolved paths of one complete chunk.
#[derive(Debug, Clone)]
pub struct ChunkFileSet {
    pub heightmap: PathBuf,
    pub tile_grid: PathBuf,
    pub map_data: PathBuf,
}

#[derive(Debug, Clone, Default)]
struct ChunkCell {
    heightmap: Option<PathBuf>,
    tile_grid: Option<PathBuf>,
    map_data: Option<PathBuf>,
}

/// Dense zero-based index of discovered chunk files.
#[derive(Debug)]
pub struct ChunkIndex {
    /// Raw coordinate mapped to normalized `(0, 0)`.
    pub origin: ChunkCoordinate,
    /// Grid extent in chunks per axis.
    pub width: usize,
    pub height: usize,
    cells: Vec<ChunkCell>,
}

impl ChunkIndex {
    /// Scan a zone directory and index its chunk files.
    pub fn scan<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let entries = scan_directory(&dir)?;
        let Some(bounds) = coordinate_bounds(&entries) else {
            return Err(Error::EmptyTerrainDirectory {
                path: dir.as_ref().to_path_buf(),
            });
        };
        Ok(index_files(&entries, bounds))
    }

    /// Raw coordinate of a normalized grid cell.
    pub fn coordinate_at(&self, x: usize, y: usize) -> ChunkCoordinate {
        ChunkCoordinate {
            x: self.origin.x + x as i32,
            y: self.origin.y + y as i32,
        }
    }

    /// Require every cell to carry all three file kinds; the whole terrain
    /// is rejected otherwise - a partial zone is not a usable output.
    pub fn complete(&self) -> Result<Vec<((usize, usize), ChunkFileSet)>> {
        let mut sets = Vec::with_capacity(self.cells.len());
        for y in 0..self.height {
            for x in 0..self.width {
                let cell = &self.cells[y * self.width + x];
                let raw = self.coordinate_at(x, y);
                let missing = |kind| Error::MissingChunkFile {
                    x: raw.x,
                    y: raw.y,
                    kind,
                };
                let set = ChunkFileSet {
                    heightmap: cell
                        .heightmap
                        .clone()
                        .ok_or_else(|| missing(ChunkFileKind::Heightmap))?,
                    tile_grid: cell
                        .tile_grid
                        .clone()
                        .ok_or_else(|| missing(ChunkFileKind::TileGrid))?,
                    map_data: cell
                        .map_data
                        .clone()
                        .ok_or_else(|| missing(ChunkFileKind::MapData))?,
                };
                sets.push(((x, y), set));
            }
        }
        Ok(sets)
    }
}

/// Pass one: running min/max over every chunk-named entry.
pub fn coordinate_bounds(entries: &[ScanEntry]) -> Option<(ChunkCoordinate, ChunkCoordinate)> {
    let mut bounds: Option<(ChunkCoordinate, ChunkCoordinate)> = None;
    for entry in entries {
        let Some(coord) = ChunkCoordinate::of_entry(entry) else {
            continue;
        };
        bounds = Some(match bounds {
            None => (coord, coord),
            Some((min, max)) => (
                ChunkCoordinate {
                    x: min.x.min(coord.x),
                    y: min.y.min(coord.y),
                },
                ChunkCoordinate {
                    x: max.x.max(coord.x),
                    y: max.y.max(coord.y),
                },
            ),
        });
    }
    bounds
}

/// Pass two: drop recognized files into the normalized grid.
pub fn index_files(
    entries: &[ScanEntry],
    (min, max): (ChunkCoordinate, ChunkCoordinate),
) -> ChunkIndex {
    let width = (max.x - min.x + 1) as usize;
    let height = (max.y - min.y + 1) as usize;
    let mut cells = vec![ChunkCell::default(); width * height];

    for entry in entries {
        if entry.is_dir {
            continue;
        }
        let Some(coord) = ChunkCoordinate::of_entry(entry) else {
            continue;
        };
        let Some(kind) = entry
            .path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(ChunkFileKind::from_extension)
        else {
            continue;
        };

        let x = (coord.x - min.x) as usize;
        let y = (coord.y - min.y) as usize;
        let cell = &mut cells[y * width + x];
        let path = entry.path.clone();
        match kind {
            ChunkFileKind::Heightmap => cell.heightmap = Some(path),
            ChunkFileKind::TileGrid => cell.tile_grid = Some(path),
            ChunkFileKind::MapData => cell.map_data = Some(path),
        }
    }

    tracing::debug!(width, height, origin = %min, "indexed chunk files");

    ChunkIndex {
        origin: min,
        width,
        height,
        cells,
    }
}
