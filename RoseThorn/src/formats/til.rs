//! `.TIL` tile index grid decoding
//!
//! Pairs with a heightmap of the same chunk: each cell selects an entry in
//! the zone tile-definition table. Index bounds are validated where the
//! table is consulted, not at decode.

use std::path::Path;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::io::BinaryCursor;

/// One cell of the tile grid.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TileCell {
    pub brush_id: u8,
    pub tile_index: u8,
    pub tile_set: u8,
    /// Index into the zone tile-definition table.
    pub tile: i32,
}

/// A decoded tile grid. Immutable after decode.
#[derive(Debug, Clone, Serialize)]
pub struct TileFile {
    pub width: i32,
    pub height: i32,
    /// Row-major cells; exactly `width * height` entries.
    #[serde(skip)]
    pub cells: Vec<TileCell>,
}

impl TileFile {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = super::read_file(path)?;
        Self::from_bytes(&data)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut cursor = BinaryCursor::new(data);
        Self::read(&mut cursor)
    }

    pub fn read(cursor: &mut BinaryCursor<'_>) -> Result<Self> {
        let width = cursor.read_i32()?;
        let height = cursor.read_i32()?;

        if width <= 0 || height <= 0 {
            return Err(Error::InvalidFormat(format!(
                "tile grid dimensions {width}x{height} out of range"
            )));
        }

        let count = width as usize * height as usize;
        let mut cells = Vec::with_capacity(count);
        for _ in 0..count {
            let brush_id = cursor.read_u8()?;
            let tile_index = cursor.read_u8()?;
            let tile_set = cursor.read_u8()?;
            let tile = cursor.read_i32()?;
            cells.push(TileCell {
                brush_id,
                tile_index,
                tile_set,
                tile,
            });
        }

        tracing::debug!(width, height, "decoded tile grid");

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Cell at grid position `(x, y)`, row-major.
    pub fn cell(&self, x: usize, y: usize) -> TileCell {
        self.cells[y * self.width as usize + x]
    }
}
