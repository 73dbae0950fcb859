//! `.IFO` map data decoding
//!
//! IFO files carry per-chunk placement metadata as a table of typed blocks
//! (`block_type`, absolute `offset`). Only the object-placement blocks are
//! reconstructed; unknown block types are skipped. Blocks are visited in
//! ascending offset order, so the cursor never moves backward.

use std::path::Path;

use glam::{Quat, Vec3};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::io::BinaryCursor;

/// Block types that contribute object placements.
const BLOCK_DECORATION: u32 = 1;
const BLOCK_CONSTRUCTION: u32 = 3;

/// Upper bound on the block table; real files carry about a dozen blocks.
const MAX_BLOCKS: u32 = 64;

/// One placed object: a model reference with its chunk-local transform.
#[derive(Debug, Clone, Serialize)]
pub struct ObjectPlacement {
    pub name: String,
    pub warp_id: u16,
    pub event_id: u16,
    pub object_type: u32,
    pub object_id: u32,
    /// Position on the zone-wide map grid.
    pub map_position: (i32, i32),
    /// Rotation in source (ROSE) axis convention.
    pub rotation: Quat,
    /// Position in source (ROSE) axis convention.
    pub position: Vec3,
    pub scale: Vec3,
}

/// Decoded placement metadata for one terrain chunk.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MapDataFile {
    pub decorations: Vec<ObjectPlacement>,
    pub constructions: Vec<ObjectPlacement>,
}

impl MapDataFile {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = super::read_file(path)?;
        Self::from_bytes(&data)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut cursor = BinaryCursor::new(data);
        Self::read(&mut cursor)
    }

    pub fn read(cursor: &mut BinaryCursor<'_>) -> Result<Self> {
        let block_count = cursor.read_u32()?;
        if block_count > MAX_BLOCKS {
            return Err(Error::InvalidFormat(format!(
                "IFO block table too large: {block_count}"
            )));
        }

        let mut blocks = Vec::with_capacity(block_count as usize);
        for _ in 0..block_count {
            let block_type = cursor.read_u32()?;
            let offset = cursor.read_u32()?;
            blocks.push((block_type, offset));
        }

        // Visit blocks in file order regardless of table order; keeps the
        // cursor monotonic.
        blocks.sort_by_key(|&(_, offset)| offset);

        let mut map_data = Self::default();
        for (block_type, offset) in blocks {
            match block_type {
                BLOCK_DECORATION => {
                    cursor.seek_to(offset as usize)?;
                    map_data.decorations = read_object_block(cursor)?;
                }
                BLOCK_CONSTRUCTION => {
                    cursor.seek_to(offset as usize)?;
                    map_data.constructions = read_object_block(cursor)?;
                }
                _ => {}
            }
        }

        tracing::debug!(
            decorations = map_data.decorations.len(),
            constructions = map_data.constructions.len(),
            "decoded map data"
        );

        Ok(map_data)
    }

    /// All placements, decorations first.
    pub fn placements(&self) -> impl Iterator<Item = &ObjectPlacement> {
        self.decorations.iter().chain(self.constructions.iter())
    }
}

fn read_object_block(cursor: &mut BinaryCursor<'_>) -> Result<Vec<ObjectPlacement>> {
    let count = cursor.read_u32()?;
    let mut objects = Vec::with_capacity(count as usize);
    for _ in 0..count {
        objects.push(read_object(cursor)?);
    }
    Ok(objects)
}

fn read_object(cursor: &mut BinaryCursor<'_>) -> Result<ObjectPlacement> {
    let name = cursor.read_string_u8()?;
    let warp_id = cursor.read_u16()?;
    let event_id = cursor.read_u16()?;
    let object_type = cursor.read_u32()?;
    let object_id = cursor.read_u32()?;
    let map_x = cursor.read_i32()?;
    let map_y = cursor.read_i32()?;
    let rotation = cursor.read_quat_wxyz()?;
    let position = cursor.read_vec3()?;
    let scale = cursor.read_vec3()?;

    Ok(ObjectPlacement {
        name,
        warp_id,
        event_id,
        object_type,
        object_id,
        map_position: (map_x, map_y),
        rotation,
        position,
        scale,
    })
}
