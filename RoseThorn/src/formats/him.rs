//! `.HIM` terrain heightmap decoding
//!
//! A heightmap is a `width x height` grid of raw `f32` samples with a
//! vertical scale factor. Real files carry additional quad-tree patch data
//! after the sample block; it is not needed for reconstruction and is
//! ignored.

use std::path::Path;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::io::BinaryCursor;

/// A decoded heightmap grid. Immutable after decode.
#[derive(Debug, Clone, Serialize)]
pub struct HeightmapFile {
    pub width: i32,
    pub height: i32,
    pub grid_count: i32,
    /// Vertical scale factor applied when tile vertices are generated.
    pub scale: f32,
    /// Row-major samples; exactly `width * height` entries.
    #[serde(skip)]
    pub samples: Vec<f32>,
    pub min_height: f32,
    pub max_height: f32,
}

impl HeightmapFile {
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
        let grid_count = cursor.read_i32()?;
        let scale = cursor.read_f32()?;

        if width <= 0 || height <= 0 {
            return Err(Error::InvalidFormat(format!(
                "heightmap dimensions {width}x{height} out of range"
            )));
        }

        let count = width as usize * height as usize;
        let mut samples = Vec::with_capacity(count);
        let mut min_height = f32::INFINITY;
        let mut max_height = f32::NEG_INFINITY;

        for _ in 0..count {
            let sample = cursor.read_f32()?;
            min_height = min_height.min(sample);
            max_height = max_height.max(sample);
            samples.push(sample);
        }

        tracing::debug!(width, height, min_height, max_height, "decoded heightmap");

        Ok(Self {
            width,
            height,
            grid_count,
            scale,
            samples,
            min_height,
            max_height,
        })
    }

    /// Sample at grid position `(x, y)`, row-major.
    pub fn sample(&self, x: usize, y: usize) -> f32 {
        self.samples[y * self.width as usize + x]
    }
}
