//! # RoseThorn
//!
//! A pure-Rust library for decoding ROSE Online client assets and
//! reconstructing them into renderable scene data.
//!
//! ## Supported Formats
//!
//! - **HIM** - terrain heightmap grids
//! - **TIL** - terrain tile index grids
//! - **IFO** - object placement metadata
//! - **ZMD** - skeleton definitions
//! - **ZMS** - static and skinned mesh geometry
//!
//! ## Quick Start
//!
//! ### Assembling a zone
//!
//! ```no_run
//! use rosethorn::terrain::{TerrainSettings, assemble_terrain};
//!
//! // Discover, decode, and re-tile every chunk of a zone directory
//! let terrain = assemble_terrain("3DDATA/MAPS/JUNON/JPT01", &TerrainSettings::default())?;
//! println!("{} chunks", terrain.chunks.len());
//! # Ok::<(), rosethorn::Error>(())
//! ```
//!
//! ### Importing a skinned mesh
//!
//! ```no_run
//! use rosethorn::formats::zms::MeshFile;
//! use rosethorn::mesh::build_mesh;
//!
//! let zms = MeshFile::from_path("HEADBAD01.ZMS")?;
//! let geometry = build_mesh(&zms);
//! println!("{} vertices, skinned: {}", geometry.vertex_count(), geometry.is_skinned());
//! # Ok::<(), rosethorn::Error>(())
//! ```
//!
//! ### Using the Prelude
//!
//! ```
//! use rosethorn::prelude::*;
//! ```
//!
//! Decoding is synchronous and side-effect-free apart from file reads;
//! every chunk pipeline is independent, so callers are free to fan decodes
//! out over their own task pool.

pub mod error;
pub mod formats;
pub mod io;
pub mod mesh;
pub mod scene;
pub mod skeleton;
pub mod terrain;
pub mod transform;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::formats::him::HeightmapFile;
    pub use crate::formats::ifo::{MapDataFile, ObjectPlacement};
    pub use crate::formats::til::TileFile;
    pub use crate::formats::zmd::SkeletonFile;
    pub use crate::formats::zms::{MeshFile, MeshVertex, VertexFormat};
    pub use crate::io::{BinaryCursor, BinaryWriter};
    pub use crate::mesh::{GeometryBuilder, Material, MeshGeometry, build_mesh, locate_texture};
    pub use crate::scene::{NodeKind, SceneNode, import_mesh, import_skeleton, import_terrain};
    pub use crate::skeleton::{Bone, Skeleton};
    pub use crate::terrain::{
        ChunkCoordinate, ChunkFileKind, ChunkIndex, Terrain, TerrainChunk, TerrainSettings,
        assemble_terrain,
    };
    pub use crate::transform::{convert_position, convert_rotation};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
