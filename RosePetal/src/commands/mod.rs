use std::path::PathBuf;

use clap::Subcommand;

pub mod inspect;
pub mod terrain;

#[derive(Subcommand)]
pub enum Commands {
    /// Inspect an asset file and display a summary
    Inspect {
        /// Asset file (.HIM, .TIL, .IFO, .ZMD, or .ZMS)
        path: PathBuf,

        /// Dump the decoded record as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Assemble a zone directory and report chunk/tile statistics
    Terrain {
        /// Zone directory containing <x>_<y>-named chunk files
        path: PathBuf,

        /// Vertices per tile edge
        #[arg(long, default_value_t = 5)]
        tile_size: usize,

        /// World-space edge length of one chunk
        #[arg(long, default_value_t = 160.0)]
        chunk_world_size: f32,
    },

    /// Display the bone hierarchy of a skeleton file
    Skeleton {
        /// Skeleton file (.ZMD)
        path: PathBuf,
    },

    /// Reconstruct a mesh file and report its geometry
    Mesh {
        /// Mesh file (.ZMS)
        path: PathBuf,
    },
}

impl Commands {
    pub fn execute(self) -> anyhow::Result<()> {
        match self {
            Commands::Inspect { path, json } => inspect::inspect(&path, json),
            Commands::Terrain {
                path,
                tile_size,
                chunk_world_size,
            } => terrain::report(&path, tile_size, chunk_world_size),
            Commands::Skeleton { path } => inspect::skeleton_tree(&path),
            Commands::Mesh { path } => inspect::mesh_summary(&path),
        }
    }
}
