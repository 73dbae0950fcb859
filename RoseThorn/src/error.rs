//! Error types for `RoseThorn`

use std::path::PathBuf;

use thiserror::Error;

use crate::terrain::ChunkFileKind;

/// The error type for `RoseThorn` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A file could not be opened or read from disk.
    #[error("unreadable file {path}: {source}")]
    UnreadableFile {
        /// The path that failed to open or read.
        path: PathBuf,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Directory traversal error.
    #[error("directory walk error: {0}")]
    WalkDir(String),

    // ==================== Binary Cursor Errors ====================
    /// The input stream ended before the requested bytes could be read.
    #[error("truncated input: needed {needed} bytes at offset {offset}, {remaining} remain")]
    Truncated {
        /// Number of bytes the read requested.
        needed: usize,
        /// Read offset at the time of the failure.
        offset: usize,
        /// Number of bytes left in the stream.
        remaining: usize,
    },

    /// A seek target lies behind the current read offset.
    #[error("backward seek to {target} from offset {offset}")]
    BackwardSeek {
        /// The requested absolute offset.
        target: usize,
        /// The current read offset.
        offset: usize,
    },

    // ==================== Format Errors ====================
    /// A file header signature did not match the expected magic.
    #[error("invalid magic: expected {expected}, found {found:?}")]
    InvalidMagic {
        /// The magic prefix the decoder expected.
        expected: &'static str,
        /// What the file actually started with.
        found: String,
    },

    // ==================== Terrain Errors ====================
    /// No chunk coordinates were discovered in the terrain directory.
    #[error("no chunk coordinates found in {path}")]
    EmptyTerrainDirectory {
        /// The scanned directory.
        path: PathBuf,
    },

    /// A terrain chunk is missing one of its required files.
    #[error("chunk ({x}, {y}) is missing its {kind} file")]
    MissingChunkFile {
        /// Raw (un-normalized) chunk x coordinate.
        x: i32,
        /// Raw (un-normalized) chunk y coordinate.
        y: i32,
        /// Which of the three file kinds is absent.
        kind: ChunkFileKind,
    },

    /// Terrain settings failed validation.
    #[error("invalid terrain settings: {message}")]
    InvalidSettings {
        /// Description of the failed validation.
        message: String,
    },

    // ==================== Skeleton Errors ====================
    /// A bone references a parent that does not precede it in stream order.
    #[error("malformed skeleton: bone {bone} has parent index {parent}")]
    MalformedSkeleton {
        /// Index of the offending bone.
        bone: usize,
        /// The parent index it carried.
        parent: i64,
    },

    // ==================== Generic/Fallback Errors ====================
    /// Invalid format error (use specific variants when possible).
    #[error("invalid format: {0}")]
    InvalidFormat(String),
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Error::WalkDir(err.to_string())
    }
}

/// A specialized Result type for `RoseThorn` operations.
pub type Result<T> = std::result::Result<T, Error>;
