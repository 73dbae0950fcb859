//! Little-endian binary I/O for ROSE asset files
//!
//! Every ROSE format is little-endian. [`BinaryCursor`] is the sequential
//! reader all decoders consume; [`BinaryWriter`] is its encode-side mirror,
//! used by the mesh writer and by tests to synthesize fixtures.

mod cursor;
mod writer;

pub use cursor::BinaryCursor;
pub use writer::BinaryWriter;
