//! Decoders for the ROSE Online binary asset formats
//!
//! One module per format:
//!
//! - **HIM** - terrain heightmap grid
//! - **TIL** - terrain tile index grid
//! - **IFO** - object placement metadata
//! - **ZMD** - skeleton definition
//! - **ZMS** - static/skinned mesh geometry
//!
//! Each decoder is a pure pass over a [`BinaryCursor`]; the `from_path`
//! helpers read the whole file and parse, so no file handle outlives a
//! decode call.
//!
//! [`BinaryCursor`]: crate::io::BinaryCursor

pub mod him;
pub mod ifo;
pub mod til;
pub mod zmd;
pub mod zms;

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Read a whole file, mapping open/read failures to [`Error::UnreadableFile`].
pub(crate) fn read_file<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    let path = path.as_ref();
    fs::read(path).map_err(|source| Error::UnreadableFile {
        path: path.to_path_buf(),
        source,
    })
}
