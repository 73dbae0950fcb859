//! Sequential little-endian byte reader

use std::io::Cursor;

use byteorder::{LittleEndian, ReadBytesExt};
use glam::{Quat, Vec2, Vec3};

use crate::error::{Error, Result};

/// Sequential reader over an in-memory asset file.
///
/// Maintains a monotonic read offset. Seeking is forward-only; the formats
/// that need it (the IFO block table) visit their offsets in ascending
/// order. Strings are decoded lossily because the original files are
/// EUC-KR encoded.
pub struct BinaryCursor<'a> {
    inner: Cursor<&'a [u8]>,
}

impl<'a> BinaryCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            inner: Cursor::new(data),
        }
    }

    /// Current read offset from the start of the stream.
    pub fn position(&self) -> usize {
        self.inner.position() as usize
    }

    /// Bytes left between the read offset and the end of the stream.
    pub fn remaining(&self) -> usize {
        self.inner.get_ref().len().saturating_sub(self.position())
    }

    fn check(&self, needed: usize) -> Result<()> {
        let remaining = self.remaining();
        if remaining < needed {
            return Err(Error::Truncated {
                needed,
                offset: self.position(),
                remaining,
            });
        }
        Ok(())
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        self.check(1)?;
        Ok(self.inner.read_u8()?)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        self.check(2)?;
        Ok(self.inner.read_u16::<LittleEndian>()?)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        self.check(4)?;
        Ok(self.inner.read_u32::<LittleEndian>()?)
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        self.check(2)?;
        Ok(self.inner.read_i16::<LittleEndian>()?)
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        self.check(4)?;
        Ok(self.inner.read_i32::<LittleEndian>()?)
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        self.check(4)?;
        Ok(self.inner.read_f32::<LittleEndian>()?)
    }

    /// Read exactly `n` raw bytes.
    pub fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>> {
        self.check(n)?;
        let start = self.position();
        let bytes = self.inner.get_ref()[start..start + n].to_vec();
        self.inner.set_position((start + n) as u64);
        Ok(bytes)
    }

    /// Read a fixed-size string buffer of `n` bytes, trimmed at the first NUL.
    pub fn read_fixed_string(&mut self, n: usize) -> Result<String> {
        let bytes = self.read_bytes(n)?;
        let len = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
        Ok(String::from_utf8_lossy(&bytes[..len]).into_owned())
    }

    /// Read a NUL-terminated string.
    pub fn read_cstring(&mut self) -> Result<String> {
        let mut bytes = Vec::new();
        loop {
            let b = self.read_u8()?;
            if b == 0 {
                break;
            }
            bytes.push(b);
        }
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Read a string with a u8 length prefix.
    pub fn read_string_u8(&mut self) -> Result<String> {
        let len = self.read_u8()? as usize;
        let bytes = self.read_bytes(len)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Read a string with a u16 length prefix.
    pub fn read_string_u16(&mut self) -> Result<String> {
        let len = self.read_u16()? as usize;
        let bytes = self.read_bytes(len)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    pub fn read_vec2(&mut self) -> Result<Vec2> {
        let x = self.read_f32()?;
        let y = self.read_f32()?;
        Ok(Vec2::new(x, y))
    }

    pub fn read_vec3(&mut self) -> Result<Vec3> {
        let x = self.read_f32()?;
        let y = self.read_f32()?;
        let z = self.read_f32()?;
        Ok(Vec3::new(x, y, z))
    }

    /// Read a quaternion stored scalar-first (w, x, y, z), the ROSE layout.
    pub fn read_quat_wxyz(&mut self) -> Result<Quat> {
        let w = self.read_f32()?;
        let x = self.read_f32()?;
        let y = self.read_f32()?;
        let z = self.read_f32()?;
        Ok(Quat::from_xyzw(x, y, z, w))
    }

    /// Advance the read offset by `n` bytes.
    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.check(n)?;
        self.inner.set_position((self.position() + n) as u64);
        Ok(())
    }

    /// Seek to an absolute offset. Forward-only.
    pub fn seek_to(&mut self, offset: usize) -> Result<()> {
        let position = self.position();
        if offset < position {
            return Err(Error::BackwardSeek {
                target: offset,
                offset: position,
            });
        }
        self.skip(offset - position)
    }
}
