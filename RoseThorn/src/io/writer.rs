//! Little-endian byte writer, the encode-side mirror of [`BinaryCursor`]
//!
//! [`BinaryCursor`]: super::BinaryCursor

use glam::{Quat, Vec2, Vec3};

/// Accumulates an asset file into an in-memory buffer.
///
/// Writes are infallible; the buffer grows as needed.
#[derive(Default)]
pub struct BinaryWriter {
    buf: Vec<u8>,
}

impl BinaryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    pub fn write_u8(&mut self, n: u8) {
        self.buf.push(n);
    }

    pub fn write_u16(&mut self, n: u16) {
        self.buf.extend_from_slice(&n.to_le_bytes());
    }

    pub fn write_u32(&mut self, n: u32) {
        self.buf.extend_from_slice(&n.to_le_bytes());
    }

    pub fn write_i16(&mut self, n: i16) {
        self.buf.extend_from_slice(&n.to_le_bytes());
    }

    pub fn write_i32(&mut self, n: i32) {
        self.buf.extend_from_slice(&n.to_le_bytes());
    }

    pub fn write_f32(&mut self, n: f32) {
        self.buf.extend_from_slice(&n.to_le_bytes());
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Write a NUL-terminated string.
    pub fn write_cstring(&mut self, s: &str) {
        self.buf.extend_from_slice(s.as_bytes());
        self.buf.push(0);
    }

    /// Write a string with a u8 length prefix.
    pub fn write_string_u8(&mut self, s: &str) {
        self.write_u8(s.len() as u8);
        self.buf.extend_from_slice(s.as_bytes());
    }

    /// Write a string with a u16 length prefix.
    pub fn write_string_u16(&mut self, s: &str) {
        self.write_u16(s.len() as u16);
        self.buf.extend_from_slice(s.as_bytes());
    }

    pub fn write_vec2(&mut self, v: Vec2) {
        self.write_f32(v.x);
        self.write_f32(v.y);
    }

    pub fn write_vec3(&mut self, v: Vec3) {
        self.write_f32(v.x);
        self.write_f32(v.y);
        self.write_f32(v.z);
    }

    /// Write a quaternion scalar-first (w, x, y, z), the ROSE layout.
    pub fn write_quat_wxyz(&mut self, q: Quat) {
        self.write_f32(q.w);
        self.write_f32(q.x);
        self.write_f32(q.y);
        self.write_f32(q.z);
    }
}
