//! `.ZMD` skeleton decoding
//!
//! A skeleton is a topologically ordered bone list: every bone's parent
//! precedes it in the stream, bone 0 is the root and its stored parent
//! field is ignored. `ZMD0003` appends a dummy-point section (attachment
//! points for effects and equipment) that also carries rotations; `ZMD0002`
//! dummies are position-only.
//!
//! Positions and rotations are kept in the source axis convention here;
//! conversion happens in the skeleton builder.

use std::path::Path;

use glam::{Quat, Vec3};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::io::BinaryCursor;

const MAGIC_PREFIX: &str = "ZMD";
const MAGIC_LEN: usize = 7;

/// One bone record in stream order.
#[derive(Debug, Clone, Serialize)]
pub struct BoneRecord {
    /// Stream index of the parent bone. Ignored for bone 0.
    pub parent: u32,
    pub name: String,
    /// Local position in source axis convention.
    pub position: Vec3,
    /// Local rotation in source axis convention.
    pub rotation: Quat,
}

/// A named attachment point hanging off a bone.
#[derive(Debug, Clone, Serialize)]
pub struct DummyPoint {
    pub name: String,
    pub parent: u32,
    pub position: Vec3,
    /// Identity for `ZMD0002`, which stores no dummy rotations.
    pub rotation: Quat,
}

/// A decoded skeleton definition.
#[derive(Debug, Clone, Serialize)]
pub struct SkeletonFile {
    pub identifier: String,
    pub version: u32,
    pub bones: Vec<BoneRecord>,
    pub dummies: Vec<DummyPoint>,
    /// Non-fatal decode notes, e.g. best-effort version fallback.
    pub warnings: Vec<String>,
}

impl SkeletonFile {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = super::read_file(path)?;
        Self::from_bytes(&data)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut cursor = BinaryCursor::new(data);
        Self::read(&mut cursor)
    }

    pub fn read(cursor: &mut BinaryCursor<'_>) -> Result<Self> {
        let identifier = cursor.read_fixed_string(MAGIC_LEN)?;
        if !identifier.starts_with(MAGIC_PREFIX) {
            return Err(Error::InvalidMagic {
                expected: "ZMD0002/ZMD0003",
                found: identifier,
            });
        }

        let mut warnings = Vec::new();
        let version = match identifier.as_str() {
            "ZMD0002" => 2,
            "ZMD0003" => 3,
            other => {
                // Best-effort: decode with the nearest known layout.
                let parsed = other[MAGIC_PREFIX.len()..].parse::<u32>().unwrap_or(3);
                let nearest = if parsed <= 2 { 2 } else { 3 };
                tracing::warn!(identifier = other, nearest, "unsupported skeleton version");
                warnings.push(format!(
                    "unsupported skeleton version {other}, decoding as ZMD000{nearest}"
                ));
                nearest
            }
        };

        let bone_count = cursor.read_u32()?;
        let mut bones = Vec::with_capacity(bone_count as usize);
        for _ in 0..bone_count {
            let parent = cursor.read_u32()?;
            let name = cursor.read_cstring()?;
            let position = cursor.read_vec3()?;
            let rotation = cursor.read_quat_wxyz()?;
            bones.push(BoneRecord {
                parent,
                name,
                position,
                rotation,
            });
        }

        // Some tool-exported files end at the bone list.
        let dummies = if cursor.remaining() > 0 {
            let dummy_count = cursor.read_u32()?;
            let mut dummies = Vec::with_capacity(dummy_count as usize);
            for _ in 0..dummy_count {
                let name = cursor.read_cstring()?;
                let parent = cursor.read_u32()?;
                let position = cursor.read_vec3()?;
                let rotation = if version >= 3 {
                    cursor.read_quat_wxyz()?
                } else {
                    Quat::IDENTITY
                };
                dummies.push(DummyPoint {
                    name,
                    parent,
                    position,
                    rotation,
                });
            }
            dummies
        } else {
            Vec::new()
        };

        tracing::debug!(
            bones = bones.len(),
            dummies = dummies.len(),
            version,
            "decoded skeleton"
        );

        Ok(Self {
            identifier,
            version,
            bones,
            dummies,
            warnings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::BinaryWriter;

    fn write_bone(writer: &mut BinaryWriter, parent: u32, name: &str, position: Vec3) {
        writer.write_u32(parent);
        writer.write_cstring(name);
        writer.write_vec3(position);
        writer.write_quat_wxyz(Quat::IDENTITY);
    }

    pub(crate) fn skeleton_bytes(identifier: &str) -> Vec<u8> {
        let mut writer = BinaryWriter::new();
        writer.write_bytes(identifier.as_bytes());
        writer.write_u32(3);
        write_bone(&mut writer, 0, "b1_root", Vec3::ZERO);
        write_bone(&mut writer, 0, "b2_pelvis", Vec3::new(0.0, 0.0, 8.2));
        write_bone(&mut writer, 1, "b3_spine", Vec3::new(0.0, 0.5, 4.1));
        // One dummy point
        writer.write_u32(1);
        writer.write_cstring("p_weapon");
        writer.write_u32(2);
        writer.write_vec3(Vec3::new(1.0, 0.0, 0.0));
        writer.write_quat_wxyz(Quat::IDENTITY);
        writer.into_bytes()
    }

    #[test]
    fn test_skeleton_decode() {
        let zmd = SkeletonFile::from_bytes(&skeleton_bytes("ZMD0003")).unwrap();
        assert_eq!(zmd.version, 3);
        assert_eq!(zmd.bones.len(), 3);
        assert_eq!(zmd.bones[0].name, "b1_root");
        assert_eq!(zmd.bones[2].parent, 1);
        assert_eq!(zmd.dummies.len(), 1);
        assert_eq!(zmd.dummies[0].name, "p_weapon");
        assert!(zmd.warnings.is_empty());
    }

    #[test]
    fn test_skeleton_invalid_magic() {
        let err = SkeletonFile::from_bytes(&skeleton_bytes("ZMS0003")).unwrap_err();
        assert!(matches!(err, crate::Error::InvalidMagic { .. }));
    }

    #[test]
    fn test_skeleton_version_fallback_warns() {
        let zmd = SkeletonFile::from_bytes(&skeleton_bytes("ZMD0004")).unwrap();
        assert_eq!(zmd.version, 3);
        assert_eq!(zmd.bones.len(), 3);
        assert_eq!(zmd.warnings.len(), 1);
    }

    #[test]
    fn test_skeleton_without_dummy_section() {
        let mut writer = BinaryWriter::new();
        writer.write_bytes(b"ZMD0003");
        writer.write_u32(1);
        write_bone(&mut writer, 0, "b1_root", Vec3::ZERO);

        let zmd = SkeletonFile::from_bytes(&writer.into_bytes()).unwrap();
        assert_eq!(zmd.bones.len(), 1);
        assert!(zmd.dummies.is_empty());
    }
}
