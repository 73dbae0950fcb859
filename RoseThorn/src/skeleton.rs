//! Skeleton reconstruction
//!
//! Converts decoded bone records into a parent-indexed hierarchy with
//! converted rest-pose transforms. Bones arrive topologically sorted
//! (parents strictly before children); that ordering is validated here, not
//! trusted.

use glam::{Mat4, Quat, Vec3};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::formats::zmd::SkeletonFile;
use crate::transform::{convert_position, convert_rotation};

/// One bone with target-convention rest pose.
#[derive(Debug, Clone, Serialize)]
pub struct Bone {
    pub name: String,
    /// Index of the parent bone; `None` for the root.
    pub parent: Option<usize>,
    /// Local position, relative to the parent.
    pub position: Vec3,
    /// Local rotation, relative to the parent.
    pub rotation: Quat,
    /// Local rest transform; composition over the hierarchy is the
    /// consumer's job.
    pub rest_transform: Mat4,
}

/// A named attachment point parented to a bone.
#[derive(Debug, Clone, Serialize)]
pub struct Attachment {
    pub name: String,
    pub parent: usize,
    pub position: Vec3,
    pub rotation: Quat,
}

/// An ordered bone hierarchy ready for the host.
#[derive(Debug, Clone, Serialize)]
pub struct Skeleton {
    pub bones: Vec<Bone>,
    pub attachments: Vec<Attachment>,
}

impl Skeleton {
    /// Build the hierarchy from a decoded skeleton file.
    ///
    /// Bone 0 is the root regardless of its stored parent field. Every
    /// later bone must reference an earlier one; a forward or self
    /// reference is a [`Error::MalformedSkeleton`].
    pub fn from_file(file: &SkeletonFile) -> Result<Self> {
        let mut bones = Vec::with_capacity(file.bones.len());
        for (index, record) in file.bones.iter().enumerate() {
            let parent = if index == 0 {
                None
            } else {
                let parent = record.parent as usize;
                if parent >= index {
                    return Err(Error::MalformedSkeleton {
                        bone: index,
                        parent: i64::from(record.parent),
                    });
                }
                Some(parent)
            };

            let position = convert_position(record.position);
            let rotation = convert_rotation(record.rotation);
            bones.push(Bone {
                name: record.name.clone(),
                parent,
                position,
                rotation,
                rest_transform: Mat4::from_rotation_translation(rotation, position),
            });
        }

        let mut attachments = Vec::with_capacity(file.dummies.len());
        for (index, dummy) in file.dummies.iter().enumerate() {
            let parent = dummy.parent as usize;
            if parent >= bones.len() {
                return Err(Error::MalformedSkeleton {
                    bone: bones.len() + index,
                    parent: i64::from(dummy.parent),
                });
            }
            attachments.push(Attachment {
                name: dummy.name.clone(),
                parent,
                position: convert_position(dummy.position),
                rotation: convert_rotation(dummy.rotation),
            });
        }

        tracing::debug!(
            bones = bones.len(),
            attachments = attachments.len(),
            "built skeleton"
        );

        Ok(Self { bones, attachments })
    }

    /// Child indices of `bone`, in stream order.
    pub fn children_of(&self, bone: usize) -> Vec<usize> {
        self.bones
            .iter()
            .enumerate()
            .filter(|(_, b)| b.parent == Some(bone))
            .map(|(i, _)| i)
            .collect()
    }
}
