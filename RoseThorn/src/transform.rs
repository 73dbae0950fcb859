//! Source-to-target axis convention conversion
//!
//! ROSE data is Z-up; the reconstructed scene is Y-up with the opposite
//! handedness. Positions (and direction vectors: normals, tangents) swap
//! the two non-vertical axes. Rotations swap the same axes and negate the
//! scalar component; without the sign flip the axis swap would mirror the
//! rotation. These are applied to every position and rotation read from a
//! decoded record before it reaches a builder - skeleton and mesh must go
//! through the same conversion or they misalign.

use glam::{Quat, Vec3};

/// Map a source-convention position or direction into the target convention.
pub fn convert_position(p: Vec3) -> Vec3 {
    Vec3::new(p.x, p.z, p.y)
}

/// Map a source-convention rotation into the target convention.
pub fn convert_rotation(q: Quat) -> Quat {
    Quat::from_xyzw(q.x, q.z, q.y, -q.w)
}
