//! Vector helpers shared by every simulation component
//!
//! Vectors are `glam::Vec3` values: they live on the stack and are copied,
//! so hot-path functions take and return them by value instead of reusing
//! heap scratch buffers. Gameplay happens on the XZ ground plane; Y is height.

use glam::Vec3;

/// Squared lengths below this are treated as a zero vector
pub const EPSILON_SQ: f32 = 1e-12;

/// Drop the height component, keeping the ground-plane part of `v`
#[inline]
pub fn planar(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

/// Unit vector from `from` toward `to` on the ground plane.
///
/// Returns `None` when the two points coincide on the plane, so callers
/// never normalize a zero vector.
#[inline]
pub fn planar_direction(from: Vec3, to: Vec3) -> Option<Vec3> {
    let delta = planar(to - from);
    if delta.length_squared() <= EPSILON_SQ {
        None
    } else {
        Some(delta.normalize())
    }
}

/// Whether two points are strictly closer than `radius`.
///
/// Compares squared distances so the hot collision loops skip the sqrt.
#[inline]
pub fn within_radius(a: Vec3, b: Vec3, radius: f32) -> bool {
    a.distance_squared(b) < radius * radius
}

/// Heading angle (radians) of a ground-plane direction, measured from +X toward +Z
#[inline]
pub fn heading(dir: Vec3) -> f32 {
    dir.z.atan2(dir.x)
}
