//! Vector algebra for points, directions and colors.
//!
//! All three roles share `glam::DVec3`. Negation, addition, subtraction,
//! scaling, dot product, magnitude (`length`) and normalization come from
//! glam directly; this module adds projection and mirror reflection.
//!
//! `normalize` and [`project`] divide by a magnitude and produce NaN for a
//! zero vector. On the shading path that is the caller's obligation; scene
//! loading rejects degenerate input up front through [`try_normalize`].

use glam::DVec3;

use crate::error::{Result, TraceError};

/// Free vector in 3D space.
pub type Vector3 = DVec3;

/// Position in 3D space.
pub type Point = DVec3;

/// Linear RGB color, channels conventionally in `[0, 255]`.
///
/// Values outside that range are legal until the final pixel clamp.
pub type Color = DVec3;

/// Pure white at full 8-bit intensity, used for specular highlights.
pub const WHITE: Color = DVec3::new(255.0, 255.0, 255.0);

/// Project `v` onto `w`: `(v·w / w·w) * w`.
///
/// Undefined (NaN) when `w` is the zero vector.
#[inline]
pub fn project(v: Vector3, w: Vector3) -> Vector3 {
    v.dot(w) / w.dot(w) * w
}

/// Mirror `v` about the axis `n`.
///
/// Both vectors point away from the surface; the result is `v` reflected
/// through the line spanned by `n`.
#[inline]
pub fn reflect(v: Vector3, n: Vector3) -> Vector3 {
    v + 2.0 * (project(v, n) - v)
}

/// Normalize `v`, failing instead of producing NaN for a degenerate vector.
pub fn try_normalize(v: Vector3, what: &str) -> Result<Vector3> {
    let len = v.length();
    if !len.is_finite() || len < 1e-12 {
        return Err(TraceError::InvalidVector(format!(
            "{what} must be a finite non-zero vector, got {v}"
        )));
    }
    Ok(v / len)
}

/// Build a vector from a `[x, y, z]` triple.
#[inline]
pub fn from_array(a: [f64; 3]) -> Vector3 {
    DVec3::from_array(a)
}
