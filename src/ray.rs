//! Ray representation for 3D ray tracing.
//!
//! A ray is defined as r(t) = origin + t * direction, representing a semi-infinite
//! line in 3D space used for intersection testing.

use crate::vector::{Point, Vector3};

/// Distance secondary rays are pushed off their surface, in units of the
/// ray's own direction length.
pub const SURFACE_EPSILON: f64 = 1e-6;

/// Ray in 3D space defined by origin and direction.
///
/// Mathematical representation: r(t) = origin + t * direction
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Starting point of the ray in world coordinates.
    ///
    /// Primary rays start on the image plane; shadow and reflection rays
    /// start just off the surface they leave.
    pub origin: Point,

    /// Direction vector of the ray.
    ///
    /// Not required to be normalized. Intersection routines account for its
    /// length where the formula needs it.
    pub direction: Vector3,
}

impl Ray {
    /// Create a new ray with origin and direction.
    pub fn new(origin: Point, direction: Vector3) -> Self {
        Self { origin, direction }
    }

    /// Create a ray leaving a surface point, nudged forward by
    /// [`SURFACE_EPSILON`] so it cannot immediately re-hit that surface.
    pub fn offset(origin: Point, direction: Vector3) -> Self {
        Self::new(origin + SURFACE_EPSILON * direction, direction)
    }

    /// Compute a point at parameter t along the ray.
    ///
    /// Returns r(t) = origin + t * direction.
    pub fn at(&self, t: f64) -> Point {
        self.origin + t * self.direction
    }
}
