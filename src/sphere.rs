//! Sphere primitive for ray tracing.
//!
//! Ray-sphere intersection solves the full quadratic, so directions of any
//! length are handled without prior normalization.

use crate::ray::Ray;
use crate::vector::{Color, Point, Vector3};

/// Sphere primitive defined by center, radius, color and reflectivity.
#[derive(Debug, Clone)]
pub struct Sphere {
    /// Center point of the sphere in world coordinates.
    pub center: Point,

    /// Radius of the sphere, strictly positive.
    pub radius: f64,

    /// Uniform surface color.
    pub color: Color,

    /// Fraction of the final color taken from mirror reflection.
    pub reflectivity: f64,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Point, radius: f64, color: Color, reflectivity: f64) -> Self {
        Self {
            center,
            radius,
            color,
            reflectivity,
        }
    }

    /// Surface color; spheres are untextured.
    pub fn color_at(&self, _p: Point) -> Color {
        self.color
    }

    /// Outward normal at `p`, unnormalized (length equals the radius for
    /// points on the surface).
    pub fn normal_at(&self, p: Point) -> Vector3 {
        p - self.center
    }

    /// Nearest non-negative distance along `r` at which it meets the sphere.
    ///
    /// Returns `None` when the ray misses, or when both roots lie behind the
    /// origin. A ray starting inside the sphere gets its exit distance.
    pub fn collision_distance(&self, r: &Ray) -> Option<f64> {
        // Vector from sphere center to ray origin
        let oc = r.origin - self.center;

        let a = r.direction.dot(r.direction);
        let b = 2.0 * r.direction.dot(oc);
        let c = oc.dot(oc) - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();
        let near = (-b - sqrtd) / (2.0 * a);
        let far = (-b + sqrtd) / (2.0 * a);

        match (near < 0.0, far < 0.0) {
            (true, true) => None,
            (true, false) => Some(far),
            (false, true) => Some(near),
            (false, false) => Some(near.min(far)),
        }
    }
}
