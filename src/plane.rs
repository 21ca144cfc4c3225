//! Infinite plane primitive with an optional checkerboard texture.

use crate::ray::Ray;
use crate::vector::{self, Color, Point, Vector3};

/// Below this `|dir · normal|` a ray is treated as parallel to the plane.
const PARALLEL_EPSILON: f64 = 1e-6;

/// Two-color checker pattern laid out on a plane.
#[derive(Debug, Clone)]
pub struct Checkerboard {
    /// Color of cells whose index sum is even.
    pub color: Color,
    /// In-plane axis along which the first cell coordinate is measured.
    pub orientation: Vector3,
}

/// Infinite plane through `point` with the given normal.
#[derive(Debug, Clone)]
pub struct Plane {
    /// Any point on the plane; also the checkerboard origin.
    pub point: Point,
    /// Plane normal, stored as given.
    pub normal: Vector3,
    /// Base surface color.
    pub color: Color,
    /// Fraction of the final color taken from mirror reflection.
    pub reflectivity: f64,
    /// Checker texture, `None` for a plain plane.
    pub checkerboard: Option<Checkerboard>,
}

impl Plane {
    /// Create an untextured plane.
    pub fn new(point: Point, normal: Vector3, color: Color, reflectivity: f64) -> Self {
        Self {
            point,
            normal,
            color,
            reflectivity,
            checkerboard: None,
        }
    }

    /// Add a checkerboard texture to this plane.
    pub fn with_checkerboard(mut self, color: Color, orientation: Vector3) -> Self {
        self.checkerboard = Some(Checkerboard { color, orientation });
        self
    }

    /// Surface color at `p`.
    ///
    /// With a checkerboard, the offset from the anchor point is split into
    /// its component along the orientation axis and the remainder. Each
    /// length is rounded to the nearest integer, and an even sum selects
    /// the checker color.
    pub fn color_at(&self, p: Point) -> Color {
        let Some(checker) = &self.checkerboard else {
            return self.color;
        };

        let offset = p - self.point;
        let along = vector::project(offset, checker.orientation);
        let across = offset - along;

        let ix = (along.length() + 0.5).floor() as i64;
        let iy = (across.length() + 0.5).floor() as i64;
        if (ix + iy) % 2 == 0 {
            checker.color
        } else {
            self.color
        }
    }

    /// The fixed plane normal, unnormalized.
    pub fn normal_at(&self, _p: Point) -> Vector3 {
        self.normal
    }

    /// Signed distance along `r` to the plane.
    ///
    /// Only a parallel ray yields `None`; a plane behind the origin yields a
    /// negative distance, which the scene-level search discards.
    pub fn collision_distance(&self, r: &Ray) -> Option<f64> {
        let angle = r.direction.dot(self.normal);
        if angle.abs() < PARALLEL_EPSILON {
            return None;
        }
        Some(self.normal.dot(self.point - r.origin) / angle)
    }
}
