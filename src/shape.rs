//! Closed set of renderable surfaces.
//!
//! The shading code needs exactly four things from a surface: its
//! reflectivity, its color at a point, its normal at a point, and how far
//! along a ray it lies. [`Shape`] dispatches those to the concrete
//! primitive.

use crate::plane::Plane;
use crate::ray::Ray;
use crate::sphere::Sphere;
use crate::vector::{Color, Point, Vector3};

/// A surface in the scene.
#[derive(Debug, Clone)]
pub enum Shape {
    /// Solid sphere.
    Sphere(Sphere),
    /// Infinite plane, optionally checkered.
    Plane(Plane),
}

impl Shape {
    /// Fraction of the color contributed by mirror reflection, nominally
    /// in `[0, 1]`.
    pub fn reflectivity(&self) -> f64 {
        match self {
            Shape::Sphere(s) => s.reflectivity,
            Shape::Plane(p) => p.reflectivity,
        }
    }

    /// Surface color at `p`.
    pub fn color_at(&self, p: Point) -> Color {
        match self {
            Shape::Sphere(s) => s.color_at(p),
            Shape::Plane(pl) => pl.color_at(p),
        }
    }

    /// Surface normal at `p`. Not normalized; callers normalize.
    pub fn normal_at(&self, p: Point) -> Vector3 {
        match self {
            Shape::Sphere(s) => s.normal_at(p),
            Shape::Plane(pl) => pl.normal_at(p),
        }
    }

    /// Parametric distance along `r` to this surface, `None` for no hit.
    ///
    /// Spheres only report non-negative distances. Planes report the raw
    /// signed distance, so callers must filter for positivity themselves.
    pub fn collision_distance(&self, r: &Ray) -> Option<f64> {
        match self {
            Shape::Sphere(s) => s.collision_distance(r),
            Shape::Plane(p) => p.collision_distance(r),
        }
    }

    /// Short name for log output.
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Sphere(_) => "sphere",
            Shape::Plane(_) => "plane",
        }
    }
}

impl From<Sphere> for Shape {
    fn from(s: Sphere) -> Self {
        Shape::Sphere(s)
    }
}

impl From<Plane> for Shape {
    fn from(p: Plane) -> Self {
        Shape::Plane(p)
    }
}
