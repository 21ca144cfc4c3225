//! Scene container and the recursive shading algorithm.
//!
//! Intersection is a linear scan over every shape. Shading is Phong-style:
//! an ambient term, diffuse and specular terms when the point sees the
//! light, and a bounded-depth mirror reflection.

use log::trace;

use crate::ray::Ray;
use crate::shape::Shape;
use crate::vector::{self, Color, Point, WHITE};

/// Ambient fraction used when the scene description gives none.
pub const DEFAULT_AMBIENT: f64 = 0.2;
/// Specular intensity used when the scene description gives none.
pub const DEFAULT_SPECULAR: f64 = 0.5;
/// Specular exponent used when the scene description gives none.
pub const DEFAULT_SPECULAR_POWER: f64 = 8.0;
/// Reflection depth limit used when the scene description gives none.
pub const DEFAULT_MAX_REFLECTIONS: u32 = 6;
/// Sky blue.
pub const DEFAULT_BACKGROUND: Color = Color::new(135.0, 206.0, 235.0);

/// Surfaces whose reflectivity is at or below this are not worth a
/// reflection ray.
const MIN_REFLECTIVITY: f64 = 0.003;

/// Nearest surface struck by a ray.
#[derive(Debug, Clone, Copy)]
pub struct Hit<'a> {
    /// The shape that was hit
    pub shape: &'a Shape,
    /// Parametric distance along the ray, always strictly positive
    pub distance: f64,
}

/// Counters gathered while shading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraceStats {
    /// Primary and reflection rays shaded
    pub rays: u64,
    /// Shadow rays cast toward the light
    pub shadow_rays: u64,
    /// Deepest reflection level reached
    pub deepest: u32,
}

/// A point light, a camera, shading parameters and the shapes they light.
///
/// Built once and only read while rendering.
#[derive(Debug, Clone)]
pub struct Scene {
    /// Color returned for rays that hit nothing
    pub background: Color,
    /// Position of the single point light
    pub light: Point,
    /// Position primary rays are cast away from
    pub camera: Point,
    /// Ambient fraction in `[0, 1]`
    pub ambient: f64,
    /// Specular highlight intensity
    pub specular: f64,
    /// Specular highlight exponent
    pub specular_power: f64,
    /// Maximum number of nested mirror reflections
    pub max_reflections: u32,
    /// Every surface in the scene, in description order
    pub shapes: Vec<Shape>,
}

impl Scene {
    /// Create an empty scene with default shading parameters.
    pub fn new(camera: Point, light: Point) -> Self {
        Self {
            background: DEFAULT_BACKGROUND,
            light,
            camera,
            ambient: DEFAULT_AMBIENT,
            specular: DEFAULT_SPECULAR,
            specular_power: DEFAULT_SPECULAR_POWER,
            max_reflections: DEFAULT_MAX_REFLECTIONS,
            shapes: Vec::new(),
        }
    }

    /// Add a shape to the scene.
    pub fn add(&mut self, shape: impl Into<Shape>) {
        self.shapes.push(shape.into());
    }

    /// Find the shape with the smallest strictly positive distance along `r`.
    ///
    /// Distances `<= 0` count as misses regardless of what the shape
    /// reported. On an exact tie the earlier shape wins.
    pub fn nearest_intersection(&self, r: &Ray) -> Option<Hit<'_>> {
        let mut nearest: Option<Hit<'_>> = None;

        for shape in &self.shapes {
            let Some(distance) = shape.collision_distance(r) else {
                continue;
            };
            if distance <= 0.0 {
                continue;
            }
            if nearest.map_or(true, |hit| distance < hit.distance) {
                nearest = Some(Hit { shape, distance });
            }
        }

        nearest
    }

    /// Whether anything lies between `p` and the light.
    ///
    /// Any hit along the ray counts, including shapes beyond the light.
    pub fn in_shadow(&self, p: Point) -> bool {
        self.nearest_intersection(&Ray::offset(p, self.light - p)).is_some()
    }

    /// Color seen along `r`, where `depth` is the current reflection level.
    ///
    /// The result is linear and unclamped.
    pub fn ray_color(&self, r: &Ray, depth: u32) -> Color {
        let mut stats = TraceStats::default();
        self.ray_color_with_stats(r, depth, &mut stats)
    }

    /// [`Scene::ray_color`], recording ray counts into `stats`.
    pub fn ray_color_with_stats(&self, r: &Ray, depth: u32, stats: &mut TraceStats) -> Color {
        stats.rays += 1;
        stats.deepest = stats.deepest.max(depth);

        let Some(hit) = self.nearest_intersection(r) else {
            return self.background;
        };

        let p = r.at(hit.distance);
        let refl = hit.shape.reflectivity();
        let surface = hit.shape.color_at(p);
        let normal = hit.shape.normal_at(p).normalize();
        let view = (-r.direction).normalize();

        let amb = self.ambient * (1.0 - refl);
        let mut lighting = amb * surface;

        stats.shadow_rays += 1;
        if !self.in_shadow(p) {
            let light_dir = (self.light - p).normalize();
            let diffuse = (1.0 - amb) * (1.0 - refl) * normal.dot(light_dir).max(0.0);
            lighting += diffuse * surface;

            let half = (light_dir + view).normalize();
            let highlight = half.dot(normal).max(0.0).powf(self.specular_power);
            lighting += self.specular * highlight * WHITE;
        }

        if depth < self.max_reflections && refl > MIN_REFLECTIVITY {
            let bounce = Ray::offset(p, vector::reflect(view, normal));
            trace!("reflecting off {} at depth {}", hit.shape.kind(), depth);
            let reflected = self.ray_color_with_stats(&bounce, depth + 1, stats);
            lighting += (1.0 - amb) * refl * reflected;
        }

        lighting
    }

    /// Color seen at image-plane point `p`, looking away from the camera.
    pub fn point_color(&self, p: Point) -> Color {
        self.ray_color(&Ray::new(p, p - self.camera), 0)
    }

    /// [`Scene::point_color`], recording ray counts into `stats`.
    pub fn point_color_with_stats(&self, p: Point, stats: &mut TraceStats) -> Color {
        self.ray_color_with_stats(&Ray::new(p, p - self.camera), 0, stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plane::Plane;
    use crate::sphere::Sphere;
    use crate::vector::Vector3;

    fn assert_close(actual: Color, expected: Color) {
        assert!(
            (actual - expected).abs().max_element() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    fn lit_sphere_scene() -> Scene {
        let mut scene = Scene::new(Point::new(0.0, 0.0, -20.0), Point::new(0.0, 0.0, -10.0));
        scene.add(Sphere::new(Point::ZERO, 1.0, Color::new(100.0, 50.0, 0.0), 0.0));
        scene
    }

    #[test]
    fn test_miss_returns_background_at_any_depth() {
        let mut scene = Scene::new(Point::ZERO, Point::new(0.0, 5.0, 0.0));
        scene.add(Sphere::new(Point::new(0.0, 0.0, -5.0), 1.0, Color::ONE, 0.5));
        scene.add(Plane::new(Point::new(0.0, 0.0, -10.0), Vector3::Z, Color::ONE, 0.5));

        let r = Ray::new(Point::ZERO, Vector3::new(0.0, 0.3, 1.0));
        for depth in 0..=8 {
            assert_eq!(scene.ray_color(&r, depth), scene.background);
        }

        let empty = Scene::new(Point::ZERO, Point::ONE);
        assert_eq!(empty.ray_color(&r, 0), DEFAULT_BACKGROUND);
    }

    #[test]
    fn test_nearest_intersection_picks_smallest_positive() {
        let mut scene = Scene::new(Point::ZERO, Point::ONE);
        scene.add(Sphere::new(Point::new(0.0, 0.0, 10.0), 1.0, Color::ONE, 0.0));
        scene.add(Sphere::new(Point::new(0.0, 0.0, 4.0), 1.0, Color::ONE, 0.0));
        scene.add(Sphere::new(Point::new(0.0, 0.0, 7.0), 2.0, Color::ONE, 0.0));
        // Behind the origin: the plane reports a negative distance.
        scene.add(Plane::new(Point::new(0.0, 0.0, -1.0), Vector3::Z, Color::ONE, 0.0));

        let r = Ray::new(Point::ZERO, Vector3::Z);
        let hit = scene.nearest_intersection(&r).unwrap();
        assert!((hit.distance - 3.0).abs() < 1e-12);
        assert!(std::ptr::eq(hit.shape, &scene.shapes[1]));
    }

    #[test]
    fn test_nearest_intersection_tie_resolves_to_a_shape() {
        let mut scene = Scene::new(Point::ZERO, Point::ONE);
        scene.add(Sphere::new(Point::new(0.0, 0.0, 4.0), 1.0, Color::ONE, 0.0));
        scene.add(Sphere::new(Point::new(0.0, 0.0, 4.0), 1.0, Color::ZERO, 0.0));

        let hit = scene.nearest_intersection(&Ray::new(Point::ZERO, Vector3::Z)).unwrap();
        assert!((hit.distance - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_nearest_intersection_none() {
        let mut scene = Scene::new(Point::ZERO, Point::ONE);
        scene.add(Plane::new(Point::new(0.0, 0.0, -1.0), Vector3::Z, Color::ONE, 0.0));
        assert!(scene.nearest_intersection(&Ray::new(Point::ZERO, Vector3::Z)).is_none());
    }

    #[test]
    fn test_in_shadow() {
        let mut scene = Scene::new(Point::ZERO, Point::new(0.0, 10.0, 0.0));
        assert!(!scene.in_shadow(Point::ZERO));

        scene.add(Sphere::new(Point::new(0.0, 5.0, 0.0), 1.0, Color::ONE, 0.0));
        assert!(scene.in_shadow(Point::ZERO));
        assert!(!scene.in_shadow(Point::new(5.0, 0.0, 0.0)));
    }

    #[test]
    fn test_occluder_beyond_light_still_shadows() {
        let mut scene = Scene::new(Point::ZERO, Point::new(0.0, 2.0, 0.0));
        scene.add(Sphere::new(Point::new(0.0, 50.0, 0.0), 1.0, Color::ONE, 0.0));
        assert!(scene.in_shadow(Point::ZERO));
    }

    #[test]
    fn test_lit_diffuse_and_specular() {
        let scene = lit_sphere_scene();
        let r = Ray::new(Point::new(0.0, 0.0, -5.0), Vector3::Z);
        // Normal, light and view all point straight back along -z.
        let expected = 0.2 * Color::new(100.0, 50.0, 0.0)
            + 0.8 * Color::new(100.0, 50.0, 0.0)
            + 0.5 * WHITE;
        assert_close(scene.ray_color(&r, 0), expected);
    }

    #[test]
    fn test_shadowed_point_gets_ambient_only() {
        let mut scene = lit_sphere_scene();
        scene.add(Sphere::new(Point::new(0.0, 0.0, -7.0), 0.5, Color::ZERO, 0.0));
        let r = Ray::new(Point::new(0.0, 0.0, -5.0), Vector3::Z);
        assert_close(scene.ray_color(&r, 0), Color::new(20.0, 10.0, 0.0));
    }

    #[test]
    fn test_reflection_adds_background() {
        let mut scene = Scene::new(Point::new(0.0, 0.0, 20.0), Point::new(0.0, 0.0, 10.0));
        scene.add(Plane::new(Point::ZERO, Vector3::Z, Color::ZERO, 0.5));
        let r = Ray::new(Point::new(0.0, 0.0, 5.0), -Vector3::Z);

        // amb = 0.2 * (1 - 0.5) = 0.1; reflection weight = 0.9 * 0.5
        let expected = 0.5 * WHITE + 0.45 * scene.background;
        assert_close(scene.ray_color(&r, 0), expected);

        scene.max_reflections = 0;
        assert_close(scene.ray_color(&r, 0), 0.5 * WHITE);
    }

    #[test]
    fn test_low_reflectivity_does_not_recurse() {
        let mut scene = Scene::new(Point::new(0.0, 0.0, 20.0), Point::new(0.0, 0.0, 10.0));
        scene.add(Plane::new(Point::ZERO, Vector3::Z, Color::ZERO, 0.002));
        let mut stats = TraceStats::default();
        let r = Ray::new(Point::new(0.0, 0.0, 5.0), -Vector3::Z);
        scene.ray_color_with_stats(&r, 0, &mut stats);
        assert_eq!(stats.rays, 1);
        assert_eq!(stats.deepest, 0);
    }

    #[test]
    fn test_reflection_depth_is_bounded() {
        // Two facing mirrors bounce a vertical ray forever without a limit.
        let mut scene = Scene::new(Point::new(0.0, 0.0, 20.0), Point::new(3.0, 0.0, 5.0));
        scene.add(Plane::new(Point::ZERO, Vector3::Z, Color::ONE, 1.0));
        scene.add(Plane::new(Point::new(0.0, 0.0, 10.0), -Vector3::Z, Color::ONE, 1.0));
        let r = Ray::new(Point::new(0.0, 0.0, 5.0), -Vector3::Z);

        for max in [0, 1, 3, 6, 12] {
            scene.max_reflections = max;
            let mut stats = TraceStats::default();
            let c = scene.ray_color_with_stats(&r, 0, &mut stats);
            assert!(c.is_finite());
            assert_eq!(stats.deepest, max);
            assert_eq!(stats.rays, u64::from(max) + 1);
        }
    }

    #[test]
    fn test_point_color_casts_from_camera() {
        let scene = lit_sphere_scene();
        let p = Point::new(0.0, 0.0, -5.0);
        let direct = scene.ray_color(&Ray::new(p, Vector3::new(0.0, 0.0, 15.0)), 0);
        assert_close(scene.point_color(p), direct);
    }
}
