//! Scene description loading.
//!
//! A scene is a JSON record:
//!
//! ```json
//! {
//!   "antialias": 4,
//!   "light": [0.5, -0.5, 3.0],
//!   "camera": [0.5, -1.0, 0.5],
//!   "objects": [
//!     { "type": "sphere", "color": [255, 0, 0], "reflectivity": 0.2,
//!       "center": [0.5, 0.5, 0.5], "radius": 0.2 },
//!     { "type": "plane", "color": [255, 255, 255], "reflectivity": 0.0,
//!       "point": [0, 0, 0], "normal": [0, 0, 1], "checkerboard": true,
//!       "color2": [0, 0, 0], "orientation": [1, 0, 0] }
//!   ]
//! }
//! ```
//!
//! The shading parameters `ambient`, `specular`, `specular_power`,
//! `max_reflections` and `background` may also appear at the top level;
//! omitted ones take the defaults from [`crate::scene`].
//!
//! `antialias` must be a JSON integer of at least 1: a float such as `4.0`
//! is a format error rather than being truncated.
//!
//! Any missing or mistyped field, unknown shape type, or degenerate
//! geometry fails the whole load.

use std::path::Path;

use log::{debug, info, warn};
use serde::Deserialize;

use crate::error::{Result, TraceError};
use crate::plane::Plane;
use crate::scene::{
    Scene, DEFAULT_AMBIENT, DEFAULT_BACKGROUND, DEFAULT_MAX_REFLECTIONS, DEFAULT_SPECULAR,
    DEFAULT_SPECULAR_POWER,
};
use crate::shape::Shape;
use crate::sphere::Sphere;
use crate::vector::{self, from_array};

/// Orientation axes closer than this to the plane normal (by |cos|) are
/// treated as parallel.
const PARALLEL_COSINE: f64 = 1.0 - 1e-9;

/// A parsed, validated scene plus its sampling setting.
#[derive(Debug, Clone)]
pub struct SceneDescription {
    /// The scene to render
    pub scene: Scene,
    /// Samples per pixel, at least 1
    pub antialias: u32,
}

#[derive(Deserialize, Debug)]
struct SceneData {
    antialias: u32,
    light: [f64; 3],
    camera: [f64; 3],
    objects: Vec<ShapeData>,
    #[serde(default = "default_ambient")]
    ambient: f64,
    #[serde(default = "default_specular")]
    specular: f64,
    #[serde(default = "default_specular_power")]
    specular_power: f64,
    #[serde(default = "default_max_reflections")]
    max_reflections: u32,
    #[serde(default = "default_background")]
    background: [f64; 3],
}

fn default_ambient() -> f64 {
    DEFAULT_AMBIENT
}

fn default_specular() -> f64 {
    DEFAULT_SPECULAR
}

fn default_specular_power() -> f64 {
    DEFAULT_SPECULAR_POWER
}

fn default_max_reflections() -> u32 {
    DEFAULT_MAX_REFLECTIONS
}

fn default_background() -> [f64; 3] {
    DEFAULT_BACKGROUND.to_array()
}

#[derive(Deserialize, Debug)]
#[serde(tag = "type", rename_all = "lowercase")]
enum ShapeData {
    Sphere {
        color: [f64; 3],
        reflectivity: f64,
        center: [f64; 3],
        radius: f64,
    },
    Plane {
        color: [f64; 3],
        reflectivity: f64,
        point: [f64; 3],
        normal: [f64; 3],
        checkerboard: bool,
        color2: Option<[f64; 3]>,
        orientation: Option<[f64; 3]>,
    },
}

impl ShapeData {
    fn reflectivity(&self) -> f64 {
        match self {
            ShapeData::Sphere { reflectivity, .. } | ShapeData::Plane { reflectivity, .. } => {
                *reflectivity
            }
        }
    }

    fn into_shape(self, index: usize) -> Result<Shape> {
        let refl = self.reflectivity();
        if !refl.is_finite() {
            return Err(TraceError::InvalidScene(format!(
                "object {index}: reflectivity must be finite"
            )));
        }
        if !(0.0..=1.0).contains(&refl) {
            warn!("object {index}: reflectivity {refl} is outside [0, 1]");
        }

        match self {
            ShapeData::Sphere {
                color,
                reflectivity,
                center,
                radius,
            } => {
                if !(radius.is_finite() && radius > 0.0) {
                    return Err(TraceError::InvalidScene(format!(
                        "object {index}: sphere radius must be positive, got {radius}"
                    )));
                }
                Ok(Sphere::new(from_array(center), radius, from_array(color), reflectivity).into())
            }
            ShapeData::Plane {
                color,
                reflectivity,
                point,
                normal,
                checkerboard,
                color2,
                orientation,
            } => {
                let normal = from_array(normal);
                let unit_normal =
                    vector::try_normalize(normal, &format!("object {index}: plane normal"))?;
                let plane = Plane::new(from_array(point), normal, from_array(color), reflectivity);
                if !checkerboard {
                    return Ok(plane.into());
                }

                let (Some(color2), Some(orientation)) = (color2, orientation) else {
                    return Err(TraceError::InvalidScene(format!(
                        "object {index}: checkerboard plane needs both color2 and orientation"
                    )));
                };
                let orientation = from_array(orientation);
                let axis = vector::try_normalize(
                    orientation,
                    &format!("object {index}: plane orientation"),
                )?;
                if axis.dot(unit_normal).abs() > PARALLEL_COSINE {
                    return Err(TraceError::InvalidVector(format!(
                        "object {index}: plane orientation {orientation} is parallel to its normal"
                    )));
                }
                Ok(plane.with_checkerboard(from_array(color2), orientation).into())
            }
        }
    }
}

impl SceneData {
    fn into_description(self) -> Result<SceneDescription> {
        if self.antialias == 0 {
            return Err(TraceError::InvalidScene("antialias must be at least 1".into()));
        }

        let mut scene = Scene::new(from_array(self.camera), from_array(self.light));
        scene.ambient = self.ambient;
        scene.specular = self.specular;
        scene.specular_power = self.specular_power;
        scene.max_reflections = self.max_reflections;
        scene.background = from_array(self.background);

        for (index, data) in self.objects.into_iter().enumerate() {
            let shape = data.into_shape(index)?;
            debug!("object {}: {}", index, shape.kind());
            scene.add(shape);
        }

        Ok(SceneDescription {
            scene,
            antialias: self.antialias,
        })
    }
}

/// Parse and validate a scene description held in memory.
pub fn parse_scene(json: &str) -> Result<SceneDescription> {
    let data: SceneData = serde_json::from_str(json)?;
    data.into_description()
}

/// Read, parse and validate the scene description at `path`.
pub fn load_scene(path: &Path) -> Result<SceneDescription> {
    let json = std::fs::read_to_string(path).map_err(|source| TraceError::SceneRead {
        path: path.to_path_buf(),
        source,
    })?;
    let description = parse_scene(&json)?;
    info!(
        "Loaded {} with {} object(s), antialias {}",
        path.display(),
        description.scene.shapes.len(),
        description.antialias
    );
    Ok(description)
}
