//! ChromaTrace ray tracer
//!
//! Renders spheres and (optionally checkered) planes lit by a single point
//! light, with ambient, diffuse, specular, shadow and bounded mirror
//! reflection terms. Scenes are read from JSON and written as 8-bit
//! lossless images.

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod vector;
pub mod ray;
pub mod sphere;
pub mod plane;
pub mod shape;
pub mod scene;
pub mod scene_file;
pub mod random;
pub mod sampler;
pub mod output;

pub use error::{Result, TraceError};
pub use scene::Scene;
pub use scene_file::{load_scene, parse_scene, SceneDescription};
pub use sampler::Sampler;
