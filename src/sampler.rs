//! Pixel sampler: maps pixels to image-plane points and renders the scene.

use image::{Rgba, RgbaImage};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};

use crate::random::{self, SampleRng};
use crate::scene::{Scene, TraceStats};
use crate::vector::{Color, Point};

/// Output width and height used when none is requested.
pub const DEFAULT_IMAGE_SIZE: u32 = 512;

/// Turns a scene into pixels by jittered multi-sampling.
///
/// The image plane is `y = 0`. Pixel `(x, y)` covers the square starting at
/// `(x / scale, 1 - y / scale)` with `scale` equal to the image width, so
/// row 0 is the top of the image and a square image spans the unit square.
#[derive(Debug, Clone)]
pub struct Sampler {
    /// Rendered image width in pixel count
    pub width: u32,
    /// Rendered image height in pixel count
    pub height: u32,
    /// Number of jittered samples averaged per pixel
    pub antialias: u32,
    /// Generator for sub-pixel jitter
    rng: SampleRng,
}

impl Sampler {
    /// Create a sampler for a `width` x `height` image.
    pub fn new(width: u32, height: u32, antialias: u32, rng: SampleRng) -> Self {
        Self {
            width,
            height,
            antialias: antialias.max(1),
            rng,
        }
    }

    /// Image-plane point for pixel `(x, y)` offset by jitter `(jx, jy)`.
    pub fn sample_point(&self, x: u32, y: u32, jx: f64, jy: f64) -> Point {
        let scale = f64::from(self.width);
        Point::new(
            (f64::from(x) + jx) / scale,
            0.0,
            1.0 - (f64::from(y) + jy) / scale,
        )
    }

    /// Average of `antialias` jittered samples for pixel `(x, y)`.
    pub fn pixel_color(&mut self, scene: &Scene, x: u32, y: u32) -> Color {
        let mut stats = TraceStats::default();
        self.pixel_color_with_stats(scene, x, y, &mut stats)
    }

    fn pixel_color_with_stats(
        &mut self,
        scene: &Scene,
        x: u32,
        y: u32,
        stats: &mut TraceStats,
    ) -> Color {
        let mut pixel_color = Color::ZERO;

        for _sample in 0..self.antialias {
            let (jx, jy) = random::jitter(&mut self.rng);
            let p = self.sample_point(x, y, jx, jy);
            pixel_color += scene.point_color_with_stats(p, stats);
        }

        pixel_color * (1.0 / f64::from(self.antialias))
    }

    /// Render the whole image, top row first.
    pub fn render(&mut self, scene: &Scene) -> RgbaImage {
        let mut image = RgbaImage::new(self.width, self.height);
        let mut stats = TraceStats::default();

        info!(
            "Rendering {}x{} with {} sample(s) per pixel over {} shape(s)",
            self.width,
            self.height,
            self.antialias,
            scene.shapes.len()
        );
        let generation_start = std::time::Instant::now();
        let pb = ProgressBar::new(u64::from(self.height));
        if let Ok(style) =
            ProgressStyle::default_bar().template("{bar:40} {pos}/{len} rows ETA: {eta}")
        {
            pb.set_style(style);
        }

        for y in 0..self.height {
            for x in 0..self.width {
                let color = self.pixel_color_with_stats(scene, x, y, &mut stats);
                image.put_pixel(x, y, to_rgba(color));
            }
            pb.inc(1);
        }

        pb.finish_and_clear();
        info!("Image generated in {:.2?}", generation_start.elapsed());
        debug!(
            "Traced {} rays and {} shadow rays, deepest reflection {}",
            stats.rays, stats.shadow_rays, stats.deepest
        );

        image
    }
}

/// Round one linear channel to the nearest integer and clamp to `[0, 255]`.
pub fn to_channel(v: f64) -> u8 {
    // NaN from a degenerate normal falls through `clamp` unchanged and
    // casts to 0.
    v.round().clamp(0.0, 255.0) as u8
}

/// Convert a linear color to an opaque 8-bit pixel.
pub fn to_rgba(c: Color) -> Rgba<u8> {
    Rgba([to_channel(c.x), to_channel(c.y), to_channel(c.z), 255])
}
