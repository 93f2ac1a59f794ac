//! Core ray casting renderer.
//!
//! Implements:
//! - Normal-visualization shading with a sky gradient background
//! - Anti-aliasing via multi-sampling
//! - A single-threaded reference render loop

use crate::{sample_square, Camera, Hittable, Ray, DEFAULT_BUCKET_SIZE};
use prism_math::{Interval, Vec2, Vec3};
use rand::RngCore;

/// Color type alias (linear RGB, no gamma)
pub type Color = Vec3;

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Samples per pixel for anti-aliasing (must be at least 1)
    pub samples_per_pixel: u32,
    /// Tile edge length used by the bucket renderer
    pub bucket_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples_per_pixel: 50,
            bucket_size: DEFAULT_BUCKET_SIZE,
        }
    }
}

/// Compute the color seen by a ray.
///
/// Surfaces are colored by their normal mapped from [-1, 1] to [0, 1];
/// rays that hit nothing get the sky gradient.
pub fn ray_color(ray: &Ray, world: &dyn Hittable) -> Color {
    match world.hit(ray, Interval::new(0.0, f32::INFINITY)) {
        Some(rec) => 0.5 * (rec.normal + Color::ONE),
        None => sky_gradient(ray),
    }
}

/// Compute sky gradient background.
///
/// A zero-length direction has no elevation and gets the gradient midpoint.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().try_normalize().unwrap_or(Vec3::ZERO);
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    white * (1.0 - a) + blue * a
}

/// Render a single pixel with multi-sampling.
///
/// With one sample per pixel the ray goes through the exact pixel center
/// and `rng` is never touched. Panics if `samples_per_pixel` is zero.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    assert!(
        config.samples_per_pixel >= 1,
        "samples_per_pixel must be at least 1"
    );

    if config.samples_per_pixel == 1 {
        return ray_color(&camera.get_ray(x, y, Vec2::ZERO), world);
    }

    let mut pixel_color = Color::ZERO;
    for _ in 0..config.samples_per_pixel {
        let ray = camera.get_ray(x, y, sample_square(rng));
        pixel_color += ray_color(&ray, world);
    }

    // Average the samples
    pixel_color / config.samples_per_pixel as f32
}

/// Row-major buffer of linear colors.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// Convert to packed 8-bit RGB bytes.
    pub fn to_rgb(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for color in &self.pixels {
            bytes.extend_from_slice(&crate::color_to_rgb(*color));
        }
        bytes
    }
}

/// Render the entire scene to an image buffer.
///
/// Single-threaded, row by row. Each pixel is finished before the next one
/// starts. See [`crate::render_buckets`] for the parallel path.
pub fn render(
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> ImageBuffer {
    let mut image = ImageBuffer::new(camera.image_width(), camera.image_height());
    log::info!(
        "Rendering {}x{} @ {} spp",
        image.width,
        image.height,
        config.samples_per_pixel
    );

    for y in 0..camera.image_height() {
        for x in 0..camera.image_width() {
            let color = render_pixel(camera, world, x, y, config, rng);
            image.set(x, y, color);
        }
    }

    image
}
