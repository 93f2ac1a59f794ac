//! Bucket-based tile rendering.
//!
//! Divides the image into tiles (buckets) that can be rendered
//! independently and in parallel using rayon.

use crate::renderer::render_pixel;
use crate::{Camera, Color, Hittable, ImageBuffer, RenderConfig};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;

/// A rectangular tile of the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// X coordinate of bucket's top-left corner
    pub x: u32,
    /// Y coordinate of bucket's top-left corner
    pub y: u32,
    /// Width of the bucket in pixels
    pub width: u32,
    /// Height of the bucket in pixels
    pub height: u32,
    /// Row-major position in the tile grid, fixed for a given image and bucket size
    pub tile: usize,
    /// Position in the center-out render order
    pub index: usize,
}

/// Odd 64-bit constant used to spread tile numbers across the seed space.
const SEED_SPREAD: u64 = 0x9E37_79B9_7F4A_7C15;

impl Bucket {
    /// Create a bucket at grid position `tile`; render order starts equal to it.
    pub fn new(x: u32, y: u32, width: u32, height: u32, tile: usize) -> Self {
        Self { x, y, width, height, tile, index: tile }
    }

    /// Get the total number of pixels in this bucket.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }

    /// RNG seed for this bucket's jitter.
    ///
    /// Depends only on the tile position, so reordering buckets or running
    /// them on different threads does not change the image.
    pub fn seed(&self, base: u64) -> u64 {
        base ^ (self.tile as u64 + 1).wrapping_mul(SEED_SPREAD)
    }

    fn distance_sq_to(&self, cx: f32, cy: f32) -> f32 {
        let dx = self.x as f32 + self.width as f32 / 2.0 - cx;
        let dy = self.y as f32 + self.height as f32 / 2.0 - cy;
        dx * dx + dy * dy
    }
}

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 64;

/// Tile the image and order the tiles from the center outward.
///
/// Edge tiles are cropped to the image. Ties in distance keep row-major order.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let size = bucket_size.max(1);
    let columns = width.div_ceil(size);
    let rows = height.div_ceil(size);

    let mut buckets: Vec<Bucket> = (0..rows)
        .flat_map(|row| {
            (0..columns).map(move |col| {
                let x = col * size;
                let y = row * size;
                let tile = (row * columns + col) as usize;
                Bucket::new(x, y, size.min(width - x), size.min(height - y), tile)
            })
        })
        .collect();

    let (cx, cy) = (width as f32 / 2.0, height as f32 / 2.0);
    buckets.sort_by(|a, b| a.distance_sq_to(cx, cy).total_cmp(&b.distance_sq_to(cx, cy)));

    for (order, bucket) in buckets.iter_mut().enumerate() {
        bucket.index = order;
    }

    buckets
}

/// Render a single bucket to a vector of colors.
///
/// Returns pixels in row-major order within the bucket.
pub fn render_bucket(
    bucket: &Bucket,
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Vec<Color> {
    let mut pixels = Vec::with_capacity(bucket.pixel_count() as usize);

    for local_y in 0..bucket.height {
        for local_x in 0..bucket.width {
            let global_x = bucket.x + local_x;
            let global_y = bucket.y + local_y;
            pixels.push(render_pixel(camera, world, global_x, global_y, config, rng));
        }
    }

    pixels
}

/// Result of rendering a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    /// The bucket that was rendered
    pub bucket: Bucket,
    /// Pixel colors in row-major order
    pub pixels: Vec<Color>,
}

impl BucketResult {
    /// Create a new bucket result.
    pub fn new(bucket: Bucket, pixels: Vec<Color>) -> Self {
        Self { bucket, pixels }
    }

    /// Copy this bucket's pixels into their place in the full image.
    pub fn write_into(&self, image: &mut ImageBuffer) {
        let width = self.bucket.width as usize;
        if width == 0 {
            return;
        }
        for (row, chunk) in self.pixels.chunks(width).enumerate() {
            let y = self.bucket.y + row as u32;
            for (col, color) in chunk.iter().enumerate() {
                image.set(self.bucket.x + col as u32, y, *color);
            }
        }
    }
}

/// Render the scene across all cores, one bucket per task.
///
/// The camera and world are only read. Each bucket draws jitter from its
/// own `StdRng` seeded with `seed` and the bucket's grid position, so the
/// output is reproducible for a given seed and bucket size.
pub fn render_buckets(
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
    seed: u64,
) -> ImageBuffer {
    let width = camera.image_width();
    let height = camera.image_height();
    let buckets = generate_buckets(width, height, config.bucket_size);

    log::info!(
        "Rendering {}x{} @ {} spp in {} buckets",
        width,
        height,
        config.samples_per_pixel,
        buckets.len()
    );

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| {
            let mut rng = StdRng::seed_from_u64(bucket.seed(seed));
            let pixels = render_bucket(bucket, camera, world, config, &mut rng);
            log::debug!("Finished bucket {} at ({}, {})", bucket.index, bucket.x, bucket.y);
            BucketResult::new(*bucket, pixels)
        })
        .collect();

    let mut image = ImageBuffer::new(width, height);
    for result in &results {
        result.write_into(&mut image);
    }
    image
}
