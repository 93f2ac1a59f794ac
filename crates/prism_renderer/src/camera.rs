//! Camera for ray generation.

use crate::Ray;
use prism_math::{Vec2, Vec3};

/// Output image dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageFormat {
    pub aspect_ratio: f32,
    pub width: u32,
    pub height: u32,
}

impl ImageFormat {
    /// Derive the height from a width and aspect ratio (at least one row).
    pub fn from_width(width: u32, aspect_ratio: f32) -> Self {
        let height = ((width as f32 / aspect_ratio) as u32).max(1);
        Self {
            aspect_ratio,
            width,
            height,
        }
    }

    /// Total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

impl Default for ImageFormat {
    fn default() -> Self {
        Self::from_width(400, 16.0 / 9.0)
    }
}

/// Pinhole camera looking down -Z.
///
/// All viewport geometry is derived once in [`Camera::new`]; the `with_*`
/// builders rebuild the whole camera rather than patching derived fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    // Inputs
    format: ImageFormat,
    center: Vec3,
    focal_length: f32,
    viewport_height: f32,

    // Derived
    viewport_width: f32,
    viewport_u: Vec3,
    viewport_v: Vec3,
    pixel_delta_u: Vec3,
    pixel_delta_v: Vec3,
    pixel00_pos: Vec3,
}

impl Camera {
    pub const DEFAULT_FOCAL_LENGTH: f32 = 1.0;
    pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 2.0;

    /// Create a camera at the origin with the default lens.
    pub fn new(format: ImageFormat) -> Self {
        Self::derive(
            format,
            Vec3::ZERO,
            Self::DEFAULT_FOCAL_LENGTH,
            Self::DEFAULT_VIEWPORT_HEIGHT,
        )
    }

    /// Move the eye point.
    pub fn with_center(self, center: Vec3) -> Self {
        Self::derive(self.format, center, self.focal_length, self.viewport_height)
    }

    /// Set lens settings.
    pub fn with_lens(self, focal_length: f32, viewport_height: f32) -> Self {
        Self::derive(self.format, self.center, focal_length, viewport_height)
    }

    /// Change the output resolution.
    pub fn with_format(self, format: ImageFormat) -> Self {
        Self::derive(format, self.center, self.focal_length, self.viewport_height)
    }

    fn derive(format: ImageFormat, center: Vec3, focal_length: f32, viewport_height: f32) -> Self {
        let width = format.width as f32;
        let height = format.height as f32;

        // Real pixel ratio, not the requested aspect
        let viewport_width = viewport_height * (width / height);

        // Row 0 is the top of the image, so v runs down
        let viewport_u = Vec3::new(viewport_width, 0.0, 0.0);
        let viewport_v = Vec3::new(0.0, -viewport_height, 0.0);

        let pixel_delta_u = viewport_u / width;
        let pixel_delta_v = viewport_v / height;

        let viewport_upper_left =
            center - Vec3::new(0.0, 0.0, focal_length) - viewport_u / 2.0 - viewport_v / 2.0;
        let pixel00_pos = viewport_upper_left + 0.5 * (pixel_delta_u + pixel_delta_v);

        Self {
            format,
            center,
            focal_length,
            viewport_height,
            viewport_width,
            viewport_u,
            viewport_v,
            pixel_delta_u,
            pixel_delta_v,
            pixel00_pos,
        }
    }

    /// Generate the ray through pixel (i, j), offset within the pixel cell.
    ///
    /// An offset of `(0, 0)` targets the pixel center. The direction is left
    /// unnormalized.
    pub fn get_ray(&self, i: u32, j: u32, offset: Vec2) -> Ray {
        let pixel_sample = self.pixel00_pos
            + ((i as f32) + offset.x) * self.pixel_delta_u
            + ((j as f32) + offset.y) * self.pixel_delta_v;

        Ray::new(self.center, pixel_sample - self.center)
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn image_width(&self) -> u32 {
        self.format.width
    }

    pub fn image_height(&self) -> u32 {
        self.format.height
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn focal_length(&self) -> f32 {
        self.focal_length
    }

    pub fn viewport_height(&self) -> f32 {
        self.viewport_height
    }

    pub fn viewport_width(&self) -> f32 {
        self.viewport_width
    }

    pub fn viewport_u(&self) -> Vec3 {
        self.viewport_u
    }

    pub fn viewport_v(&self) -> Vec3 {
        self.viewport_v
    }

    pub fn pixel_delta_u(&self) -> Vec3 {
        self.pixel_delta_u
    }

    pub fn pixel_delta_v(&self) -> Vec3 {
        self.pixel_delta_v
    }

    /// World position of the center of pixel (0, 0).
    pub fn pixel00_pos(&self) -> Vec3 {
        self.pixel00_pos
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(ImageFormat::default())
    }
}
