//! Prism Renderer - CPU ray casting
//!
//! Casts one primary ray per sample from a pinhole camera, finds the closest
//! surface in the scene, and shades it by its normal. Rays that miss get a
//! white-to-blue sky gradient.

mod hittable;
mod sphere;
mod scene;
mod camera;
mod sampling;
mod renderer;
mod bucket;
mod output;

pub use hittable::{HitRecord, Hittable, Primitive};
pub use sphere::Sphere;
pub use scene::{Scene, SceneError, SceneResult, DEFAULT_SCENE_CAPACITY};
pub use camera::{Camera, ImageFormat};
pub use sampling::{gen_f32, sample_square};
pub use renderer::{RenderConfig, ImageBuffer, Color, render, render_pixel, ray_color, sky_gradient};
pub use bucket::{Bucket, BucketResult, generate_buckets, render_bucket, render_buckets, DEFAULT_BUCKET_SIZE};
pub use output::{OutputError, OutputResult, color_to_rgb, write_ppm, save_image, DEFAULT_OUTPUT_FILE};

/// Re-export Vec3 and common math types from prism_math
pub use prism_math::{Interval, Ray, Vec2, Vec3};
