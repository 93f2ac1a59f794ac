//! Random helpers for sub-pixel jitter.

use prism_math::Vec2;
use rand::{Rng, RngCore};

/// Uniform f32 in [0, 1).
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen::<f32>()
}

/// Sample a random offset in the unit square [0, 1) x [0, 1).
///
/// Added to a pixel's integer coordinates, this lands anywhere in the cell
/// that starts at the pixel center.
pub fn sample_square(rng: &mut dyn RngCore) -> Vec2 {
    Vec2::new(gen_f32(rng), gen_f32(rng))
}
