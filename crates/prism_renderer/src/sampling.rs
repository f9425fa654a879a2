//! Random sampling helpers.
//!
//! Every random draw goes through an explicit generator handed down by the
//! caller; nothing here holds global state.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// Uniform float in `[0, 1)`.
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen::<f32>()
}

/// Uniform float in `[-1, 1)`.
#[inline]
pub fn gen_signed(rng: &mut dyn RngCore) -> f32 {
    gen_f32(rng) * 2.0 - 1.0
}

/// Generator for one pixel.
///
/// The stream depends only on the render seed and the row-major pixel
/// index, so output does not change with thread count or bucket order.
pub fn pixel_rng(seed: u64, pixel_index: u64) -> StdRng {
    StdRng::seed_from_u64(seed ^ pixel_index.wrapping_mul(0x9E37_79B9_7F4A_7C15))
}
