//! Noise generation for terrain relief.
//!
//! Uses simdnoise for SIMD-accelerated gradient noise.

mod fractal;

pub use fractal::{fractal_field, FractalNoiseConfig};
