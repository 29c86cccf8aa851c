//! Multi-octave fractal noise over a flat raster.

use serde::{Deserialize, Serialize};
use simdnoise::NoiseBuilder;

/// Configuration for multi-octave fractal noise generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FractalNoiseConfig {
    /// Number of noise octaves.
    pub octaves: u8,
    /// Base frequency in cycles per pixel.
    pub frequency: f32,
    /// Frequency multiplier per octave (typically 2.0).
    pub lacunarity: f32,
    /// Amplitude decay per octave (0.4-0.6 typical).
    pub persistence: f32,
    /// Random seed for reproducible generation.
    pub seed: i32,
}

impl Default for FractalNoiseConfig {
    fn default() -> Self {
        Self {
            octaves: 4,
            frequency: 0.05,
            lacunarity: 2.0,
            persistence: 0.5,
            seed: 42,
        }
    }
}

impl FractalNoiseConfig {
    /// Creates a new noise configuration with the given seed.
    pub fn with_seed(seed: i32) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }

    /// Broken, high-frequency relief for airless rock.
    pub fn rugged(seed: i32) -> Self {
        Self {
            octaves: 5,
            frequency: 0.08,
            lacunarity: 2.1,
            persistence: 0.55,
            seed,
        }
    }

    /// Gentle relief for worlds shaped by water.
    pub fn smooth(seed: i32) -> Self {
        Self {
            octaves: 3,
            frequency: 0.03,
            lacunarity: 2.0,
            persistence: 0.4,
            seed,
        }
    }
}

/// Generates a `width * height` field of fractal noise in row-major order.
///
/// Each octave is a full gradient-noise field with its own seed; octaves
/// are summed with decaying amplitude and the result is normalised by the
/// amplitude sum.
///
/// # Returns
/// Values in approximately [-1, 1]
pub fn fractal_field(width: usize, height: usize, config: &FractalNoiseConfig) -> Vec<f32> {
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let mut total = vec![0.0f32; width * height];
    let mut amplitude = 1.0f32;
    let mut frequency = config.frequency;
    let mut max_amplitude = 0.0f32;

    for octave in 0..config.octaves.max(1) {
        let octave_seed = config.seed.wrapping_add(octave as i32 * 31337);
        let (layer, min, max) = NoiseBuilder::gradient_2d(width, height)
            .with_seed(octave_seed)
            .with_freq(frequency)
            .generate();

        // simdnoise output is not normalised; stretch each octave to [-1, 1].
        let range = max - min;
        for (t, v) in total.iter_mut().zip(layer) {
            let unit = if range > f32::EPSILON {
                (v - min) / range * 2.0 - 1.0
            } else {
                0.0
            };
            *t += unit * amplitude;
        }

        max_amplitude += amplitude;
        amplitude *= config.persistence;
        frequency *= config.lacunarity;
    }

    for t in &mut total {
        *t /= max_amplitude;
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FractalNoiseConfig::default();
        assert_eq!(config.octaves, 4);
        assert_eq!(config.lacunarity, 2.0);
        assert_eq!(config.persistence, 0.5);
    }

    #[test]
    fn test_noise_reproducibility() {
        let config = FractalNoiseConfig::with_seed(12345);
        let a = fractal_field(32, 16, &config);
        let b = fractal_field(32, 16, &config);
        assert_eq!(a, b, "Same seed should produce the same field");
    }

    #[test]
    fn test_noise_range() {
        let field = fractal_field(64, 32, &FractalNoiseConfig::rugged(7));
        assert_eq!(field.len(), 64 * 32);
        for v in field {
            assert!((-1.0..=1.0).contains(&v), "noise value {} out of range", v);
        }
    }

    #[test]
    fn test_empty_field() {
        assert!(fractal_field(0, 10, &FractalNoiseConfig::default()).is_empty());
    }
}
