//! Immutable configuration for terrain synthesis.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::noise::FractalNoiseConfig;

use super::archetype::{PlanetArchetype, TerrainStrategy};

/// Errors raised while building a terrain configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TerrainError {
    #[error("Final hydrographics {end}% must not exceed initial {start}%")]
    InvertedHydrographics { start: u32, end: u32 },
}

/// Water cover at the world's wettest point and today, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hydrographics {
    pub start: u32,
    pub end: u32,
}

/// Crater carving parameters.
///
/// Radii are in pixels at a tile size of 16 and are scaled with the
/// actual tile size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CraterConfig {
    pub count: u32,
    pub min_size: u32,
    pub max_size: u32,
    /// Depression at the crater centre.
    pub depth: i32,
}

/// Configuration for the terrain passes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerrainConfig {
    /// Pixels along each side of a coarse tile's raster block.
    pub tile_size: usize,
    /// Seeding chance is one in this many tiles.
    pub seed_one_in: u32,
    /// Rows eligible for continent seeds.
    pub seed_rows: RangeInclusive<usize>,
    /// Paint the two polar rows as ice.
    pub polar_ice: bool,
    /// Baseline of unseeded tiles is sea rather than bare rock.
    pub baseline_water: bool,
    pub grow_passes: u32,
    /// Die rolled per raised tile when growing: 1 west, 2 east, 3 vertical.
    pub grow_die: u32,
    /// Multiplier from coarse tile height to raster height.
    pub height_scale: i32,
    pub noise: FractalNoiseConfig,
    /// Peak noise contribution to raster heights.
    pub noise_amplitude: f32,
    /// Number of percentile buckets used by altitude normalisation.
    pub buckets: usize,
    /// Land at or above this altitude becomes mountains.
    pub mountain_altitude: i32,
    pub hydrographics: Option<Hydrographics>,
    pub craters: Option<CraterConfig>,
    /// Pixel rows per cloud band.
    pub band_height: usize,
    pub blur_passes: u32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            tile_size: 16,
            seed_one_in: 20,
            seed_rows: 0..=11,
            polar_ice: false,
            baseline_water: false,
            grow_passes: 4,
            grow_die: 3,
            height_scale: 10,
            noise: FractalNoiseConfig::default(),
            noise_amplitude: 6.0,
            buckets: 20,
            mountain_altitude: 90,
            hydrographics: None,
            craters: None,
            band_height: 8,
            blur_passes: 8,
        }
    }
}

impl TerrainConfig {
    /// Airless rock with heavy cratering.
    pub fn barren() -> Self {
        Self {
            noise: FractalNoiseConfig::rugged(17),
            craters: Some(CraterConfig {
                count: 40,
                min_size: 6,
                max_size: 20,
                depth: 30,
            }),
            ..Default::default()
        }
    }

    /// A world that once held seas covering `start`% and now `end`%.
    ///
    /// Values are clamped to 0..=100.
    ///
    /// # Returns
    /// An error if `end` exceeds `start`
    pub fn wet(start: u32, end: u32) -> Result<Self, TerrainError> {
        let mut config = Self {
            noise: FractalNoiseConfig::smooth(23),
            craters: Some(CraterConfig {
                count: 12,
                min_size: 6,
                max_size: 16,
                depth: 20,
            }),
            ..Default::default()
        };
        config.set_hydrographics(start, end)?;
        Ok(config)
    }

    /// Earth-like: equatorial continents, ice caps and a sea baseline.
    pub fn gaian(hydrographics: u32) -> Self {
        let hydrographics = hydrographics.min(100);
        Self {
            seed_rows: 4..=7,
            polar_ice: true,
            baseline_water: true,
            grow_passes: 5,
            grow_die: 4,
            noise: FractalNoiseConfig::smooth(31),
            hydrographics: Some(Hydrographics {
                start: hydrographics,
                end: hydrographics,
            }),
            ..Default::default()
        }
    }

    /// Banded gas giant.
    pub fn jovian() -> Self {
        Self {
            grow_passes: 0,
            noise_amplitude: 0.0,
            ..Default::default()
        }
    }

    /// Scattered rubble with a few impact scars.
    pub fn belt() -> Self {
        Self {
            seed_one_in: 3,
            grow_passes: 0,
            noise: FractalNoiseConfig::rugged(5),
            noise_amplitude: 12.0,
            craters: Some(CraterConfig {
                count: 6,
                min_size: 3,
                max_size: 8,
                depth: 10,
            }),
            ..Default::default()
        }
    }

    /// Preset for an archetype.
    pub fn for_archetype(archetype: PlanetArchetype) -> Self {
        match archetype {
            PlanetArchetype::Arean => Self::wet(30, 5).unwrap_or_else(|_| Self::barren()),
            PlanetArchetype::MesoArean => Self::wet(60, 20).unwrap_or_else(|_| Self::barren()),
            PlanetArchetype::Gaian => Self::gaian(70),
            PlanetArchetype::Cytherean => Self {
                craters: None,
                noise: FractalNoiseConfig::smooth(11),
                ..Self::barren()
            },
            PlanetArchetype::Europan => Self {
                craters: Some(CraterConfig {
                    count: 8,
                    min_size: 4,
                    max_size: 10,
                    depth: 8,
                }),
                ..Self::barren()
            },
            _ => match archetype.strategy() {
                TerrainStrategy::Barren | TerrainStrategy::Wet => Self::barren(),
                TerrainStrategy::Gaian => Self::gaian(70),
                TerrainStrategy::Jovian => Self::jovian(),
                TerrainStrategy::Belt => Self::belt(),
            },
        }
    }

    /// Sets the hydrographics at the world's wettest point and today.
    ///
    /// Both values are clamped to 0..=100. Fails without touching the
    /// configuration if `end` exceeds `start`.
    pub fn set_hydrographics(&mut self, start: u32, end: u32) -> Result<(), TerrainError> {
        let (start, end) = (start.min(100), end.min(100));
        if end > start {
            return Err(TerrainError::InvertedHydrographics { start, end });
        }
        self.hydrographics = Some(Hydrographics { start, end });
        Ok(())
    }

    /// Returns a copy with a different raster tile size.
    pub fn with_tile_size(mut self, tile_size: usize) -> Self {
        self.tile_size = tile_size.max(1);
        self
    }

    /// Crater radius in pixels for a nominal size.
    pub fn scaled_radius(&self, size: u32) -> usize {
        ((size as usize * self.tile_size) / 16).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TerrainConfig::default();
        assert_eq!(config.tile_size, 16);
        assert_eq!(config.seed_one_in, 20);
        assert_eq!(config.buckets, 20);
        assert!(config.hydrographics.is_none());
    }

    #[test]
    fn test_set_hydrographics_clamps() {
        let mut config = TerrainConfig::default();
        config.set_hydrographics(150, 120).unwrap();
        assert_eq!(config.hydrographics, Some(Hydrographics { start: 100, end: 100 }));
    }

    #[test]
    fn test_set_hydrographics_rejects_inverted_range() {
        let mut config = TerrainConfig::gaian(50);
        let err = config.set_hydrographics(10, 70).unwrap_err();
        assert_eq!(err, TerrainError::InvertedHydrographics { start: 10, end: 70 });
        // Unchanged after the failure.
        assert_eq!(config.hydrographics, Some(Hydrographics { start: 50, end: 50 }));
    }

    #[test]
    fn test_presets_match_strategy() {
        assert!(TerrainConfig::for_archetype(PlanetArchetype::Hermian).craters.is_some());
        assert!(TerrainConfig::for_archetype(PlanetArchetype::Gaian).polar_ice);
        assert_eq!(TerrainConfig::for_archetype(PlanetArchetype::EuJovian).grow_passes, 0);
        let arean = TerrainConfig::for_archetype(PlanetArchetype::Arean);
        assert_eq!(arean.hydrographics, Some(Hydrographics { start: 30, end: 5 }));
    }

    #[test]
    fn test_scaled_radius() {
        let config = TerrainConfig::default().with_tile_size(8);
        assert_eq!(config.scaled_radius(10), 5);
        assert_eq!(config.scaled_radius(0), 1);
    }
}
