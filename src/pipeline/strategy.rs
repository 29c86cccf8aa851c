//! Assembly of terrain pipelines per strategy.

use crate::random::RandomSource;
use crate::terrain::{PlanetArchetype, Surface, TerrainConfig, TerrainStrategy};

use super::altitude::NormalizeStage;
use super::bands::{BandStage, BlurStage};
use super::continents::{GrowStage, SeedStage};
use super::craters::CraterStage;
use super::hydrate::HydrateStage;
use super::stage::{Pipeline, PipelineError};
use super::upscale::UpscaleStage;

/// Builds the pipeline that realises `strategy` with the given configuration.
pub fn build_pipeline(strategy: TerrainStrategy, config: TerrainConfig) -> Pipeline {
    let mut pipeline = Pipeline::new(config);
    match strategy {
        TerrainStrategy::Barren => {
            pipeline
                .add_stage(SeedStage)
                .add_stage(GrowStage)
                .add_stage(UpscaleStage)
                .add_stage(NormalizeStage)
                .add_stage(CraterStage);
        }
        TerrainStrategy::Wet => {
            pipeline
                .add_stage(SeedStage)
                .add_stage(GrowStage)
                .add_stage(UpscaleStage)
                .add_stage(NormalizeStage)
                .add_stage(HydrateStage)
                .add_stage(CraterStage);
        }
        TerrainStrategy::Gaian => {
            pipeline
                .add_stage(SeedStage)
                .add_stage(GrowStage)
                .add_stage(UpscaleStage)
                .add_stage(NormalizeStage)
                .add_stage(HydrateStage);
        }
        TerrainStrategy::Jovian => {
            pipeline
                .add_stage(UpscaleStage)
                .add_stage(BandStage)
                .add_stage(BlurStage);
        }
        TerrainStrategy::Belt => {
            pipeline
                .add_stage(SeedStage)
                .add_stage(UpscaleStage)
                .add_stage(NormalizeStage)
                .add_stage(CraterStage);
        }
    }
    pipeline
}

/// Synthesises a finished surface for an archetype.
///
/// # Arguments
/// * `archetype` - Selects the strategy and palette
/// * `config` - Terrain configuration, typically `TerrainConfig::for_archetype`
/// * `rng` - Dice for the whole run
pub fn synthesize(
    archetype: PlanetArchetype,
    config: &TerrainConfig,
    rng: &mut dyn RandomSource,
) -> Result<Surface, PipelineError> {
    let pipeline = build_pipeline(archetype.strategy(), config.clone());
    let mut surface = Surface::new(archetype);
    pipeline.run(&mut surface, rng)?;
    Ok(surface)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::Dice;
    use crate::terrain::{TerrainState, TileKind};

    #[test]
    fn test_every_archetype_finishes() {
        for archetype in PlanetArchetype::all() {
            let config = TerrainConfig::for_archetype(archetype).with_tile_size(4);
            let surface = synthesize(archetype, &config, &mut Dice::seeded(77)).unwrap();
            assert_eq!(surface.state, TerrainState::Finished, "{}", archetype);
            assert_eq!(surface.tiles().rows().len(), 12);
        }
    }

    #[test]
    fn test_gaian_dries_from_seventy_to_ten_percent() {
        let tile_size = 8;
        for seed in [1u64, 2, 3] {
            let mut config = TerrainConfig::gaian(70).with_tile_size(tile_size);
            config.set_hydrographics(70, 10).unwrap();
            let surface =
                synthesize(PlanetArchetype::Gaian, &config, &mut Dice::seeded(seed)).unwrap();

            let map = surface.fine.as_ref().unwrap();
            let total = map.in_bounds_count();
            let expected = total / 10;
            let diff = surface.water_count().abs_diff(expected);
            assert!(diff <= tile_size * tile_size, "seed {}: {} water vs {}", seed, surface.water_count(), expected);
            // Most of the old sea floor is still visible.
            assert!(map.count(|c| c.kind == TileKind::Seabed) > total / 2);

            // The stored tiles carry the same coverage: 10% of 320.
            let tiles = surface.tiles();
            assert!(tiles.water_count().abs_diff(32) <= 1, "seed {}: {} water tiles", seed, tiles.water_count());
            assert_eq!(tiles.water_percentage(), 10);
        }
    }

    #[test]
    fn test_gaian_is_deterministic() {
        let config = TerrainConfig::gaian(60).with_tile_size(4);
        let a = synthesize(PlanetArchetype::Gaian, &config, &mut Dice::seeded(12)).unwrap();
        let b = synthesize(PlanetArchetype::Gaian, &config, &mut Dice::seeded(12)).unwrap();
        assert_eq!(a.tiles(), b.tiles());
    }

    #[test]
    fn test_jovian_is_all_bands() {
        let config = TerrainConfig::jovian().with_tile_size(4);
        let surface = synthesize(PlanetArchetype::EuJovian, &config, &mut Dice::seeded(3)).unwrap();
        for (_, cell) in surface.coarse.iter() {
            assert!(matches!(cell.kind, TileKind::Band(_)));
        }
    }

    #[test]
    fn test_barren_world_has_no_water() {
        let config = TerrainConfig::barren().with_tile_size(4);
        let surface = synthesize(PlanetArchetype::Hermian, &config, &mut Dice::seeded(5)).unwrap();
        assert_eq!(surface.water_count(), 0);
        assert!(surface.fine.as_ref().unwrap().min_height() >= 0);
    }
}
