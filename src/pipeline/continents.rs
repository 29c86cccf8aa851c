//! Continent seeding and growth on the coarse geodesic grid.

use crate::geometry::{GeodesicGrid, Neighbor, TileCoord, ROWS};
use crate::random::RandomSource;
use crate::terrain::{Cell, CellGrid, Surface, TerrainConfig, TerrainState, TileKind};

use super::stage::{GenerationStage, PipelineError, StageId};

/// Marks roughly one tile in `seed_one_in` as raised land.
pub struct SeedStage;

impl GenerationStage for SeedStage {
    fn id(&self) -> StageId {
        StageId::Seed
    }

    fn name(&self) -> &str {
        "Continent Seeding"
    }

    fn advances_to(&self) -> TerrainState {
        TerrainState::Seeded
    }

    fn execute(
        &self,
        surface: &mut Surface,
        config: &TerrainConfig,
        rng: &mut dyn RandomSource,
    ) -> Result<(), PipelineError> {
        let baseline = if config.baseline_water {
            TileKind::Sea
        } else {
            TileKind::Base
        };
        surface.coarse = CellGrid::new(Cell::new(baseline, 0));
        let one_in = config.seed_one_in.max(1);

        let grid = GeodesicGrid;
        let mut seeds = 0;
        for tile in grid.tiles() {
            let cell = surface.coarse.get_mut(tile)?;
            if config.polar_ice && (tile.row == 0 || tile.row == ROWS - 1) {
                cell.kind = TileKind::Ice;
                continue;
            }
            if config.seed_rows.contains(&tile.row) && rng.die(one_in) == 1 {
                *cell = Cell::new(TileKind::Land, 1);
                seeds += 1;
            }
        }
        log::debug!("seeded {} continent tiles", seeds);
        Ok(())
    }
}

/// Grows raised tiles outwards by a biased random walk.
///
/// Every pass works from a snapshot of the raised tiles, so tiles raised
/// during a pass do not spread again until the next one.
pub struct GrowStage;

fn is_raised(kind: TileKind) -> bool {
    matches!(kind, TileKind::Land | TileKind::Mountains)
}

impl GenerationStage for GrowStage {
    fn id(&self) -> StageId {
        StageId::Grow
    }

    fn name(&self) -> &str {
        "Continent Growth"
    }

    fn dependencies(&self) -> &[StageId] {
        &[StageId::Seed]
    }

    fn advances_to(&self) -> TerrainState {
        TerrainState::Grown
    }

    fn execute(
        &self,
        surface: &mut Surface,
        config: &TerrainConfig,
        rng: &mut dyn RandomSource,
    ) -> Result<(), PipelineError> {
        let grid = GeodesicGrid;
        for _ in 0..config.grow_passes {
            let raised: Vec<TileCoord> = surface
                .coarse
                .iter()
                .filter(|(_, c)| is_raised(c.kind))
                .map(|(t, _)| t)
                .collect();

            for tile in raised {
                let edge = match rng.die(config.grow_die) {
                    1 => Neighbor::West,
                    2 => Neighbor::East,
                    3 => Neighbor::Vertical,
                    _ => continue,
                };
                let target = grid.neighbor(tile.x, tile.row, edge)?;
                let cell = surface.coarse.get_mut(target)?;
                if cell.kind == TileKind::Ice {
                    continue;
                }
                cell.kind = TileKind::Land;
                cell.height += 1;
            }
        }
        Ok(())
    }
}
