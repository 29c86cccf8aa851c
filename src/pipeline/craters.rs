//! Impact craters.

use crate::random::RandomSource;
use crate::terrain::{Surface, TerrainConfig, TerrainState, TileKind};

use super::stage::{split_fine, GenerationStage, PipelineError, StageId};

/// Carves circular depressions with a linear falloff from the centre.
///
/// Centres lie in the middle half of the map. Pixels whose new floor lies
/// below the recorded sea level fill with water; the rest become crater
/// floor. Heights never drop below zero.
pub struct CraterStage;

impl GenerationStage for CraterStage {
    fn id(&self) -> StageId {
        StageId::Craters
    }

    fn name(&self) -> &str {
        "Craters"
    }

    fn dependencies(&self) -> &[StageId] {
        &[StageId::Normalize]
    }

    fn advances_to(&self) -> TerrainState {
        TerrainState::Cratered
    }

    fn execute(
        &self,
        surface: &mut Surface,
        config: &TerrainConfig,
        rng: &mut dyn RandomSource,
    ) -> Result<(), PipelineError> {
        let Some(craters) = config.craters else {
            return Ok(());
        };
        let sea_level = surface.sea_level;
        let (palette, map) = split_fine(surface, self.name())?;
        let height = map.height();
        let spread = craters.max_size.saturating_sub(craters.min_size) as usize + 1;

        for _ in 0..craters.count {
            let cy = rng.roll_zero(height / 2) + height / 4;
            let (start, end) = map.span(cy);
            let cx = start + rng.roll_zero(end - start);
            let r = config.scaled_radius(craters.min_size + rng.roll_zero(spread) as u32);

            for y in cy.saturating_sub(r)..=(cy + r).min(height - 1) {
                for x in cx.saturating_sub(r)..=cx + r {
                    let d = ((x as f64 - cx as f64).powi(2) + (y as f64 - cy as f64).powi(2)).sqrt();
                    if d >= r as f64 {
                        continue;
                    }
                    let Some(cell) = map.get_mut(x, y) else {
                        continue;
                    };
                    let drop = (craters.depth as f64 * (1.0 - d / r as f64)).round() as i32;
                    cell.height = (cell.height - drop).max(0);
                    if palette.is_water(cell.kind) {
                        continue;
                    }
                    cell.kind = match sea_level {
                        Some(level) if cell.height < level => TileKind::CraterLake,
                        _ => TileKind::Crater,
                    };
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::Dice;
    use crate::terrain::{Cell, CraterConfig, PlanetArchetype, SurfaceMap};
    use proptest::prelude::*;

    fn cratered(count: u32, depth: i32, fill: Cell, sea_level: Option<i32>, seed: u64) -> Surface {
        let mut surface = Surface::new(PlanetArchetype::Hermian);
        surface.fine = Some(SurfaceMap::new(4, fill));
        surface.sea_level = sea_level;
        let config = TerrainConfig {
            craters: Some(CraterConfig {
                count,
                min_size: 8,
                max_size: 24,
                depth,
            }),
            ..TerrainConfig::default().with_tile_size(4)
        };
        CraterStage
            .execute(&mut surface, &config, &mut Dice::seeded(seed))
            .unwrap();
        surface
    }

    #[test]
    fn test_craters_lower_ground() {
        let surface = cratered(10, 20, Cell::new(TileKind::Land, 50), None, 4);
        let map = surface.fine.as_ref().unwrap();
        assert!(map.min_height() < 50);
        assert!(map.count(|c| c.kind == TileKind::Crater) > 0);
        assert_eq!(map.count(|c| c.kind == TileKind::CraterLake), 0);
    }

    #[test]
    fn test_floors_below_sea_level_flood() {
        let surface = cratered(5, 40, Cell::new(TileKind::Land, 30), Some(20), 6);
        let map = surface.fine.as_ref().unwrap();
        assert!(map.count(|c| c.kind == TileKind::CraterLake) > 0);
        for (_, _, c) in map.iter() {
            if c.kind == TileKind::CraterLake {
                assert!(c.height < 20);
            }
        }
    }

    #[test]
    fn test_craters_stay_in_middle_rows() {
        let surface = cratered(20, 10, Cell::new(TileKind::Land, 50), None, 11);
        let map = surface.fine.as_ref().unwrap();
        // Radii reach 6 pixels at this tile size, centres stay within rows 12..36.
        for (_, y, c) in map.iter() {
            if c.kind == TileKind::Crater {
                assert!((6..42).contains(&y), "crater pixel on row {}", y);
            }
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]
        #[test]
        fn prop_heights_never_negative(seed in any::<u64>(), depth in 1i32..200, base in 0i32..30) {
            let surface = cratered(15, depth, Cell::new(TileKind::Land, base), Some(10), seed);
            prop_assert!(surface.fine.as_ref().unwrap().min_height() >= 0);
        }
    }
}
