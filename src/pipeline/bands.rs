//! Cloud bands for gas giants.

use crate::random::RandomSource;
use crate::terrain::{Surface, TerrainConfig, TerrainState, TileKind};

use super::stage::{split_fine, GenerationStage, PipelineError, StageId};

/// Paints every pixel with a band picked by its latitude.
pub struct BandStage;

impl GenerationStage for BandStage {
    fn id(&self) -> StageId {
        StageId::Bands
    }

    fn name(&self) -> &str {
        "Cloud Bands"
    }

    fn dependencies(&self) -> &[StageId] {
        &[StageId::Upscale]
    }

    fn advances_to(&self) -> TerrainState {
        TerrainState::Normalized
    }

    fn execute(
        &self,
        surface: &mut Surface,
        config: &TerrainConfig,
        _rng: &mut dyn RandomSource,
    ) -> Result<(), PipelineError> {
        let (palette, map) = split_fine(surface, self.name())?;
        let bands = palette.bands.len().max(1);
        let band_height = config.band_height.max(1);
        let width = map.width();

        for (y, row) in map.cells_mut().chunks_mut(width).enumerate() {
            let kind = TileKind::Band(((y / band_height) % bands) as u8);
            for cell in row.iter_mut().flatten() {
                cell.kind = kind;
            }
        }
        Ok(())
    }
}

/// Softens band edges: each pass, every pixel may copy the band of the
/// pixel to its north, south, west or east.
pub struct BlurStage;

impl GenerationStage for BlurStage {
    fn id(&self) -> StageId {
        StageId::Blur
    }

    fn name(&self) -> &str {
        "Band Blur"
    }

    fn dependencies(&self) -> &[StageId] {
        &[StageId::Bands]
    }

    fn advances_to(&self) -> TerrainState {
        TerrainState::Normalized
    }

    fn execute(
        &self,
        surface: &mut Surface,
        config: &TerrainConfig,
        rng: &mut dyn RandomSource,
    ) -> Result<(), PipelineError> {
        let (_, map) = split_fine(surface, self.name())?;

        for _ in 0..config.blur_passes {
            let snapshot = map.clone();
            for (x, y, _) in snapshot.iter() {
                let (start, end) = snapshot.span(y);
                let source = match rng.die(8) {
                    1 if y > 0 => (x, y - 1),
                    2 => (x, y + 1),
                    3 => (if x == start { end - 1 } else { x - 1 }, y),
                    4 => (if x + 1 == end { start } else { x + 1 }, y),
                    _ => continue,
                };
                let Some(kind) = snapshot.get(source.0, source.1).map(|c| c.kind) else {
                    continue;
                };
                if let Some(cell) = map.get_mut(x, y) {
                    cell.kind = kind;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{Dice, Scripted};
    use crate::terrain::{Cell, PlanetArchetype, SurfaceMap};

    fn banded(tile_size: usize) -> Surface {
        let mut surface = Surface::new(PlanetArchetype::SubJovian);
        surface.fine = Some(SurfaceMap::new(tile_size, Cell::new(TileKind::Base, 0)));
        surface
    }

    #[test]
    fn test_bands_follow_latitude() {
        let mut surface = banded(4);
        let config = TerrainConfig {
            band_height: 3,
            ..TerrainConfig::jovian()
        };
        BandStage
            .execute(&mut surface, &config, &mut Dice::seeded(0))
            .unwrap();
        // SubJovian has four bands.
        for (_, y, c) in surface.fine.as_ref().unwrap().iter() {
            assert_eq!(c.kind, TileKind::Band(((y / 3) % 4) as u8));
        }
    }

    #[test]
    fn test_blur_copies_north() {
        let mut surface = banded(2);
        let config = TerrainConfig {
            band_height: 1,
            blur_passes: 1,
            ..TerrainConfig::jovian()
        };
        BandStage
            .execute(&mut surface, &config, &mut Dice::seeded(0))
            .unwrap();
        // Every die shows 1: each pixel copies the one above, where there is one.
        BlurStage
            .execute(&mut surface, &config, &mut Scripted::new(&[1]))
            .unwrap();

        let map = surface.fine.as_ref().unwrap();
        for (x, y, c) in map.iter() {
            if map.in_bounds(x, y.wrapping_sub(1)) {
                assert_eq!(c.kind, TileKind::Band(((y - 1) % 4) as u8));
            } else {
                assert_eq!(c.kind, TileKind::Band((y % 4) as u8));
            }
        }
    }

    #[test]
    fn test_blur_keeps_band_set() {
        let mut surface = banded(4);
        let config = TerrainConfig::jovian();
        BandStage
            .execute(&mut surface, &config, &mut Dice::seeded(1))
            .unwrap();
        BlurStage
            .execute(&mut surface, &config, &mut Dice::seeded(1))
            .unwrap();
        for (_, _, c) in surface.fine.as_ref().unwrap().iter() {
            assert!(matches!(c.kind, TileKind::Band(i) if i < 4));
        }
    }
}
