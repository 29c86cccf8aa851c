//! Hydrographics: flooding to the wettest extent, then drying back.

use crate::random::RandomSource;
use crate::terrain::{Palette, Surface, SurfaceMap, TerrainConfig, TerrainState, TileKind};

use super::stage::{split_fine, GenerationStage, PipelineError, StageId};

/// Number of pixels that make up `percent` of `total`, rounded to nearest.
fn target_count(total: usize, percent: u32) -> usize {
    (total * percent as usize + 50) / 100
}

fn pixels(map: &SurfaceMap) -> Vec<(usize, usize)> {
    map.iter().map(|(x, y, _)| (x, y)).collect()
}

fn kind_at(map: &SurfaceMap, x: usize, y: usize) -> Option<TileKind> {
    map.get(x, y).map(|c| c.kind)
}

fn set_kind(map: &mut SurfaceMap, x: usize, y: usize, kind: TileKind) {
    if let Some(cell) = map.get_mut(x, y) {
        cell.kind = kind;
    }
}

fn wet_neighbours(map: &SurfaceMap, palette: &Palette, x: usize, y: usize) -> usize {
    map.neighbours(x, y)
        .into_iter()
        .filter(|&(nx, ny)| kind_at(map, nx, ny).is_some_and(|k| palette.is_water(k)))
        .count()
}

fn dry_neighbours(map: &SurfaceMap, palette: &Palette, x: usize, y: usize) -> usize {
    map.neighbours(x, y)
        .into_iter()
        .filter(|&(nx, ny)| kind_at(map, nx, ny).is_some_and(|k| !palette.is_water(k)))
        .count()
}

/// Turns dry pixels into sea until `target` pixels are water.
///
/// A dry pixel floods when a d6 comes up at or under its number of wet
/// neighbours. If a whole pass floods nothing, the lowest dry pixel is
/// flooded so the loop always makes progress.
fn flood(
    map: &mut SurfaceMap,
    palette: &Palette,
    mut water: usize,
    target: usize,
    rng: &mut dyn RandomSource,
) -> usize {
    let all = pixels(map);
    let floodable = |k: TileKind| !palette.is_water(k) && k != TileKind::Ice;

    while water < target {
        let mut changed = false;
        for &(x, y) in &all {
            if water >= target {
                break;
            }
            if !kind_at(map, x, y).is_some_and(floodable) {
                continue;
            }
            let n = wet_neighbours(map, palette, x, y);
            if n > 0 && rng.die(6) <= n as i32 {
                set_kind(map, x, y, TileKind::Sea);
                water += 1;
                changed = true;
            }
        }
        if !changed {
            let lowest = all
                .iter()
                .filter_map(|&(x, y)| map.get(x, y).filter(|c| floodable(c.kind)).map(|c| (c.height, x, y)))
                .min_by_key(|&(h, _, _)| h);
            match lowest {
                Some((_, x, y)) => {
                    set_kind(map, x, y, TileKind::Sea);
                    water += 1;
                }
                None => break,
            }
        }
    }
    water
}

/// Turns sea into land until only `target` pixels are water.
///
/// The mirror of [`flood`]: sea pixels with dry neighbours are raised, and a
/// pass that raises nothing raises the highest sea pixel.
fn drain(
    map: &mut SurfaceMap,
    palette: &Palette,
    mut water: usize,
    target: usize,
    rng: &mut dyn RandomSource,
) -> usize {
    let all = pixels(map);

    while water > target {
        let mut changed = false;
        for &(x, y) in &all {
            if water <= target {
                break;
            }
            if kind_at(map, x, y) != Some(TileKind::Sea) {
                continue;
            }
            let n = dry_neighbours(map, palette, x, y);
            if n > 0 && rng.die(6) <= n as i32 {
                set_kind(map, x, y, TileKind::Land);
                water -= 1;
                changed = true;
            }
        }
        if !changed {
            let highest = all
                .iter()
                .filter_map(|&(x, y)| {
                    map.get(x, y)
                        .filter(|c| c.kind == TileKind::Sea)
                        .map(|c| (c.height, x, y))
                })
                .max_by_key(|&(h, _, _)| h);
            match highest {
                Some((_, x, y)) => {
                    set_kind(map, x, y, TileKind::Land);
                    water -= 1;
                }
                None => break,
            }
        }
    }
    water
}

/// Exposes coastal sea floor as seabed until only `target` pixels are water.
fn expose_seabed(
    map: &mut SurfaceMap,
    palette: &Palette,
    mut water: usize,
    target: usize,
    rng: &mut dyn RandomSource,
) -> usize {
    let all = pixels(map);
    let coastal = |map: &SurfaceMap, x: usize, y: usize| {
        kind_at(map, x, y) == Some(TileKind::Sea) && dry_neighbours(map, palette, x, y) > 0
    };

    while water > target {
        let mut changed = false;
        for &(x, y) in &all {
            if water <= target {
                break;
            }
            if coastal(map, x, y) && rng.die(4) == 1 {
                set_kind(map, x, y, TileKind::Seabed);
                water -= 1;
                changed = true;
            }
        }
        if !changed {
            let next = all
                .iter()
                .copied()
                .find(|&(x, y)| coastal(map, x, y))
                .or_else(|| all.iter().copied().find(|&(x, y)| kind_at(map, x, y) == Some(TileKind::Sea)));
            match next {
                Some((x, y)) => {
                    set_kind(map, x, y, TileKind::Seabed);
                    water -= 1;
                }
                None => break,
            }
        }
    }
    water
}

/// Brings the surface to its initial hydrographics, then dries it to the
/// final figure by exposing seabed along the coasts.
///
/// Water pixel heights are quartered once the seas are at their widest, and
/// the highest remaining water floor is recorded as the sea level. A
/// configuration without hydrographics leaves the surface untouched.
pub struct HydrateStage;

impl GenerationStage for HydrateStage {
    fn id(&self) -> StageId {
        StageId::Hydrate
    }

    fn name(&self) -> &str {
        "Hydrographics"
    }

    fn dependencies(&self) -> &[StageId] {
        &[StageId::Normalize]
    }

    fn advances_to(&self) -> TerrainState {
        TerrainState::Hydrated
    }

    fn execute(
        &self,
        surface: &mut Surface,
        config: &TerrainConfig,
        rng: &mut dyn RandomSource,
    ) -> Result<(), PipelineError> {
        let Some(hydro) = config.hydrographics else {
            return Ok(());
        };
        let (palette, map) = split_fine(surface, self.name())?;
        let total = map.in_bounds_count();
        let mut water = map.count(|c| palette.is_water(c.kind));

        let initial = target_count(total, hydro.start);
        water = if water < initial {
            flood(map, palette, water, initial, rng)
        } else {
            drain(map, palette, water, initial, rng)
        };
        log::debug!("flooded to {} of {} pixels", water, total);

        for cell in map.cells_mut().iter_mut().flatten() {
            if palette.is_water(cell.kind) {
                cell.height /= 4;
            }
        }

        if hydro.end < hydro.start {
            let remaining = target_count(total, hydro.end);
            water = expose_seabed(map, palette, water, remaining, rng);
            log::debug!("dried to {} of {} pixels", water, total);
        }

        let sea_level = map
            .iter()
            .filter(|(_, _, c)| palette.is_water(c.kind))
            .map(|(_, _, c)| c.height)
            .max()
            .unwrap_or(0);
        surface.sea_level = Some(sea_level);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::Dice;
    use crate::terrain::{Cell, Hydrographics, PlanetArchetype};

    fn dry_surface(tile_size: usize) -> Surface {
        let mut surface = Surface::new(PlanetArchetype::Arean);
        let mut map = SurfaceMap::new(tile_size, Cell::new(TileKind::Land, 40));
        let coords = pixels(&map);
        for (i, &(x, y)) in coords.iter().enumerate() {
            map.get_mut(x, y).unwrap().height = 20 + (i % 37) as i32;
        }
        surface.fine = Some(map);
        surface
    }

    fn hydro(start: u32, end: u32) -> TerrainConfig {
        TerrainConfig {
            hydrographics: Some(Hydrographics { start, end }),
            ..TerrainConfig::default()
        }
    }

    #[test]
    fn test_target_count_rounds() {
        assert_eq!(target_count(320, 10), 32);
        assert_eq!(target_count(5, 10), 1);
        assert_eq!(target_count(4, 10), 0);
    }

    #[test]
    fn test_flood_from_dry_world_hits_target() {
        let mut surface = dry_surface(4);
        HydrateStage
            .execute(&mut surface, &hydro(40, 40), &mut Dice::seeded(5))
            .unwrap();
        let total = surface.fine.as_ref().unwrap().in_bounds_count();
        assert_eq!(surface.water_count(), target_count(total, 40));
        assert!(surface.sea_level.is_some());
    }

    #[test]
    fn test_drying_exposes_seabed() {
        let mut surface = dry_surface(4);
        HydrateStage
            .execute(&mut surface, &hydro(60, 20), &mut Dice::seeded(8))
            .unwrap();
        let map = surface.fine.as_ref().unwrap();
        let total = map.in_bounds_count();
        assert_eq!(surface.water_count(), target_count(total, 20));
        let seabed = map.count(|c| c.kind == TileKind::Seabed);
        assert_eq!(seabed, target_count(total, 60) - target_count(total, 20));
    }

    #[test]
    fn test_drain_when_too_wet() {
        let mut surface = Surface::new(PlanetArchetype::Gaian);
        surface.fine = Some(SurfaceMap::new(2, Cell::new(TileKind::Sea, 10)));
        HydrateStage
            .execute(&mut surface, &hydro(30, 30), &mut Dice::seeded(2))
            .unwrap();
        let total = surface.fine.as_ref().unwrap().in_bounds_count();
        assert_eq!(surface.water_count(), target_count(total, 30));
        assert_eq!(surface.sea_level, Some(2));
    }

    #[test]
    fn test_water_heights_quartered() {
        let mut surface = dry_surface(2);
        HydrateStage
            .execute(&mut surface, &hydro(50, 50), &mut Dice::seeded(1))
            .unwrap();
        let map = surface.fine.as_ref().unwrap();
        for (_, _, c) in map.iter() {
            if c.kind == TileKind::Sea {
                assert!(c.height <= 56 / 4);
            }
        }
    }

    #[test]
    fn test_no_hydrographics_is_a_no_op() {
        let mut surface = dry_surface(2);
        let before = surface.fine.clone();
        HydrateStage
            .execute(&mut surface, &TerrainConfig::default(), &mut Dice::seeded(1))
            .unwrap();
        assert_eq!(surface.fine, before);
        assert!(surface.sea_level.is_none());
    }
}
