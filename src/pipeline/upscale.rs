//! Expansion of the coarse geodesic grid into the raster surface.

use rayon::prelude::*;

use crate::geometry::GeodesicGrid;
use crate::noise::{fractal_field, FractalNoiseConfig};
use crate::random::RandomSource;
use crate::terrain::{Cell, Surface, SurfaceMap, TerrainConfig, TerrainState, TileKind};

use super::stage::{GenerationStage, PipelineError, StageId};

/// Expands every coarse tile into a `tile_size` square block.
///
/// Block edges are dithered against the neighbouring tile across that edge
/// so tile boundaries are not ruler-straight, and every pixel height is
/// perturbed by fractal noise.
pub struct UpscaleStage;

impl GenerationStage for UpscaleStage {
    fn id(&self) -> StageId {
        StageId::Upscale
    }

    fn name(&self) -> &str {
        "Upscale"
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
        let ts = config.tile_size.max(1);
        let mut map = SurfaceMap::new(ts, Cell::new(TileKind::Base, 0));
        let grid = GeodesicGrid;

        for tile in grid.tiles() {
            let cell = *surface.coarse.get(tile)?;
            let west = surface.coarse.get(grid.west(tile.x, tile.row)?)?.kind;
            let east = surface.coarse.get(grid.east(tile.x, tile.row)?)?.kind;
            let vertical = surface.coarse.get(grid.vertical(tile.x, tile.row)?)?.kind;
            // The vertical neighbour of an up-pointing tile is in the row below.
            let vertical_edge = if grid.is_up_pointing(tile.x, tile.row)? {
                ts - 1
            } else {
                0
            };
            let height = cell.height * config.height_scale;
            let (ox, oy) = map.block_origin(tile);

            for dy in 0..ts {
                for dx in 0..ts {
                    let mut kind = cell.kind;
                    if ts > 1 {
                        if dx == 0 && rng.die(4) == 1 {
                            kind = west;
                        } else if dx == ts - 1 && rng.die(4) == 1 {
                            kind = east;
                        } else if dy == vertical_edge && rng.die(4) == 1 {
                            kind = vertical;
                        }
                    }
                    if let Some(pixel) = map.get_mut(ox + dx, oy + dy) {
                        *pixel = Cell::new(kind, height);
                    }
                }
            }
        }

        if config.noise_amplitude > 0.0 {
            let noise = FractalNoiseConfig {
                seed: config.noise.seed.wrapping_add(rng.roll_zero(1 << 20) as i32),
                ..config.noise.clone()
            };
            let width = map.width();
            let field = fractal_field(width, map.height(), &noise);
            let amplitude = config.noise_amplitude;

            map.cells_mut()
                .par_chunks_mut(width)
                .zip(field.par_chunks(width))
                .for_each(|(row, noise)| {
                    for (pixel, n) in row.iter_mut().zip(noise) {
                        if let Some(cell) = pixel {
                            let h = cell.height as f32 + n * amplitude;
                            cell.height = h.round().max(0.0) as i32;
                        }
                    }
                });
        }

        surface.fine = Some(map);
        Ok(())
    }
}
