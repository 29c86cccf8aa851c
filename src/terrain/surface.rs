//! Fine raster surface and the per-planet terrain container.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::geometry::{TileCoord, ROWS, ROW_WIDTHS};

use super::archetype::PlanetArchetype;
use super::grid::{Cell, CellGrid, TileGrid};
use super::tile::{Palette, TileKind};

/// Widest row of the geodesic grid.
const MAX_WIDTH: usize = 40;

/// Progress of a surface through terrain synthesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TerrainState {
    Unseeded,
    Seeded,
    Grown,
    Normalized,
    Hydrated,
    Cratered,
    Finished,
}

/// Raster expansion of the geodesic grid.
///
/// Every coarse tile becomes a `tile_size` square block. Row `r` of the grid
/// occupies pixel rows `r * tile_size .. (r + 1) * tile_size` and is centred
/// horizontally in a raster `40 * tile_size` wide; pixels outside any block
/// are out of bounds and hold no cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceMap {
    tile_size: usize,
    width: usize,
    height: usize,
    cells: Vec<Option<Cell>>,
}

impl SurfaceMap {
    /// Creates a map with every in-bounds pixel set to `fill`.
    pub fn new(tile_size: usize, fill: Cell) -> Self {
        let tile_size = tile_size.max(1);
        let width = MAX_WIDTH * tile_size;
        let height = ROWS * tile_size;
        let mut cells = vec![None; width * height];
        for y in 0..height {
            let (start, end) = row_span(tile_size, y / tile_size);
            for cell in &mut cells[y * width + start..y * width + end] {
                *cell = Some(fill);
            }
        }
        Self {
            tile_size,
            width,
            height,
            cells,
        }
    }

    pub fn tile_size(&self) -> usize {
        self.tile_size
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Horizontal extent `[start, end)` of the in-bounds pixels on pixel row `y`.
    pub fn span(&self, y: usize) -> (usize, usize) {
        row_span(self.tile_size, (y / self.tile_size).min(ROWS - 1))
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&Cell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells[y * self.width + x].as_ref()
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut Cell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells[y * self.width + x].as_mut()
    }

    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        self.get(x, y).is_some()
    }

    /// Coarse tile that the pixel belongs to.
    pub fn coarse_of(&self, x: usize, y: usize) -> Option<TileCoord> {
        if !self.in_bounds(x, y) {
            return None;
        }
        let row = y / self.tile_size;
        let (start, _) = row_span(self.tile_size, row);
        Some(TileCoord::new((x - start) / self.tile_size, row))
    }

    /// Top-left pixel of a coarse tile's block.
    pub fn block_origin(&self, tile: TileCoord) -> (usize, usize) {
        let (start, _) = row_span(self.tile_size, tile.row);
        (start + tile.x * self.tile_size, tile.row * self.tile_size)
    }

    /// In-bounds 4-neighbourhood: west and east wrap around the row span,
    /// north and south only where the adjacent pixel is in bounds.
    pub fn neighbours(&self, x: usize, y: usize) -> Vec<(usize, usize)> {
        let mut out = Vec::with_capacity(4);
        if !self.in_bounds(x, y) {
            return out;
        }
        let (start, end) = self.span(y);
        out.push((if x == start { end - 1 } else { x - 1 }, y));
        out.push((if x + 1 == end { start } else { x + 1 }, y));
        if y > 0 && self.in_bounds(x, y - 1) {
            out.push((x, y - 1));
        }
        if self.in_bounds(x, y + 1) {
            out.push((x, y + 1));
        }
        out
    }

    /// Iterates over in-bounds pixels as `(x, y, cell)`.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &Cell)> {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(i, c)| c.as_ref().map(|c| (i % width, i / width, c)))
    }

    /// Row-major pixel storage, `None` outside the grid, for row-parallel
    /// passes.
    pub fn cells_mut(&mut self) -> &mut [Option<Cell>] {
        &mut self.cells
    }

    pub fn in_bounds_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn count<F: Fn(&Cell) -> bool>(&self, pred: F) -> usize {
        self.cells.iter().flatten().filter(|c| pred(c)).count()
    }

    pub fn min_height(&self) -> i32 {
        self.cells.iter().flatten().map(|c| c.height).min().unwrap_or(0)
    }
}

fn row_span(tile_size: usize, row: usize) -> (usize, usize) {
    let width = ROW_WIDTHS[row];
    let start = (MAX_WIDTH - width) * tile_size / 2;
    (start, start + width * tile_size)
}

/// Pixel counts of one geodesic tile's raster block.
#[derive(Debug, Default)]
struct BlockTally {
    kinds: HashMap<TileKind, usize>,
    water: usize,
    height: i64,
    pixels: i64,
}

impl BlockTally {
    /// Most common kind passing `keep`; ties go to the lowest kind.
    fn dominant(&self, keep: impl Fn(TileKind) -> bool) -> Option<TileKind> {
        self.kinds
            .iter()
            .filter(|&(&kind, _)| keep(kind))
            .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(a.0)))
            .map(|(&kind, _)| kind)
    }
}

/// A planet's surface while it is being synthesised.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Surface {
    pub archetype: PlanetArchetype,
    pub palette: Palette,
    /// One cell per geodesic tile.
    pub coarse: CellGrid,
    /// Raster surface, present once upscaled.
    pub fine: Option<SurfaceMap>,
    pub state: TerrainState,
    /// Highest water floor after hydration.
    pub sea_level: Option<i32>,
}

impl Surface {
    pub fn new(archetype: PlanetArchetype) -> Self {
        Self {
            archetype,
            palette: archetype.palette(),
            coarse: CellGrid::new(Cell::new(TileKind::Base, 0)),
            fine: None,
            state: TerrainState::Unseeded,
            sea_level: None,
        }
    }

    pub fn is_water(&self, kind: TileKind) -> bool {
        self.palette.is_water(kind)
    }

    /// Number of water pixels, or water tiles before upscaling.
    pub fn water_count(&self) -> usize {
        match &self.fine {
            Some(map) => map.count(|c| self.is_water(c.kind)),
            None => self.coarse.count(|c| self.is_water(c.kind)),
        }
    }

    /// Fraction of the surface covered by water, 0.0 to 1.0.
    pub fn water_fraction(&self) -> f64 {
        let total = match &self.fine {
            Some(map) => map.in_bounds_count(),
            None => self.coarse.iter().count(),
        };
        self.water_count() as f64 / total.max(1) as f64
    }

    /// Copies each raster block back onto the coarse grid as its mean
    /// height and dominant kind.
    ///
    /// The number of water tiles is the raster's water area in whole
    /// blocks. The blocks with the most water pixels are the water tiles,
    /// each taking its most common water kind; the rest take their most
    /// common dry kind.
    pub fn summarise(&mut self) {
        let Some(map) = &self.fine else {
            return;
        };
        let palette = &self.palette;
        let block = (map.tile_size() * map.tile_size()).max(1);

        let mut tallies: HashMap<TileCoord, BlockTally> = HashMap::new();
        let mut water_pixels = 0;
        for (x, y, cell) in map.iter() {
            let Some(tile) = map.coarse_of(x, y) else {
                continue;
            };
            let tally = tallies.entry(tile).or_default();
            *tally.kinds.entry(cell.kind).or_default() += 1;
            tally.height += cell.height as i64;
            tally.pixels += 1;
            if palette.is_water(cell.kind) {
                tally.water += 1;
                water_pixels += 1;
            }
        }

        let water_tiles = (water_pixels + block / 2) / block;
        let mut ranked: Vec<TileCoord> = self.coarse.iter().map(|(t, _)| t).collect();
        // Stable, so equal shares keep grid order.
        ranked.sort_by_key(|t| std::cmp::Reverse(tallies.get(t).map_or(0, |b| b.water)));

        for (rank, tile) in ranked.into_iter().enumerate() {
            let Some(tally) = tallies.get(&tile) else {
                continue;
            };
            let Ok(cell) = self.coarse.get_mut(tile) else {
                continue;
            };
            let wet = rank < water_tiles;
            cell.kind = tally
                .dominant(|kind| palette.is_water(kind) == wet)
                .unwrap_or(if wet { TileKind::Sea } else { TileKind::Land });
            cell.height = (tally.height / tally.pixels.max(1)) as i32;
        }
    }

    /// The finished surface at geodesic resolution.
    pub fn tiles(&self) -> TileGrid {
        self.coarse.resolve(&self.palette)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_bounds_matches_tile_count() {
        let map = SurfaceMap::new(4, Cell::new(TileKind::Base, 0));
        assert_eq!(map.in_bounds_count(), 320 * 16);
        assert_eq!(map.width(), 160);
        assert_eq!(map.height(), 48);
    }

    #[test]
    fn test_coarse_of_and_block_origin_agree() {
        let map = SurfaceMap::new(4, Cell::new(TileKind::Base, 0));
        for row in 0..ROWS {
            for x in 0..ROW_WIDTHS[row] {
                let t = TileCoord::new(x, row);
                let (px, py) = map.block_origin(t);
                assert_eq!(map.coarse_of(px, py), Some(t));
                assert_eq!(map.coarse_of(px + 3, py + 3), Some(t));
            }
        }
    }

    #[test]
    fn test_neighbours_wrap_within_span() {
        let map = SurfaceMap::new(2, Cell::new(TileKind::Base, 0));
        let (start, end) = map.span(0);
        let n = map.neighbours(start, 0);
        assert!(n.contains(&(end - 1, 0)));
        assert!(n.iter().all(|&(x, y)| map.in_bounds(x, y)));
        // Nothing north of the top row.
        assert!(n.iter().all(|&(_, y)| y <= 1));
    }

    #[test]
    fn test_out_of_bounds_has_no_neighbours() {
        let map = SurfaceMap::new(2, Cell::new(TileKind::Base, 0));
        assert!(!map.in_bounds(0, 0));
        assert!(map.neighbours(0, 0).is_empty());
    }

    #[test]
    fn test_summarise_takes_majority() {
        let mut surface = Surface::new(PlanetArchetype::Gaian);
        let mut map = SurfaceMap::new(2, Cell::new(TileKind::Sea, 4));
        let (x, y) = map.block_origin(TileCoord::new(0, 5));
        for (dx, dy) in [(0, 0), (1, 0), (0, 1)] {
            map.get_mut(x + dx, y + dy).unwrap().kind = TileKind::Land;
        }
        surface.fine = Some(map);
        surface.summarise();
        assert_eq!(surface.coarse.get(TileCoord::new(0, 5)).unwrap().kind, TileKind::Land);
        assert_eq!(surface.coarse.get(TileCoord::new(1, 5)).unwrap().kind, TileKind::Sea);
        assert_eq!(surface.coarse.get(TileCoord::new(1, 5)).unwrap().height, 4);
    }

    #[test]
    fn test_summarise_keeps_thin_coastal_water() {
        let mut surface = Surface::new(PlanetArchetype::Gaian);
        let mut map = SurfaceMap::new(2, Cell::new(TileKind::Land, 1));
        // One wet pixel in each of eight blocks is two tiles of water.
        for x in 0..8 {
            let (px, py) = map.block_origin(TileCoord::new(x, 5));
            map.get_mut(px, py).unwrap().kind = TileKind::Sea;
        }
        surface.fine = Some(map);
        surface.summarise();

        let water: Vec<TileCoord> = surface
            .coarse
            .iter()
            .filter(|(_, c)| c.kind == TileKind::Sea)
            .map(|(t, _)| t)
            .collect();
        assert_eq!(water, vec![TileCoord::new(0, 5), TileCoord::new(1, 5)]);
        assert_eq!(surface.tiles().rows().iter().flatten().filter(|t| t.water).count(), 2);
    }
}
