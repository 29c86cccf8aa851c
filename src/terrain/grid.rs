//! Per-tile data laid over the geodesic grid.

use serde::{Deserialize, Serialize};

use crate::geometry::{GeodesicGrid, GridError, TileCoord, ROW_WIDTHS};

use super::tile::{Palette, Tile, TileKind};

/// Working state of one tile or pixel during terrain synthesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub kind: TileKind,
    /// Altitude, never negative.
    pub height: i32,
}

impl Cell {
    pub const fn new(kind: TileKind, height: i32) -> Self {
        Self { kind, height }
    }
}

/// Coarse working grid: one [`Cell`] per geodesic tile.
///
/// Row lengths always match [`ROW_WIDTHS`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellGrid {
    rows: Vec<Vec<Cell>>,
}

impl CellGrid {
    /// Creates a grid with every tile set to `fill`.
    pub fn new(fill: Cell) -> Self {
        Self {
            rows: ROW_WIDTHS.iter().map(|&w| vec![fill; w]).collect(),
        }
    }

    pub fn get(&self, t: TileCoord) -> Result<&Cell, GridError> {
        GeodesicGrid.check(t.x, t.row)?;
        Ok(&self.rows[t.row][t.x])
    }

    pub fn get_mut(&mut self, t: TileCoord) -> Result<&mut Cell, GridError> {
        GeodesicGrid.check(t.x, t.row)?;
        Ok(&mut self.rows[t.row][t.x])
    }

    pub fn row(&self, row: usize) -> Result<&[Cell], GridError> {
        GeodesicGrid.width_at(row)?;
        Ok(&self.rows[row])
    }

    /// Iterates over every tile with its coordinate.
    pub fn iter(&self) -> impl Iterator<Item = (TileCoord, &Cell)> {
        self.rows.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(move |(x, cell)| (TileCoord::new(x, row), cell))
        })
    }

    pub fn count<F: Fn(&Cell) -> bool>(&self, pred: F) -> usize {
        self.rows.iter().flatten().filter(|c| pred(c)).count()
    }

    /// Resolves every cell to its palette tile.
    pub fn resolve(&self, palette: &Palette) -> TileGrid {
        TileGrid {
            rows: self
                .rows
                .iter()
                .map(|row| row.iter().map(|c| palette.tile(c.kind).clone()).collect())
                .collect(),
        }
    }
}

/// Finished surface at geodesic resolution, for handing to a renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileGrid {
    rows: Vec<Vec<Tile>>,
}

impl TileGrid {
    pub fn get(&self, x: usize, row: usize) -> Result<&Tile, GridError> {
        GeodesicGrid.check(x, row)?;
        Ok(&self.rows[row][x])
    }

    pub fn rows(&self) -> &[Vec<Tile>] {
        &self.rows
    }

    pub fn water_count(&self) -> usize {
        self.rows.iter().flatten().filter(|t| t.water).count()
    }

    /// Percentage of tiles that are water, to the nearest whole percent.
    pub fn water_percentage(&self) -> u32 {
        let total = self.rows.iter().map(Vec::len).sum::<usize>().max(1);
        ((self.water_count() * 100 + total / 2) / total) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_match_width_table() {
        let grid = CellGrid::new(Cell::new(TileKind::Base, 0));
        for (row, &width) in ROW_WIDTHS.iter().enumerate() {
            assert_eq!(grid.row(row).unwrap().len(), width);
        }
        assert_eq!(grid.iter().count(), 320);
    }

    #[test]
    fn test_get_rejects_out_of_range() {
        let mut grid = CellGrid::new(Cell::new(TileKind::Base, 0));
        assert!(grid.get(TileCoord::new(5, 0)).is_err());
        assert!(grid.get_mut(TileCoord::new(0, 12)).is_err());
        grid.get_mut(TileCoord::new(3, 6)).unwrap().height = 9;
        assert_eq!(grid.get(TileCoord::new(3, 6)).unwrap().height, 9);
    }

    #[test]
    fn test_resolve_keeps_shape() {
        let grid = CellGrid::new(Cell::new(TileKind::Sea, 0));
        let tiles = grid.resolve(&Palette::default());
        assert_eq!(tiles.rows().len(), 12);
        assert_eq!(tiles.get(0, 11).unwrap().name, "Sea");
        assert_eq!(tiles.water_percentage(), 100);
    }

    #[test]
    fn test_water_percentage_rounds() {
        let mut grid = CellGrid::new(Cell::new(TileKind::Land, 0));
        let coords: Vec<TileCoord> = grid.iter().map(|(t, _)| t).take(31).collect();
        for t in coords {
            grid.get_mut(t).unwrap().kind = TileKind::Sea;
        }
        let tiles = grid.resolve(&Palette::default());
        assert_eq!(tiles.water_count(), 31);
        // 31 of 320 is 9.7%.
        assert_eq!(tiles.water_percentage(), 10);
    }
}
