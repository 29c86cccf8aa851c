//! Fixed twelve-row triangular tiling of an unwrapped icosahedron.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of latitude rows in the grid.
pub const ROWS: usize = 12;

/// Tiles per row, pole to pole.
pub const ROW_WIDTHS: [usize; ROWS] = [5, 15, 25, 35, 40, 40, 40, 40, 35, 25, 15, 5];

/// Total number of tiles on the grid.
pub const TILE_COUNT: usize = 320;

/// Number of congruent segments each row is split into (one per face around a pole).
pub const SEGMENTS: usize = 5;

/// Index of the first tile of each row in flat order.
const ROW_STARTS: [usize; ROWS] = [0, 5, 20, 45, 80, 120, 160, 200, 240, 275, 300, 315];

/// First row of the southern cap, where the orientation pattern inside each
/// segment is inverted.
const FIRST_SOUTHERN_ROW: usize = 8;

/// Errors from grid lookups with invalid coordinates.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("Row {0} is outside the grid (0-11)")]
    RowOutOfRange(usize),
    #[error("Tile {x} is outside row {row} of width {width}")]
    ColumnOutOfRange { x: usize, row: usize, width: usize },
    #[error("Tile index {0} is outside the grid (0-319)")]
    IndexOutOfRange(usize),
}

/// A tile position on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileCoord {
    /// Position within the row.
    pub x: usize,
    /// Latitude row, 0 at the north pole.
    pub row: usize,
}

impl TileCoord {
    pub const fn new(x: usize, row: usize) -> Self {
        Self { x, row }
    }
}

/// The geodesic tile topology.
///
/// The grid carries no per-tile state; it answers width, orientation and
/// adjacency questions about coordinates. Every lookup validates its input
/// and fails with [`GridError`] instead of wrapping to some other tile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GeodesicGrid;

impl GeodesicGrid {
    pub fn new() -> Self {
        Self
    }

    /// Returns the number of tiles in `row`.
    pub fn width_at(&self, row: usize) -> Result<usize, GridError> {
        ROW_WIDTHS
            .get(row)
            .copied()
            .ok_or(GridError::RowOutOfRange(row))
    }

    /// Returns the width of one of the five segments of `row`.
    pub fn segment_width(&self, row: usize) -> Result<usize, GridError> {
        Ok(self.width_at(row)? / SEGMENTS)
    }

    /// Checks that `(x, row)` names a tile on the grid.
    pub fn check(&self, x: usize, row: usize) -> Result<TileCoord, GridError> {
        let width = self.width_at(row)?;
        if x >= width {
            return Err(GridError::ColumnOutOfRange { x, row, width });
        }
        Ok(TileCoord::new(x, row))
    }

    /// Returns the tile to the west, wrapping around the row.
    pub fn west(&self, x: usize, row: usize) -> Result<TileCoord, GridError> {
        self.check(x, row)?;
        let width = ROW_WIDTHS[row];
        Ok(TileCoord::new((x + width - 1) % width, row))
    }

    /// Returns the tile to the east, wrapping around the row.
    pub fn east(&self, x: usize, row: usize) -> Result<TileCoord, GridError> {
        self.check(x, row)?;
        let width = ROW_WIDTHS[row];
        Ok(TileCoord::new((x + 1) % width, row))
    }

    /// Returns true if the triangle at `(x, row)` points north.
    ///
    /// An up-pointing triangle has a flat southern edge, so its vertical
    /// neighbour lies in the row below. North of the southern cap the first
    /// triangle of every segment points up; in the southern cap the first
    /// one points down.
    pub fn is_up_pointing(&self, x: usize, row: usize) -> Result<bool, GridError> {
        self.check(x, row)?;
        let local = x % (ROW_WIDTHS[row] / SEGMENTS);
        let even = local % 2 == 0;
        Ok(if row < FIRST_SOUTHERN_ROW { even } else { !even })
    }

    /// Returns the flat index of a tile, counting rows from the north pole.
    pub fn index(&self, x: usize, row: usize) -> Result<usize, GridError> {
        self.check(x, row)?;
        Ok(ROW_STARTS[row] + x)
    }

    /// Inverse of [`index`](Self::index).
    pub fn coord(&self, index: usize) -> Result<TileCoord, GridError> {
        if index >= TILE_COUNT {
            return Err(GridError::IndexOutOfRange(index));
        }
        let row = ROW_STARTS
            .iter()
            .rposition(|&start| start <= index)
            .ok_or(GridError::IndexOutOfRange(index))?;
        Ok(TileCoord::new(index - ROW_STARTS[row], row))
    }

    /// Iterates over every tile, row by row.
    pub fn tiles(&self) -> impl Iterator<Item = TileCoord> {
        ROW_WIDTHS
            .iter()
            .enumerate()
            .flat_map(|(row, &width)| (0..width).map(move |x| TileCoord::new(x, row)))
    }

    /// Total number of tiles.
    pub fn tile_count(&self) -> usize {
        TILE_COUNT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widths_sum_to_tile_count() {
        let grid = GeodesicGrid::new();
        let total: usize = (0..ROWS).map(|r| grid.width_at(r).unwrap()).sum();
        assert_eq!(total, 320);
        assert_eq!(grid.tiles().count(), TILE_COUNT);
    }

    #[test]
    fn test_row_starts_match_widths() {
        let mut start = 0;
        for row in 0..ROWS {
            assert_eq!(ROW_STARTS[row], start);
            start += ROW_WIDTHS[row];
        }
    }

    #[test]
    fn test_width_out_of_range() {
        let grid = GeodesicGrid::new();
        assert_eq!(grid.width_at(12), Err(GridError::RowOutOfRange(12)));
    }

    #[test]
    fn test_west_east_inverse() {
        let grid = GeodesicGrid::new();
        for t in grid.tiles() {
            let e = grid.east(t.x, t.row).unwrap();
            let w = grid.west(t.x, t.row).unwrap();
            assert_eq!(grid.west(e.x, e.row).unwrap(), t);
            assert_eq!(grid.east(w.x, w.row).unwrap(), t);
        }
    }

    #[test]
    fn test_wrap_at_row_ends() {
        let grid = GeodesicGrid::new();
        assert_eq!(grid.west(0, 3).unwrap(), TileCoord::new(34, 3));
        assert_eq!(grid.east(39, 5).unwrap(), TileCoord::new(0, 5));
        assert_eq!(grid.east(4, 0).unwrap(), TileCoord::new(0, 0));
    }

    #[test]
    fn test_out_of_bounds_is_an_error() {
        let grid = GeodesicGrid::new();
        assert_eq!(
            grid.west(5, 0),
            Err(GridError::ColumnOutOfRange { x: 5, row: 0, width: 5 })
        );
        assert!(grid.east(0, 12).is_err());
        assert!(grid.is_up_pointing(40, 4).is_err());
    }

    #[test]
    fn test_pole_orientation() {
        let grid = GeodesicGrid::new();
        for x in 0..5 {
            assert!(grid.is_up_pointing(x, 0).unwrap());
            assert!(!grid.is_up_pointing(x, 11).unwrap());
        }
    }

    #[test]
    fn test_orientation_counts_pair_up_between_rows() {
        // Every up-pointing tile in a row needs exactly one down-pointing
        // partner in the row below.
        let grid = GeodesicGrid::new();
        for row in 0..ROWS - 1 {
            let up = (0..ROW_WIDTHS[row])
                .filter(|&x| grid.is_up_pointing(x, row).unwrap())
                .count();
            let down_below = (0..ROW_WIDTHS[row + 1])
                .filter(|&x| !grid.is_up_pointing(x, row + 1).unwrap())
                .count();
            assert_eq!(up, down_below, "rows {} and {}", row, row + 1);
        }
    }

    #[test]
    fn test_index_round_trip() {
        let grid = GeodesicGrid::new();
        for (i, t) in grid.tiles().enumerate() {
            assert_eq!(grid.index(t.x, t.row).unwrap(), i);
            assert_eq!(grid.coord(i).unwrap(), t);
        }
        assert_eq!(grid.coord(320), Err(GridError::IndexOutOfRange(320)));
    }
}
