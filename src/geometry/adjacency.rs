//! Vertical and directional adjacency on the geodesic grid.
//!
//! Rows have different widths, so the vertical neighbour cannot keep the same
//! x index. Each row is split into five congruent segments, one per
//! icosahedron face around the pole, and a tile maps to the matching position
//! in the same segment of the neighbouring row. Within a segment the rows are
//! skewed by one tile per row towards the equator; `ALIGNMENT` records that
//! skew so that position `local + ALIGNMENT[row]` lines up across rows.

use super::geodesic::{GeodesicGrid, GridError, TileCoord, ROWS, ROW_WIDTHS, SEGMENTS};

/// Per-row skew of the segment origin.
const ALIGNMENT: [isize; ROWS] = [0, -1, -2, -3, -4, -5, -6, -7, -7, -6, -5, -4];

/// The three edges of a triangular tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Neighbor {
    West,
    East,
    Vertical,
}

impl Neighbor {
    pub const ALL: [Neighbor; 3] = [Neighbor::West, Neighbor::East, Neighbor::Vertical];
}

impl GeodesicGrid {
    /// Returns the tile sharing the horizontal edge of `(x, row)`.
    ///
    /// Up-pointing tiles look one row towards the south pole, down-pointing
    /// tiles one row towards the north pole. The mapping is an involution:
    /// the vertical neighbour of the vertical neighbour is the original tile.
    pub fn vertical(&self, x: usize, row: usize) -> Result<TileCoord, GridError> {
        let up = self.is_up_pointing(x, row)?;
        let target_row = if up { row + 1 } else { row.wrapping_sub(1) };
        // Row 11 is all down-pointing and row 0 all up-pointing, so the
        // target row always exists for a valid tile.
        let target_width = self.width_at(target_row)?;

        let seg_width = ROW_WIDTHS[row] / SEGMENTS;
        let target_seg_width = target_width / SEGMENTS;
        let segment = x / seg_width;
        let local = (x % seg_width) as isize;

        let aligned = local + ALIGNMENT[row];
        let target_local = aligned - ALIGNMENT[target_row];
        debug_assert!(target_local >= 0 && (target_local as usize) < target_seg_width);

        self.check(segment * target_seg_width + target_local as usize, target_row)
    }

    /// Returns the neighbour of `(x, row)` across the given edge.
    pub fn neighbor(&self, x: usize, row: usize, edge: Neighbor) -> Result<TileCoord, GridError> {
        match edge {
            Neighbor::West => self.west(x, row),
            Neighbor::East => self.east(x, row),
            Neighbor::Vertical => self.vertical(x, row),
        }
    }

    /// Returns all three neighbours of `(x, row)` in west, east, vertical order.
    pub fn neighbors(&self, x: usize, row: usize) -> Result<[TileCoord; 3], GridError> {
        Ok([
            self.west(x, row)?,
            self.east(x, row)?,
            self.vertical(x, row)?,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn test_vertical_is_involution() {
        let grid = GeodesicGrid::new();
        for t in grid.tiles() {
            let v = grid.vertical(t.x, t.row).unwrap();
            assert_eq!(grid.vertical(v.x, v.row).unwrap(), t, "tile {:?} -> {:?}", t, v);
        }
    }

    #[test]
    fn test_vertical_changes_row_by_one() {
        let grid = GeodesicGrid::new();
        for t in grid.tiles() {
            let v = grid.vertical(t.x, t.row).unwrap();
            let up = grid.is_up_pointing(t.x, t.row).unwrap();
            assert_eq!(v.row, if up { t.row + 1 } else { t.row - 1 });
            // The partner always has the opposite orientation.
            assert_ne!(grid.is_up_pointing(v.x, v.row).unwrap(), up);
        }
    }

    #[test]
    fn test_vertical_keeps_segment() {
        let grid = GeodesicGrid::new();
        for t in grid.tiles() {
            let v = grid.vertical(t.x, t.row).unwrap();
            let seg = t.x / grid.segment_width(t.row).unwrap();
            let vseg = v.x / grid.segment_width(v.row).unwrap();
            assert_eq!(seg, vseg);
        }
    }

    #[test]
    fn test_vertical_is_a_bijection_between_rows() {
        let grid = GeodesicGrid::new();
        let targets: HashSet<TileCoord> = grid
            .tiles()
            .map(|t| grid.vertical(t.x, t.row).unwrap())
            .collect();
        assert_eq!(targets.len(), 320);
    }

    #[test]
    fn test_vertical_at_band_edges() {
        let grid = GeodesicGrid::new();
        // Down-pointing tile in the first band row reaches into the northern
        // cap: x - x/8 - 1.
        for x in (1..40).step_by(2) {
            assert_eq!(grid.vertical(x, 4).unwrap(), TileCoord::new(x - x / 8 - 1, 3));
        }
        // Up-pointing tile in the last band row reaches the southern cap: x - x/8.
        for x in (0..40).step_by(2) {
            assert_eq!(grid.vertical(x, 7).unwrap(), TileCoord::new(x - x / 8, 8));
        }
    }

    #[test]
    fn test_poles_connect_to_second_row() {
        let grid = GeodesicGrid::new();
        for x in 0..5 {
            assert_eq!(grid.vertical(x, 0).unwrap(), TileCoord::new(x * 3 + 1, 1));
            assert_eq!(grid.vertical(x, 11).unwrap(), TileCoord::new(x * 3 + 1, 10));
        }
    }

    #[test]
    fn test_neighbors_rejects_bad_tile() {
        let grid = GeodesicGrid::new();
        assert!(grid.neighbors(15, 1).is_err());
        assert!(grid.vertical(0, 12).is_err());
    }

    proptest! {
        #[test]
        fn prop_every_neighbor_is_on_the_grid(index in 0usize..320, edge in 0usize..3) {
            let grid = GeodesicGrid::new();
            let t = grid.coord(index).unwrap();
            let n = grid.neighbor(t.x, t.row, Neighbor::ALL[edge]).unwrap();
            prop_assert!(grid.check(n.x, n.row).is_ok());
        }
    }
}
