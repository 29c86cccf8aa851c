//! Geodesic grid geometry.
//!
//! Provides the fixed 320-tile icosahedral tiling used for planetary
//! surfaces and its neighbour algebra.

mod geodesic;
mod adjacency;

pub use geodesic::{GeodesicGrid, GridError, TileCoord, ROWS, ROW_WIDTHS, SEGMENTS, TILE_COUNT};
pub use adjacency::Neighbor;
