//! Terrain data structures.
//!
//! Provides the tile palette, the coarse geodesic cell grid, the raster
//! surface map and the per-planet `Surface` that the terrain pipeline
//! fills in, along with the archetype records and configuration that
//! drive it.

mod archetype;
mod config;
mod grid;
mod surface;
mod tile;

pub use archetype::{Category, PlanetArchetype, TerrainStrategy};
pub use config::{CraterConfig, Hydrographics, TerrainConfig, TerrainError};
pub use grid::{Cell, CellGrid, TileGrid};
pub use surface::{Surface, SurfaceMap, TerrainState};
pub use tile::{Palette, Tile, TileKind};
