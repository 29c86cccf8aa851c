//! Procedural star sector generator.
//!
//! This crate generates sectors of star systems, the stars and planets in
//! them, and a geodesic 320-tile surface and resource list for every
//! planet and moon. Terrain is synthesised by a staged pipeline over an
//! icosahedral grid, driven by one injectable dice source so that a seed
//! reproduces a whole sector.

pub mod astro;
pub mod export;
pub mod geometry;
pub mod noise;
pub mod pipeline;
pub mod random;
pub mod resources;
pub mod stellar;
pub mod terrain;

pub use astro::{HierarchyBuilder, MemoryStore, PersistenceSink, Planet, SectorConfig};
pub use geometry::{GeodesicGrid, TileCoord};
pub use noise::FractalNoiseConfig;
pub use pipeline::{GenerationStage, Pipeline};
pub use random::{Dice, RandomSource};
pub use resources::{Resource, ResourceAssigner};
pub use stellar::{Classification, Temperature};
pub use terrain::{PlanetArchetype, Surface, TerrainConfig};
