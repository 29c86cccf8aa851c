//! The astronomical hierarchy: sectors, star systems, stars, planets and
//! moons, and the builder that generates them.

mod attributes;
mod builder;
mod classify;
mod codes;
mod model;
mod names;
mod store;

pub use attributes::PlanetAttributes;
pub use builder::{
    BuildError, HierarchyBuilder, PlanetDraft, SectorConfig, StarDraft, SystemDraft,
};
pub use classify::PlanetClassifier;
pub use codes::{
    format_sector_codes, parse_sector_codes, roman, AtmospherePressure, AtmosphereType, LifeType,
    SectorCode, TradeCode, Zone,
};
pub use model::{
    in_sector, Planet, PlanetId, Sector, SectorId, Star, StarId, StarSystem, SystemId,
    SECTOR_HEIGHT, SECTOR_WIDTH,
};
pub use names::{NameList, NameSource, Numbered};
pub use store::{MemoryStore, PersistenceSink, StoreError};
