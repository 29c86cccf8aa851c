//! The generated hierarchy: sectors, star systems, stars and planets.
//!
//! Entities are created with an id of 0; a [`PersistenceSink`] assigns the
//! real id when it saves them.
//!
//! [`PersistenceSink`]: super::PersistenceSink

use serde::{Deserialize, Serialize};

use crate::resources::Resource;
use crate::stellar::{Classification, Temperature};
use crate::terrain::{PlanetArchetype, TileGrid};

use super::codes::{AtmospherePressure, AtmosphereType, LifeType, SectorCode, TradeCode, Zone};

pub type SectorId = u64;
pub type SystemId = u64;
pub type StarId = u64;
pub type PlanetId = u64;

/// Sector width in cells.
pub const SECTOR_WIDTH: u32 = 32;
/// Sector height in cells.
pub const SECTOR_HEIGHT: u32 = 40;

/// A 32 by 40 cell region of space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sector {
    pub id: SectorId,
    pub name: String,
    pub x: i32,
    pub y: i32,
    pub codes: Vec<SectorCode>,
    pub allegiance: String,
}

impl Sector {
    pub fn new(name: &str, x: i32, y: i32, codes: Vec<SectorCode>, allegiance: &str) -> Self {
        Self {
            id: 0,
            name: name.to_string(),
            x,
            y,
            codes,
            allegiance: allegiance.to_string(),
        }
    }

    pub fn has_code(&self, code: SectorCode) -> bool {
        self.codes.contains(&code)
    }
}

/// Returns true when `(x, y)` is a cell inside a sector.
pub fn in_sector(x: u32, y: u32) -> bool {
    (1..=SECTOR_WIDTH).contains(&x) && (1..=SECTOR_HEIGHT).contains(&y)
}

/// A star system occupying one sector cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarSystem {
    pub id: SystemId,
    pub sector: SectorId,
    pub name: String,
    /// 1 to 32.
    pub x: u32,
    /// 1 to 40.
    pub y: u32,
    pub zone: Zone,
    pub allegiance: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Star {
    pub id: StarId,
    pub system: SystemId,
    pub name: String,
    /// The star this one orbits, if any.
    pub parent: Option<StarId>,
    /// Distance from the parent star in Mkm, 0 for a primary.
    pub distance: f64,
    pub classification: Classification,
}

/// A planet, or a moon when `parent` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Planet {
    pub id: PlanetId,
    pub system: SystemId,
    pub star: StarId,
    pub parent: Option<PlanetId>,
    pub name: String,
    pub archetype: PlanetArchetype,
    /// km.
    pub radius: u32,
    /// Mkm from the star for planets, km from the parent for moons.
    pub distance: f64,
    pub temperature: Temperature,
    pub atmosphere: AtmosphereType,
    pub pressure: AtmospherePressure,
    /// 0 to 100.
    pub hydrographics: u32,
    pub life: LifeType,
    pub trade_codes: Vec<TradeCode>,
    /// Seconds.
    pub day_length: u32,
    /// Degrees.
    pub axial_tilt: u32,
    pub surface: TileGrid,
    pub resources: Vec<Resource>,
}

impl Planet {
    pub fn is_moon(&self) -> bool {
        self.parent.is_some()
    }

    pub fn has_trade_code(&self, code: TradeCode) -> bool {
        self.trade_codes.contains(&code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sector_cells() {
        assert!(in_sector(1, 1));
        assert!(in_sector(32, 40));
        assert!(!in_sector(0, 5));
        assert!(!in_sector(33, 5));
        assert!(!in_sector(5, 41));
    }

    #[test]
    fn test_sector_codes() {
        let sector = Sector::new("Test", 3, 4, vec![SectorCode::Sp, SectorCode::Ba], "Un");
        assert!(sector.has_code(SectorCode::Sp));
        assert!(!sector.has_code(SectorCode::Hi));
        assert_eq!(sector.id, 0);
    }
}
