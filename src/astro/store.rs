//! Persistence seam and an in-memory implementation.

use std::collections::BTreeMap;

use thiserror::Error;

use super::model::{
    Planet, PlanetId, Sector, SectorId, Star, StarId, StarSystem, SystemId,
};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("No {kind} with id {id}")]
    NotFound { kind: &'static str, id: u64 },
    #[error("Cell {x},{y} already holds a star system")]
    Occupied { x: u32, y: u32 },
    #[error("A sector already exists at {x},{y}")]
    SectorExists { x: i32, y: i32 },
    #[error("Rejected: {0}")]
    Rejected(String),
}

/// Gives generated entities a durable identity and reads them back.
///
/// Saving returns the id the builder then uses for dependents, so a
/// secondary star can only be saved once its primary has an id.
pub trait PersistenceSink {
    fn save_sector(&mut self, sector: Sector) -> Result<SectorId, StoreError>;
    fn save_system(&mut self, system: StarSystem) -> Result<SystemId, StoreError>;
    fn save_star(&mut self, star: Star) -> Result<StarId, StoreError>;
    fn save_planet(&mut self, planet: Planet) -> Result<PlanetId, StoreError>;

    /// Deletes a star system with all of its stars, planets and moons.
    ///
    /// Used to undo a system whose commit failed part way.
    fn remove_system(&mut self, id: SystemId) -> Result<(), StoreError>;

    fn sector(&self, id: SectorId) -> Result<&Sector, StoreError>;
    fn system(&self, id: SystemId) -> Result<&StarSystem, StoreError>;
    fn star(&self, id: StarId) -> Result<&Star, StoreError>;
    fn planet(&self, id: PlanetId) -> Result<&Planet, StoreError>;

    /// Systems of a sector, in the order they were saved.
    fn systems_in(&self, sector: SectorId) -> Vec<&StarSystem>;
    fn stars_in(&self, system: SystemId) -> Vec<&Star>;
    fn planets_in(&self, system: SystemId) -> Vec<&Planet>;
    fn system_at(&self, sector: SectorId, x: u32, y: u32) -> Option<&StarSystem>;
}

/// Map backed store. Ids start at 1 and follow save order.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    sectors: BTreeMap<SectorId, Sector>,
    systems: BTreeMap<SystemId, StarSystem>,
    stars: BTreeMap<StarId, Star>,
    planets: BTreeMap<PlanetId, Planet>,
}

fn lookup<'a, T>(items: &'a BTreeMap<u64, T>, kind: &'static str, id: u64) -> Result<&'a T, StoreError> {
    items.get(&id).ok_or(StoreError::NotFound { kind, id })
}

fn next_id<T>(items: &BTreeMap<u64, T>) -> u64 {
    items.keys().next_back().map_or(1, |last| last + 1)
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sector_count(&self) -> usize {
        self.sectors.len()
    }

    pub fn planet_count(&self) -> usize {
        self.planets.len()
    }
}

impl PersistenceSink for MemoryStore {
    fn save_sector(&mut self, mut sector: Sector) -> Result<SectorId, StoreError> {
        if self.sectors.values().any(|s| s.x == sector.x && s.y == sector.y) {
            return Err(StoreError::SectorExists {
                x: sector.x,
                y: sector.y,
            });
        }
        if self.sectors.values().any(|s| s.name == sector.name) {
            return Err(StoreError::Rejected(format!(
                "sector name '{}' is taken",
                sector.name
            )));
        }
        sector.id = next_id(&self.sectors);
        let id = sector.id;
        self.sectors.insert(id, sector);
        Ok(id)
    }

    fn save_system(&mut self, mut system: StarSystem) -> Result<SystemId, StoreError> {
        self.sector(system.sector)?;
        if self.system_at(system.sector, system.x, system.y).is_some() {
            return Err(StoreError::Occupied {
                x: system.x,
                y: system.y,
            });
        }
        system.id = next_id(&self.systems);
        let id = system.id;
        self.systems.insert(id, system);
        Ok(id)
    }

    fn save_star(&mut self, mut star: Star) -> Result<StarId, StoreError> {
        self.system(star.system)?;
        if let Some(parent) = star.parent {
            self.star(parent)?;
        }
        star.id = next_id(&self.stars);
        let id = star.id;
        self.stars.insert(id, star);
        Ok(id)
    }

    fn save_planet(&mut self, mut planet: Planet) -> Result<PlanetId, StoreError> {
        self.system(planet.system)?;
        self.star(planet.star)?;
        if let Some(parent) = planet.parent {
            self.planet(parent)?;
        }
        planet.id = next_id(&self.planets);
        let id = planet.id;
        self.planets.insert(id, planet);
        Ok(id)
    }

    fn remove_system(&mut self, id: SystemId) -> Result<(), StoreError> {
        self.systems
            .remove(&id)
            .ok_or(StoreError::NotFound { kind: "star system", id })?;
        self.stars.retain(|_, s| s.system != id);
        self.planets.retain(|_, p| p.system != id);
        Ok(())
    }

    fn sector(&self, id: SectorId) -> Result<&Sector, StoreError> {
        lookup(&self.sectors, "sector", id)
    }

    fn system(&self, id: SystemId) -> Result<&StarSystem, StoreError> {
        lookup(&self.systems, "star system", id)
    }

    fn star(&self, id: StarId) -> Result<&Star, StoreError> {
        lookup(&self.stars, "star", id)
    }

    fn planet(&self, id: PlanetId) -> Result<&Planet, StoreError> {
        lookup(&self.planets, "planet", id)
    }

    fn systems_in(&self, sector: SectorId) -> Vec<&StarSystem> {
        self.systems.values().filter(|s| s.sector == sector).collect()
    }

    fn stars_in(&self, system: SystemId) -> Vec<&Star> {
        self.stars.values().filter(|s| s.system == system).collect()
    }

    fn planets_in(&self, system: SystemId) -> Vec<&Planet> {
        self.planets.values().filter(|p| p.system == system).collect()
    }

    fn system_at(&self, sector: SectorId, x: u32, y: u32) -> Option<&StarSystem> {
        self.systems
            .values()
            .find(|s| s.sector == sector && s.x == x && s.y == y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::astro::Zone;
    use crate::stellar::Classification;

    fn system(sector: SectorId, x: u32, y: u32) -> StarSystem {
        StarSystem {
            id: 0,
            sector,
            name: format!("S{}{}", x, y),
            x,
            y,
            zone: Zone::Green,
            allegiance: "Un".to_string(),
        }
    }

    #[test]
    fn test_sector_coordinates_unique() {
        let mut store = MemoryStore::new();
        let id = store.save_sector(Sector::new("A", 0, 0, vec![], "Un")).unwrap();
        assert_eq!(id, 1);
        assert_eq!(
            store.save_sector(Sector::new("B", 0, 0, vec![], "Un")),
            Err(StoreError::SectorExists { x: 0, y: 0 })
        );
        assert!(store.save_sector(Sector::new("A", 1, 0, vec![], "Un")).is_err());
        assert_eq!(store.sector(id).unwrap().id, id);
    }

    #[test]
    fn test_one_system_per_cell() {
        let mut store = MemoryStore::new();
        let sector = store.save_sector(Sector::new("A", 0, 0, vec![], "Un")).unwrap();
        store.save_system(system(sector, 5, 6)).unwrap();
        assert_eq!(
            store.save_system(system(sector, 5, 6)),
            Err(StoreError::Occupied { x: 5, y: 6 })
        );
        assert!(store.save_system(system(99, 1, 1)).is_err());
        assert_eq!(store.systems_in(sector).len(), 1);
    }

    #[test]
    fn test_star_parent_must_exist() {
        let mut store = MemoryStore::new();
        let sector = store.save_sector(Sector::new("A", 0, 0, vec![], "Un")).unwrap();
        let sys = store.save_system(system(sector, 1, 1)).unwrap();
        let orphan = Star {
            id: 0,
            system: sys,
            name: "Orphan".to_string(),
            parent: Some(7),
            distance: 300.0,
            classification: Classification::sol(),
        };
        assert_eq!(
            store.save_star(orphan),
            Err(StoreError::NotFound { kind: "star", id: 7 })
        );
    }

    #[test]
    fn test_remove_system_takes_its_bodies() {
        let mut store = MemoryStore::new();
        let sector = store.save_sector(Sector::new("A", 0, 0, vec![], "Un")).unwrap();
        let kept = store.save_system(system(sector, 1, 1)).unwrap();
        let gone = store.save_system(system(sector, 2, 1)).unwrap();
        for sys in [kept, gone] {
            store
                .save_star(Star {
                    id: 0,
                    system: sys,
                    name: format!("Star {}", sys),
                    parent: None,
                    distance: 0.0,
                    classification: Classification::sol(),
                })
                .unwrap();
        }

        store.remove_system(gone).unwrap();
        assert!(store.system(gone).is_err());
        assert!(store.stars_in(gone).is_empty());
        assert_eq!(store.stars_in(kept).len(), 1);
        assert!(store.system_at(sector, 2, 1).is_none());
        assert!(matches!(store.remove_system(gone), Err(StoreError::NotFound { .. })));

        // The freed cell can be used again.
        assert!(store.save_system(system(sector, 2, 1)).is_ok());
    }

    #[test]
    fn test_lookup_zero_is_not_found() {
        let store = MemoryStore::new();
        assert!(matches!(store.planet(0), Err(StoreError::NotFound { .. })));
    }
}
