//! Builds sectors, star systems, stars and planets.
//!
//! A star system is first generated into a detached [`SystemDraft`] that
//! owns everything down to each planet's surface and resources. Drafts
//! hold no ids, so many can be generated in parallel; they are then
//! committed to the [`PersistenceSink`] one at a time.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::GridError;
use crate::pipeline::{synthesize, PipelineError};
use crate::random::{derive_seed, Dice, RandomSource};
use crate::resources::{ResourceAssigner, ResourceProfile};
use crate::stellar::{inner_limit, orbit_temperature, StarError, StarGenerator, StarSpec, Temperature};
use crate::terrain::{PlanetArchetype, TerrainConfig, TerrainStrategy, TileGrid};

use super::attributes::PlanetAttributes;
use super::classify::PlanetClassifier;
use super::codes::{parse_sector_codes, roman, SectorCode, Zone};
use super::model::{
    in_sector, Planet, PlanetId, Sector, SectorId, Star, StarSystem, SystemId, SECTOR_HEIGHT,
    SECTOR_WIDTH,
};
use super::names::NameSource;
use super::store::{PersistenceSink, StoreError};

const MOON_SUFFIXES: &str = "abcdefghijklmnop";

#[derive(Error, Debug)]
pub enum BuildError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Star(#[from] StarError),
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error("Sector has no free cells")]
    NoFreeCells,
    #[error("Invalid sector codes: {0}")]
    InvalidCodes(String),
}

/// Settings for the hierarchy builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorConfig {
    /// Root seed; every system's dice derive from it and the cell.
    pub seed: u64,
    /// Relative chances, out of 100, of one, two and three stars.
    pub star_weights: [u32; 3],
    /// Terrain raster resolution per geodesic tile.
    pub tile_size: usize,
    /// Whether sectors coded `Sp` lose a star from multiples and half
    /// their planets.
    pub sparse_halving: bool,
}

impl Default for SectorConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            star_weights: [67, 28, 5],
            tile_size: 8,
            sparse_halving: true,
        }
    }
}

impl SectorConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }
}

/// A planet with its moons, complete but not yet persisted.
#[derive(Debug, Clone)]
pub struct PlanetDraft {
    pub planet: Planet,
    pub moons: Vec<Planet>,
}

#[derive(Debug, Clone)]
pub struct StarDraft {
    pub spec: StarSpec,
    /// Index of the star this one orbits within the draft.
    pub parent: Option<usize>,
    pub planets: Vec<PlanetDraft>,
}

/// A generated star system that has not been saved.
#[derive(Debug, Clone)]
pub struct SystemDraft {
    pub name: String,
    pub x: u32,
    pub y: u32,
    pub stars: Vec<StarDraft>,
    /// Set when generation stopped early; only whole planets are kept.
    pub interrupted: bool,
}

impl SystemDraft {
    /// Interrupted before any planet was finished.
    pub fn is_unstarted(&self) -> bool {
        self.interrupted && self.stars.iter().all(|s| s.planets.is_empty())
    }
}

/// Generation settings shared by every draft of one run.
struct DraftContext<'a> {
    config: &'a SectorConfig,
    sparse: bool,
    cancel: Option<&'a AtomicBool>,
}

impl DraftContext<'_> {
    fn cancelled(&self) -> bool {
        self.cancel.is_some_and(|c| c.load(Ordering::Relaxed))
    }

    fn star_count(&self, rng: &mut dyn RandomSource) -> usize {
        let [one, two, _] = self.config.star_weights;
        let roll = rng.die(100) as u32;
        let count = if roll <= one {
            1
        } else if roll <= one + two {
            2
        } else {
            3
        };
        if self.sparse && count > 1 {
            count - 1
        } else {
            count
        }
    }

    fn draft_system(
        &self,
        name: String,
        x: u32,
        y: u32,
        rng: &mut dyn RandomSource,
    ) -> Result<SystemDraft, BuildError> {
        let generator = StarGenerator::new(&name, self.star_count(rng));
        let primary = generator.primary(rng);
        let mut specs = vec![(primary, None)];
        if generator.star_count() >= 2 {
            let secondary = generator.secondary(Some(&specs[0].0.classification), rng)?;
            specs.push((secondary, Some(0)));
        }
        if generator.star_count() >= 3 {
            let tertiary = generator.tertiary(Some(&specs[1].0.classification), rng)?;
            specs.push((tertiary, Some(1)));
        }

        let mut draft = SystemDraft {
            name,
            x,
            y,
            stars: Vec::with_capacity(specs.len()),
            interrupted: false,
        };
        for (index, (spec, parent)) in specs.into_iter().enumerate() {
            let (planets, interrupted) = self.draft_planets(&spec, index, rng)?;
            draft.stars.push(StarDraft {
                spec,
                parent,
                planets,
            });
            if interrupted {
                draft.interrupted = true;
                break;
            }
        }
        Ok(draft)
    }

    /// Generates the planets of one star in orbit order.
    ///
    /// Returns the finished planets and whether generation was cut short.
    fn draft_planets(
        &self,
        star: &StarSpec,
        star_index: usize,
        rng: &mut dyn RandomSource,
    ) -> Result<(Vec<PlanetDraft>, bool), BuildError> {
        let mut count = (rng.roll(2, 6) - 3 * star_index as i32).max(0);
        if self.sparse {
            count /= 2;
        }

        let classifier = PlanetClassifier::new();
        let inner = inner_limit(&star.classification);
        let mut increase = inner + f64::from(rng.roll(2, 6));
        let mut distance = inner + f64::from(rng.roll(2, sides(increase)));

        let mut planets = Vec::with_capacity(count as usize);
        for orbit in 1..=count as u32 {
            if self.cancelled() {
                return Ok((planets, true));
            }
            let temperature = orbit_temperature(&star.classification, distance);
            let archetype = classifier.classify(temperature, rng);
            let name = format!("{} {}", star.name, roman(orbit));
            let planet = build_planet(name, archetype, temperature, distance, self.config.tile_size, rng)?;
            let moons = match classifier.moon_archetype(archetype) {
                Some(moon) => draft_moons(&planet, moon, temperature, self.config.tile_size, rng)?,
                None => Vec::new(),
            };
            log::debug!(
                "{} ({}) at {:.0} Mkm with {} moons",
                planet.name,
                archetype,
                distance,
                moons.len()
            );
            planets.push(PlanetDraft { planet, moons });

            if archetype.is_jovian() {
                distance += f64::from(rng.roll(2, sides(increase)) + rng.roll(3, 10));
            }
            distance += f64::from(rng.roll(2, sides(increase)) + rng.roll(2, 10));
            increase = increase * (1.0 + f64::from(rng.roll(2, 6)) / 10.0) + f64::from(rng.die(4));
        }
        Ok((planets, false))
    }
}

/// Dice for a whole sector, keyed by the run seed and sector position.
fn sector_dice(seed: u64, sector: &Sector) -> Dice {
    Dice::seeded(derive_seed(&[
        seed as i64,
        i64::from(sector.x),
        i64::from(sector.y),
    ]))
}

/// Dice for one cell, independent of the order cells are generated in.
fn cell_dice(seed: u64, sector: &Sector, x: u32, y: u32) -> Dice {
    sector_dice(seed, sector).fork(u64::from(y) * u64::from(SECTOR_WIDTH) + u64::from(x))
}

/// Die size for an orbit step, capped so two dice stay within `i32`.
fn sides(increase: f64) -> u32 {
    increase.round().clamp(1.0, 1.0e8) as u32
}

/// Rolls one planet's attributes, terrain and resources.
fn build_planet(
    name: String,
    archetype: PlanetArchetype,
    temperature: Temperature,
    distance: f64,
    tile_size: usize,
    rng: &mut dyn RandomSource,
) -> Result<Planet, BuildError> {
    let attrs = PlanetAttributes::roll(archetype, temperature, rng);
    let config = match archetype {
        PlanetArchetype::Gaian => TerrainConfig::gaian(attrs.hydrographics),
        _ => TerrainConfig::for_archetype(archetype),
    }
    .with_tile_size(tile_size);
    let surface = synthesize(archetype, &config, rng)?.tiles();

    // Seas are measured on the stored tiles.
    let hydrographics = match archetype.strategy() {
        TerrainStrategy::Wet | TerrainStrategy::Gaian => surface.water_percentage(),
        _ => attrs.hydrographics,
    };
    let profile = ResourceProfile {
        archetype,
        atmosphere: attrs.atmosphere,
        pressure: attrs.pressure,
        hydrographics,
        life: attrs.life,
        temperature: attrs.temperature,
    };
    let resources = ResourceAssigner::new().assign(&profile, rng);

    Ok(Planet {
        id: 0,
        system: 0,
        star: 0,
        parent: None,
        name,
        archetype,
        radius: attrs.radius,
        distance,
        temperature: attrs.temperature,
        atmosphere: attrs.atmosphere,
        pressure: attrs.pressure,
        hydrographics,
        life: attrs.life,
        trade_codes: attrs.trade_codes,
        day_length: attrs.day_length,
        axial_tilt: attrs.axial_tilt,
        surface,
        resources,
    })
}

/// Generates `2d3` moons of one archetype, each half again as far out as
/// the last.
fn draft_moons(
    planet: &Planet,
    archetype: PlanetArchetype,
    temperature: Temperature,
    tile_size: usize,
    rng: &mut dyn RandomSource,
) -> Result<Vec<Planet>, BuildError> {
    let count = rng.roll(2, 3) as usize;
    let mut moons: Vec<Planet> = Vec::with_capacity(count);
    let mut distance = 0.0;
    for suffix in MOON_SUFFIXES.chars().take(count) {
        let name = format!("{}/{}", planet.name, suffix);
        let mut moon = build_planet(name, archetype, temperature, 0.0, tile_size, rng)?;
        distance = if moons.is_empty() {
            let base = f64::from(planet.radius) * f64::from(moon.radius)
                / f64::from(200 + rng.roll(2, 100));
            // Close to a double planet.
            if moon.radius > planet.radius / 5 {
                base * 10.0
            } else {
                base
            }
        } else {
            distance * 1.5
        };
        moon.distance = distance.round();
        moons.push(moon);
    }
    Ok(moons)
}

/// Builds the astronomical hierarchy into a persistence sink.
pub struct HierarchyBuilder<S: PersistenceSink> {
    store: S,
    config: SectorConfig,
    cancel: Option<Arc<AtomicBool>>,
}

impl<S: PersistenceSink> HierarchyBuilder<S> {
    pub fn new(store: S, config: SectorConfig) -> Self {
        Self {
            store,
            config,
            cancel: None,
        }
    }

    /// Stops generation at the next planet boundary once `flag` is set.
    pub fn with_cancel(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn config(&self) -> &SectorConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|c| c.load(Ordering::Relaxed))
    }

    fn context(&self, sector: &Sector) -> DraftContext<'_> {
        DraftContext {
            config: &self.config,
            sparse: self.config.sparse_halving && sector.has_code(SectorCode::Sp),
            cancel: self.cancel.as_deref(),
        }
    }

    /// Creates a sector with no star systems.
    ///
    /// `codes` is a space separated list such as `"Sp Ba Lo"`.
    pub fn create_empty_sector(
        &mut self,
        name: &str,
        x: i32,
        y: i32,
        codes: &str,
        allegiance: &str,
    ) -> Result<SectorId, BuildError> {
        let codes = parse_sector_codes(codes).map_err(BuildError::InvalidCodes)?;
        let id = self
            .store
            .save_sector(Sector::new(name, x, y, codes, allegiance))?;
        log::info!("Created sector {} at {},{}", name, x, y);
        Ok(id)
    }

    /// Gives every empty cell of a sector a `percent_chance` chance of a
    /// new star system, and returns how many were created.
    ///
    /// A cell that fails to generate or save is logged and skipped.
    pub fn fill_random_sector(
        &mut self,
        sector_id: SectorId,
        percent_chance: u32,
        names: &mut dyn NameSource,
    ) -> Result<usize, BuildError> {
        if self.cancelled() {
            return Err(PipelineError::Interrupted.into());
        }
        let sector = self.store.sector(sector_id)?.clone();
        let mut rng = sector_dice(self.config.seed, &sector);

        let mut cells = Vec::new();
        for y in 1..=SECTOR_HEIGHT {
            for x in 1..=SECTOR_WIDTH {
                if self.store.system_at(sector_id, x, y).is_some() {
                    continue;
                }
                if rng.chance(percent_chance.min(100)) {
                    cells.push((x, y, names.next_name()));
                }
            }
        }
        log::info!("Generating {} star systems in {}", cells.len(), sector.name);

        let seed = self.config.seed;
        let context = self.context(&sector);
        let drafts: Vec<(u32, u32, Result<SystemDraft, BuildError>)> = cells
            .into_par_iter()
            .map(|(x, y, name)| {
                let mut dice = cell_dice(seed, &sector, x, y);
                (x, y, context.draft_system(name, x, y, &mut dice))
            })
            .collect();

        let mut created = 0;
        for (x, y, draft) in drafts {
            let draft = match draft {
                Ok(draft) => draft,
                Err(e) => {
                    log::warn!("Failed to create star system at {},{}: {}", x, y, e);
                    continue;
                }
            };
            let interrupted = draft.interrupted;
            if draft.is_unstarted() {
                log::info!("Sector fill interrupted before {},{}", x, y);
                break;
            }
            match self.commit(&sector, draft) {
                Ok(_) => created += 1,
                Err(e) => log::warn!("Failed to create star system at {},{}: {}", x, y, e),
            }
            if interrupted {
                log::info!("Sector fill interrupted at {},{}", x, y);
                break;
            }
        }
        log::info!("Created {} star systems in {}", created, sector.name);
        Ok(created)
    }

    /// Creates one star system with its stars, planets and moons.
    ///
    /// A cell outside the sector, such as `(0, 0)`, selects a random free
    /// cell instead.
    pub fn create_star_system(
        &mut self,
        sector_id: SectorId,
        x: u32,
        y: u32,
        name: &str,
    ) -> Result<SystemId, BuildError> {
        if self.cancelled() {
            return Err(PipelineError::Interrupted.into());
        }
        let sector = self.store.sector(sector_id)?.clone();
        let (x, y) = if in_sector(x, y) {
            if self.store.system_at(sector_id, x, y).is_some() {
                return Err(StoreError::Occupied { x, y }.into());
            }
            (x, y)
        } else {
            self.random_free_cell(&sector)?
        };

        let mut dice = cell_dice(self.config.seed, &sector, x, y);
        let draft = self
            .context(&sector)
            .draft_system(name.to_string(), x, y, &mut dice)?;
        if draft.is_unstarted() {
            return Err(PipelineError::Interrupted.into());
        }
        if draft.interrupted {
            log::info!("Star system {} interrupted; keeping finished planets", name);
        }
        self.commit(&sector, draft)
    }

    fn random_free_cell(&self, sector: &Sector) -> Result<(u32, u32), BuildError> {
        let free: Vec<(u32, u32)> = (1..=SECTOR_HEIGHT)
            .flat_map(|y| (1..=SECTOR_WIDTH).map(move |x| (x, y)))
            .filter(|&(x, y)| self.store.system_at(sector.id, x, y).is_none())
            .collect();
        if free.is_empty() {
            return Err(BuildError::NoFreeCells);
        }
        let mut rng = Dice::seeded(derive_seed(&[
            self.config.seed as i64,
            i64::from(sector.x),
            i64::from(sector.y),
            free.len() as i64,
        ]));
        Ok(free[rng.roll_zero(free.len())])
    }

    /// Saves a draft: the system, then each star before its planets, then
    /// each planet before its moons.
    ///
    /// A failure after the system is saved removes it again, so the sink
    /// holds either the whole system or none of it.
    fn commit(&mut self, sector: &Sector, draft: SystemDraft) -> Result<SystemId, BuildError> {
        let system_id = self.store.save_system(StarSystem {
            id: 0,
            sector: sector.id,
            name: draft.name.clone(),
            x: draft.x,
            y: draft.y,
            zone: Zone::Green,
            allegiance: sector.allegiance.clone(),
        })?;
        if let Err(e) = self.commit_bodies(system_id, draft) {
            if let Err(undo) = self.store.remove_system(system_id) {
                log::warn!("Could not remove partial star system {}: {}", system_id, undo);
            }
            return Err(e);
        }
        Ok(system_id)
    }

    fn commit_bodies(&mut self, system_id: SystemId, draft: SystemDraft) -> Result<(), BuildError> {
        let mut star_ids = Vec::with_capacity(draft.stars.len());
        let mut planet_count = 0;
        for star in draft.stars {
            let parent = star
                .parent
                .map(|i| star_ids.get(i).copied().ok_or(StarError::MissingPrimary))
                .transpose()?;
            let star_id = self.store.save_star(Star {
                id: 0,
                system: system_id,
                name: star.spec.name,
                parent,
                distance: star.spec.distance,
                classification: star.spec.classification,
            })?;
            star_ids.push(star_id);

            for PlanetDraft { mut planet, moons } in star.planets {
                planet.system = system_id;
                planet.star = star_id;
                let planet_id = self.store.save_planet(planet)?;
                planet_count += 1;
                for mut moon in moons {
                    moon.system = system_id;
                    moon.star = star_id;
                    moon.parent = Some(planet_id);
                    self.store.save_planet(moon)?;
                }
            }
        }
        log::info!(
            "Created star system {} at {},{} with {} stars and {} planets",
            draft.name,
            draft.x,
            draft.y,
            star_ids.len(),
            planet_count
        );
        Ok(())
    }

    /// The finished surface of a planet, for a renderer.
    pub fn get_surface_tiles(&self, planet: PlanetId) -> Result<TileGrid, BuildError> {
        Ok(self.store.planet(planet)?.surface.clone())
    }
}
