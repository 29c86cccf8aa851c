//! Rolls a planet's resource list from its classification.

use serde::{Deserialize, Serialize};

use crate::astro::{AtmospherePressure, AtmosphereType, LifeType};
use crate::random::RandomSource;
use crate::stellar::Temperature;
use crate::terrain::PlanetArchetype;

use super::rules::{Amount, Condition, Entry, Rule};
use super::tables::{archetype_table, ecology_table};

/// Lowest density a listed resource can have.
pub const MIN_DENSITY: i32 = 1;
/// Highest density a listed resource can have.
pub const MAX_DENSITY: i32 = 100;

/// A commodity found on a planet, with its density (1 to 100).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub commodity: String,
    pub density: u8,
}

/// The classification fields resource rules read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResourceProfile {
    pub archetype: PlanetArchetype,
    pub atmosphere: AtmosphereType,
    pub pressure: AtmospherePressure,
    /// Surface water, 0 to 100.
    pub hydrographics: u32,
    pub life: LifeType,
    pub temperature: Temperature,
}

/// Applies the archetype and ecology tables to a profile.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResourceAssigner;

impl ResourceAssigner {
    pub fn new() -> Self {
        Self
    }

    /// Rolls every applicable rule and returns the resources in the order
    /// they were first added.
    ///
    /// Rules that produce zero or less are dropped. A commodity added twice
    /// keeps one entry whose density is the sum, clamped to 1..=100.
    pub fn assign(&self, profile: &ResourceProfile, rng: &mut dyn RandomSource) -> Vec<Resource> {
        let mut totals: Vec<(&'static str, i32)> = Vec::new();
        apply(archetype_table(profile.archetype), profile, rng, &mut totals);
        apply(
            ecology_table(profile.archetype, profile.life),
            profile,
            rng,
            &mut totals,
        );

        let resources: Vec<Resource> = totals
            .into_iter()
            .filter(|(_, density)| *density >= MIN_DENSITY)
            .map(|(commodity, density)| Resource {
                commodity: commodity.to_string(),
                density: density.clamp(MIN_DENSITY, MAX_DENSITY) as u8,
            })
            .collect();
        log::debug!(
            "{} resources for {} world",
            resources.len(),
            profile.archetype
        );
        resources
    }
}

fn apply(
    entries: &[Entry],
    profile: &ResourceProfile,
    rng: &mut dyn RandomSource,
    totals: &mut Vec<(&'static str, i32)>,
) {
    for entry in entries {
        match entry {
            Entry::Add(rule) => {
                if let Some(density) = evaluate(rule, profile, rng) {
                    add(totals, rule.resource, density);
                }
            }
            Entry::Pick {
                dice,
                sides,
                branches,
            } => {
                let result = rng.roll(*dice, *sides);
                if let Some(branch) = branches
                    .iter()
                    .find(|b| (b.low..=b.high).contains(&result))
                {
                    apply(branch.entries, profile, rng, totals);
                }
            }
        }
    }
}

/// Density produced by a rule, or `None` when it does not apply.
fn evaluate(rule: &Rule, profile: &ResourceProfile, rng: &mut dyn RandomSource) -> Option<i32> {
    let applies = match rule.condition {
        Condition::Always => true,
        Condition::OneIn(n) => rng.die(n) == 1,
        Condition::AtmosphereIs(a) => profile.atmosphere == a,
        Condition::AtmosphereIsNot(a) => profile.atmosphere != a,
        Condition::MinHydrographics(h) => profile.hydrographics >= h,
        Condition::LifeAtLeast(l) => profile.life >= l,
        Condition::NoWarmerThan(t) => !profile.temperature.is_hotter_than(t),
    };
    if !applies {
        return None;
    }

    let density = match rule.amount {
        Amount::Roll { base, dice, sides } => base + rng.roll(dice, sides),
        Amount::Hydrographics => profile.hydrographics.min(MAX_DENSITY as u32) as i32,
        Amount::PressureScaled(base) => (base as f64 * profile.pressure.gas_factor()).round() as i32,
    };
    (density > 0).then_some(density)
}

fn add(totals: &mut Vec<(&'static str, i32)>, resource: &'static str, density: i32) {
    match totals.iter_mut().find(|(name, _)| *name == resource) {
        Some((_, total)) => *total = (*total + density).min(MAX_DENSITY),
        None => totals.push((resource, density)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{Dice, Scripted};
    use proptest::prelude::*;

    fn barren(archetype: PlanetArchetype, temperature: Temperature) -> ResourceProfile {
        ResourceProfile {
            archetype,
            atmosphere: AtmosphereType::Vacuum,
            pressure: AtmospherePressure::None,
            hydrographics: 0,
            life: LifeType::None,
            temperature,
        }
    }

    fn gaian(life: LifeType) -> ResourceProfile {
        ResourceProfile {
            archetype: PlanetArchetype::Gaian,
            atmosphere: AtmosphereType::Standard,
            pressure: AtmospherePressure::Standard,
            hydrographics: 70,
            life,
            temperature: Temperature::Standard,
        }
    }

    fn density(resources: &[Resource], name: &str) -> Option<u8> {
        resources
            .iter()
            .find(|r| r.commodity == name)
            .map(|r| r.density)
    }

    #[test]
    fn test_gaian_water_follows_hydrographics() {
        let resources = ResourceAssigner::new().assign(&gaian(LifeType::None), &mut Dice::seeded(4));
        assert_eq!(density(&resources, "Water"), Some(70));
        assert_eq!(density(&resources, "Oxygen"), Some(40));
    }

    #[test]
    fn test_low_oxygen_halves_oxygen() {
        let profile = ResourceProfile {
            atmosphere: AtmosphereType::LowOxygen,
            ..gaian(LifeType::None)
        };
        let resources = ResourceAssigner::new().assign(&profile, &mut Dice::seeded(4));
        assert_eq!(density(&resources, "Oxygen"), Some(20));
    }

    #[test]
    fn test_dry_world_lists_no_water() {
        let profile = barren(PlanetArchetype::Arean, Temperature::Warm);
        let resources = ResourceAssigner::new().assign(&profile, &mut Dice::seeded(9));
        assert_eq!(density(&resources, "Water"), None);
        assert_eq!(density(&resources, "Water Ice"), None);
    }

    #[test]
    fn test_cold_arean_has_ice() {
        let profile = barren(PlanetArchetype::Arean, Temperature::VeryCold);
        let resources = ResourceAssigner::new().assign(&profile, &mut Dice::seeded(9));
        assert!(density(&resources, "Water Ice").is_some());
    }

    #[test]
    fn test_one_in_rules_need_a_one() {
        // Every die shows its highest face: no "one in n" rule fires.
        let profile = barren(PlanetArchetype::Hermian, Temperature::Hot);
        let resources = ResourceAssigner::new().assign(&profile, &mut Scripted::new(&[100]));
        assert_eq!(density(&resources, "Rare Metals"), None);
        assert_eq!(density(&resources, "Silicate Crystals"), None);
        // 30 + 3d20 at maximum is 90.
        assert_eq!(density(&resources, "Silicate Ore"), Some(90));
    }

    #[test]
    fn test_duplicates_accumulate() {
        let mut totals = Vec::new();
        add(&mut totals, "Fish", 60);
        add(&mut totals, "Fish", 70);
        add(&mut totals, "Algae", 3);
        assert_eq!(totals, vec![("Fish", 100), ("Algae", 3)]);
    }

    #[test]
    fn test_vacuum_has_no_pressure_gas() {
        let profile = ResourceProfile {
            atmosphere: AtmosphereType::SulphurCompounds,
            pressure: AtmospherePressure::None,
            ..barren(PlanetArchetype::Cytherean, Temperature::VeryHot)
        };
        let resources = ResourceAssigner::new().assign(&profile, &mut Dice::seeded(2));
        assert_eq!(density(&resources, "Sulphur Compounds"), None);
    }

    proptest! {
        #[test]
        fn test_densities_in_range(seed in any::<u64>(), a in 0usize..12, l in 0usize..8) {
            let lives = [
                LifeType::None,
                LifeType::Organic,
                LifeType::Archaean,
                LifeType::Aerobic,
                LifeType::ComplexOcean,
                LifeType::SimpleLand,
                LifeType::ComplexLand,
                LifeType::Extensive,
            ];
            let profile = ResourceProfile {
                archetype: PlanetArchetype::all()[a],
                life: lives[l],
                ..gaian(LifeType::None)
            };
            let resources = ResourceAssigner::new().assign(&profile, &mut Dice::seeded(seed));
            for r in &resources {
                prop_assert!((1..=100).contains(&r.density));
            }
            let mut names: Vec<_> = resources.iter().map(|r| r.commodity.as_str()).collect();
            names.sort_unstable();
            names.dedup();
            prop_assert_eq!(names.len(), resources.len());
        }
    }
}
