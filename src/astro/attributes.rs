//! Physical attributes of a planet, rolled per archetype.

use crate::random::RandomSource;
use crate::stellar::Temperature;
use crate::terrain::PlanetArchetype;

use super::codes::{AtmospherePressure, AtmosphereType, LifeType, TradeCode};

/// Everything about a planet that is decided before its terrain.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanetAttributes {
    /// km.
    pub radius: u32,
    /// Orbit temperature, possibly shifted by the atmosphere.
    pub temperature: Temperature,
    pub atmosphere: AtmosphereType,
    pub pressure: AtmospherePressure,
    pub hydrographics: u32,
    pub life: LifeType,
    pub trade_codes: Vec<TradeCode>,
    /// Seconds.
    pub day_length: u32,
    /// Degrees.
    pub axial_tilt: u32,
}

impl PlanetAttributes {
    fn airless(radius: u32, temperature: Temperature) -> Self {
        Self {
            radius,
            temperature,
            atmosphere: AtmosphereType::Vacuum,
            pressure: AtmospherePressure::None,
            hydrographics: 0,
            life: LifeType::None,
            trade_codes: Vec::new(),
            day_length: 0,
            axial_tilt: 0,
        }
    }

    fn add_code(&mut self, code: TradeCode) {
        if !self.trade_codes.contains(&code) {
            self.trade_codes.push(code);
        }
    }

    /// Rolls the attributes of a planet of `archetype` at an orbit of the
    /// given temperature.
    pub fn roll(
        archetype: PlanetArchetype,
        temperature: Temperature,
        rng: &mut dyn RandomSource,
    ) -> Self {
        let radius = match archetype {
            PlanetArchetype::AsteroidBelt => rng.roll(2, 4) as u32,
            _ => {
                let base = archetype.base_radius();
                base / 2 + rng.roll(2, base) as u32 / 2
            }
        };
        let mut attrs = Self::airless(radius, temperature);
        attrs.day_length = (rng.roll(2, 6) * 10_000 + rng.die(30_000)) as u32;
        attrs.axial_tilt = rng.roll(3, 10) as u32;

        match archetype {
            PlanetArchetype::Hermian | PlanetArchetype::Ferrinian | PlanetArchetype::Hadean => {
                attrs.rocky(archetype)
            }
            PlanetArchetype::Cytherean => attrs.cytherean(rng),
            PlanetArchetype::Arean => attrs.arean(rng),
            PlanetArchetype::MesoArean => attrs.meso_arean(rng),
            PlanetArchetype::Gaian => attrs.gaian(rng),
            PlanetArchetype::Europan => attrs.europan(rng),
            PlanetArchetype::EuJovian | PlanetArchetype::SubJovian | PlanetArchetype::CryoJovian => {
                attrs.jovian(rng)
            }
            PlanetArchetype::AsteroidBelt => {
                attrs.axial_tilt = 0;
                attrs.day_length = 0;
                attrs.add_code(TradeCode::As);
                attrs.add_code(TradeCode::H4);
            }
        }
        attrs
    }

    fn rocky(&mut self, archetype: PlanetArchetype) {
        if archetype == PlanetArchetype::Hermian && self.radius > 3000 {
            self.atmosphere = AtmosphereType::InertGases;
            self.pressure = AtmospherePressure::Trace;
            self.add_code(TradeCode::Ba);
        } else {
            self.add_code(TradeCode::Va);
        }
        if self.temperature.is_hotter_than(Temperature::ExtremelyHot) {
            self.add_code(TradeCode::H4);
        } else {
            self.add_code(TradeCode::H3);
        }
    }

    fn cytherean(&mut self, rng: &mut dyn RandomSource) {
        self.atmosphere = match rng.roll(2, 6) {
            2..=4 => AtmosphereType::SulphurCompounds,
            5..=9 => AtmosphereType::CarbonDioxide,
            _ => AtmosphereType::InertGases,
        };
        // Runaway greenhouse.
        (self.pressure, self.temperature) = match rng.die(6) {
            1 | 2 => (AtmospherePressure::Dense, Temperature::VeryHot),
            3..=5 => (AtmospherePressure::VeryDense, Temperature::VeryHot),
            _ => (AtmospherePressure::SuperDense, Temperature::ExtremelyHot),
        };
        self.add_code(TradeCode::H5);
    }

    fn arean(&mut self, rng: &mut dyn RandomSource) {
        self.add_code(TradeCode::Ba);
        self.add_code(TradeCode::H3);
        if self.radius > 4000 {
            self.pressure = AtmospherePressure::Thin;
            self.atmosphere = AtmosphereType::CarbonDioxide;
            self.temperature = self.temperature.hotter();
        } else if self.radius > 3000 {
            self.pressure = AtmospherePressure::VeryThin;
            self.atmosphere = AtmosphereType::CarbonDioxide;
        } else if self.radius > 2000 {
            self.pressure = AtmospherePressure::Trace;
            self.atmosphere = match rng.die(2) {
                1 => AtmosphereType::CarbonDioxide,
                _ => AtmosphereType::InertGases,
            };
        }
        if !self.temperature.is_hotter_than(Temperature::Cold) {
            self.add_code(TradeCode::Ic);
        }
    }

    fn meso_arean(&mut self, rng: &mut dyn RandomSource) {
        self.day_length = (50_000 + rng.roll(5, 10_000)) as u32;
        self.atmosphere = AtmosphereType::Primordial;
        self.pressure = if self.radius > 4000 {
            AtmospherePressure::Standard
        } else if self.radius > 2700 {
            AtmospherePressure::Thin
        } else {
            AtmospherePressure::VeryThin
        };
        self.add_code(TradeCode::H3);

        match rng.roll(3, 6) {
            17 | 18 => {
                self.life = LifeType::SimpleLand;
                self.atmosphere = match rng.die(6) {
                    1 | 2 => AtmosphereType::LowOxygen,
                    3 | 4 => AtmosphereType::HighCarbonDioxide,
                    5 => AtmosphereType::Pollutants,
                    _ => AtmosphereType::Standard,
                };
            }
            14..=16 => {
                self.life = LifeType::ComplexOcean;
                self.atmosphere = match rng.die(8) {
                    1..=3 => AtmosphereType::LowOxygen,
                    4 | 5 => AtmosphereType::HighCarbonDioxide,
                    6 => AtmosphereType::Pollutants,
                    7 => AtmosphereType::InertGases,
                    _ => AtmosphereType::Standard,
                };
            }
            10..=13 => {
                self.life = LifeType::Aerobic;
                match rng.die(4) {
                    1 => self.atmosphere = AtmosphereType::LowOxygen,
                    2 => self.atmosphere = AtmosphereType::Pollutants,
                    _ => {}
                }
            }
            8 | 9 => self.life = LifeType::Archaean,
            6 | 7 => self.life = LifeType::Organic,
            _ => {}
        }
    }

    fn gaian(&mut self, rng: &mut dyn RandomSource) {
        let mut modifier = 0;

        self.atmosphere = match rng.roll(3, 6) {
            3 | 4 => {
                modifier -= 1;
                AtmosphereType::LowOxygen
            }
            5..=7 => {
                modifier -= 1;
                AtmosphereType::Pollutants
            }
            14..=16 => {
                modifier += 1;
                AtmosphereType::HighOxygen
            }
            17 | 18 => {
                modifier -= 1;
                AtmosphereType::HighCarbonDioxide
            }
            _ => AtmosphereType::Standard,
        };

        self.pressure = match rng.roll(2, 6) + (self.radius / 2000) as i32 {
            3 | 4 => {
                modifier -= 2;
                AtmospherePressure::VeryThin
            }
            5..=7 => {
                modifier -= 1;
                AtmospherePressure::Thin
            }
            14..=16 => AtmospherePressure::Dense,
            17 | 18 => {
                modifier -= 1;
                AtmospherePressure::VeryDense
            }
            _ => AtmospherePressure::Standard,
        };

        // Greenhouse warming.
        self.temperature = self.temperature.hotter();
        self.hydrographics = (15 + rng.roll(4, 20)).clamp(0, 100) as u32;
        if self.hydrographics > 50 && self.hydrographics < 85 {
            modifier += 1;
        }
        if self.temperature == Temperature::Warm {
            modifier += 1;
        }

        let (code, life) = if modifier < -2 {
            (TradeCode::H2, LifeType::SimpleLand)
        } else if modifier < 0 {
            (TradeCode::H1, LifeType::ComplexLand)
        } else {
            (TradeCode::H0, LifeType::Extensive)
        };
        self.add_code(code);
        self.life = life;
    }

    fn europan(&mut self, rng: &mut dyn RandomSource) {
        if self.radius > 3000 {
            self.pressure = AtmospherePressure::Trace;
            self.atmosphere = AtmosphereType::InertGases;
            self.add_code(TradeCode::Ba);
        } else {
            self.add_code(TradeCode::Va);
        }
        self.add_code(TradeCode::Ic);
        self.add_code(TradeCode::H3);
        self.life = match rng.roll(3, 6) {
            3 => LifeType::Aerobic,
            4 | 5 => LifeType::Archaean,
            6..=8 => LifeType::Organic,
            _ => LifeType::None,
        };
    }

    fn jovian(&mut self, rng: &mut dyn RandomSource) {
        self.atmosphere = AtmosphereType::Hydrogen;
        self.pressure = AtmospherePressure::SuperDense;
        self.day_length = (2000 + rng.die(100) * 1000 + rng.die(10_000)) as u32;
        self.axial_tilt = rng.die(10) as u32;
        if self.axial_tilt == 10 {
            self.axial_tilt = rng.roll(3, 10) as u32;
        }
        if self.axial_tilt == 30 {
            self.axial_tilt = rng.roll(3, 20) as u32;
        }
        self.add_code(TradeCode::Jv);
        self.add_code(TradeCode::H5);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{Dice, Scripted};

    #[test]
    fn test_radius_around_base() {
        let mut dice = Dice::seeded(6);
        for archetype in PlanetArchetype::all() {
            let attrs = PlanetAttributes::roll(archetype, Temperature::Standard, &mut dice);
            if archetype != PlanetArchetype::AsteroidBelt {
                let base = archetype.base_radius();
                assert!(attrs.radius >= base / 2 + 1, "{}", archetype);
                assert!(attrs.radius <= base * 3 / 2, "{}", archetype);
            }
            assert!(attrs.hydrographics <= 100);
        }
    }

    #[test]
    fn test_gaian_ideal_world_is_extensive() {
        // All fives: 3d6 = 15 is oxygen rich, 2d6 + 1 = 11 is standard
        // pressure, hydrographics 15 + 20.
        let mut faces = Scripted::new(&[5]);
        let attrs = PlanetAttributes::roll(PlanetArchetype::Gaian, Temperature::Cool, &mut faces);
        assert_eq!(attrs.atmosphere, AtmosphereType::HighOxygen);
        assert_eq!(attrs.pressure, AtmospherePressure::Standard);
        assert_eq!(attrs.temperature, Temperature::Standard);
        assert_eq!(attrs.hydrographics, 35);
        assert!(attrs.trade_codes.contains(&TradeCode::H0));
        assert_eq!(attrs.life, LifeType::Extensive);
    }

    #[test]
    fn test_gaian_hostile_world_is_simple() {
        // All ones: low oxygen and very thin air.
        let mut faces = Scripted::new(&[1]);
        let attrs = PlanetAttributes::roll(PlanetArchetype::Gaian, Temperature::Cool, &mut faces);
        assert_eq!(attrs.atmosphere, AtmosphereType::LowOxygen);
        assert_eq!(attrs.pressure, AtmospherePressure::VeryThin);
        assert_eq!(attrs.life, LifeType::SimpleLand);
        assert!(attrs.trade_codes.contains(&TradeCode::H2));
    }

    #[test]
    fn test_jovian_is_hydrogen() {
        let attrs =
            PlanetAttributes::roll(PlanetArchetype::EuJovian, Temperature::VeryCold, &mut Dice::seeded(1));
        assert_eq!(attrs.atmosphere, AtmosphereType::Hydrogen);
        assert!(attrs.trade_codes.contains(&TradeCode::Jv));
        assert!(attrs.axial_tilt >= 1);
    }

    #[test]
    fn test_cytherean_runs_hot() {
        let attrs =
            PlanetAttributes::roll(PlanetArchetype::Cytherean, Temperature::Hot, &mut Dice::seeded(2));
        assert!(attrs.temperature.is_hotter_than(Temperature::Hot));
        assert!(attrs.pressure >= AtmospherePressure::Dense);
    }

    #[test]
    fn test_trade_codes_unique() {
        let mut dice = Dice::seeded(11);
        for archetype in PlanetArchetype::all() {
            let attrs = PlanetAttributes::roll(archetype, Temperature::Cold, &mut dice);
            let mut codes = attrs.trade_codes.clone();
            codes.sort();
            codes.dedup();
            assert_eq!(codes.len(), attrs.trade_codes.len());
        }
    }
}
