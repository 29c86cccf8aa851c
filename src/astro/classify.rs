//! Picks a planet's archetype from its orbit temperature.

use crate::random::RandomSource;
use crate::stellar::Temperature;
use crate::terrain::PlanetArchetype;

/// Weighted archetype choices per temperature band.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanetClassifier;

impl PlanetClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Archetypes that can form in a band, with their relative weights.
    pub fn candidates(&self, temperature: Temperature) -> &'static [(PlanetArchetype, u32)] {
        use PlanetArchetype::*;
        match temperature {
            Temperature::UltraHot | Temperature::ExtremelyHot => {
                &[(Hermian, 1), (Ferrinian, 4), (Hadean, 1)]
            }
            Temperature::VeryHot => &[(Hermian, 3), (Ferrinian, 3)],
            Temperature::Hot => &[(Hermian, 2), (Cytherean, 4)],
            Temperature::Warm => &[(Hermian, 2), (Cytherean, 3), (MesoArean, 1)],
            Temperature::Standard => &[(Gaian, 4), (MesoArean, 1), (Arean, 1)],
            Temperature::Cool => &[(Gaian, 2), (Arean, 3), (MesoArean, 1)],
            Temperature::Cold => &[(Arean, 4), (AsteroidBelt, 2)],
            Temperature::VeryCold => &[(EuJovian, 4), (SubJovian, 2), (AsteroidBelt, 1)],
            Temperature::ExtremelyCold => &[(SubJovian, 1), (CryoJovian, 3)],
            Temperature::UltraCold => &[(CryoJovian, 3), (Hadean, 1)],
        }
    }

    pub fn classify(&self, temperature: Temperature, rng: &mut dyn RandomSource) -> PlanetArchetype {
        let candidates = self.candidates(temperature);
        let total: u32 = candidates.iter().map(|(_, w)| w).sum();
        let mut roll = rng.die(total) as u32;
        for &(archetype, weight) in candidates {
            if roll <= weight {
                return archetype;
            }
            roll -= weight;
        }
        candidates[candidates.len() - 1].0
    }

    /// Archetype of the moons a planet carries, if any.
    pub fn moon_archetype(&self, planet: PlanetArchetype) -> Option<PlanetArchetype> {
        planet.is_jovian().then_some(PlanetArchetype::Europan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{Dice, Scripted};
    use crate::terrain::Category;

    #[test]
    fn test_hot_bands_are_rock() {
        let classifier = PlanetClassifier::new();
        let mut dice = Dice::seeded(8);
        for _ in 0..100 {
            let a = classifier.classify(Temperature::UltraHot, &mut dice);
            assert!(matches!(
                a.category(),
                Category::Terrestrial | Category::Dwarf
            ));
            assert_ne!(a, PlanetArchetype::Gaian);
        }
    }

    #[test]
    fn test_weights_walk_in_order() {
        let classifier = PlanetClassifier::new();
        // Standard: Gaian 1..=4, MesoArean 5, Arean 6.
        assert_eq!(
            classifier.classify(Temperature::Standard, &mut Scripted::new(&[4])),
            PlanetArchetype::Gaian
        );
        assert_eq!(
            classifier.classify(Temperature::Standard, &mut Scripted::new(&[5])),
            PlanetArchetype::MesoArean
        );
        assert_eq!(
            classifier.classify(Temperature::Standard, &mut Scripted::new(&[6])),
            PlanetArchetype::Arean
        );
    }

    #[test]
    fn test_every_band_has_candidates() {
        let classifier = PlanetClassifier::new();
        for t in Temperature::all() {
            assert!(!classifier.candidates(t).is_empty(), "{}", t);
        }
    }

    #[test]
    fn test_jovians_have_moons() {
        let classifier = PlanetClassifier::new();
        assert_eq!(
            classifier.moon_archetype(PlanetArchetype::SubJovian),
            Some(PlanetArchetype::Europan)
        );
        assert_eq!(classifier.moon_archetype(PlanetArchetype::Gaian), None);
    }
}
