//! Random selection of star classes and spectral types.

use crate::random::RandomSource;

use super::{Classification, SpectralLetter, SpectralType, StarClass, StarError};

/// Greek suffixes for the stars of one system, in orbit order.
pub const STAR_SUFFIXES: [&str; 3] = ["Alpha", "Beta", "Gamma"];

/// Rolls the size class of a system's primary star.
///
/// Main sequence stars dominate; giants are rare.
pub fn random_primary_class(rng: &mut dyn RandomSource) -> StarClass {
    match rng.roll(3, 6) {
        3 => StarClass::II,
        4 | 5 => StarClass::III,
        6 | 7 => StarClass::IV,
        8..=13 => StarClass::V,
        _ => StarClass::VI,
    }
}

/// Rolls a spectral type suitable for a star of the given class.
pub fn random_spectral_type(class: StarClass, rng: &mut dyn RandomSource) -> SpectralType {
    use SpectralLetter::*;

    let (letter, digit) = match class {
        StarClass::BH => (X, rng.die(6) + 3),
        StarClass::N => (X, rng.die(4) + 5),
        StarClass::D => (D, rng.die(8)),
        StarClass::VI => match rng.die(6) {
            1..=4 => (M, rng.die(10) - 1),
            _ => (L, rng.die(10) - 1),
        },
        StarClass::V => match rng.die(6) {
            1 | 2 => (F, rng.die(10) - 1),
            3 | 4 => (G, rng.die(10) - 1),
            _ => (K, rng.die(10) - 1),
        },
        StarClass::IV => match rng.roll(2, 6) {
            2..=4 => (K, rng.die(6) + 3),
            5..=8 => (M, rng.die(10) - 1),
            9..=11 => (F, rng.die(10) - 1),
            _ => (A, rng.die(6) + 3),
        },
        StarClass::III => match rng.roll(2, 6) {
            2..=5 => (M, rng.die(10) - 1),
            6..=9 => (F, rng.die(6) - 1),
            10 | 11 => (A, rng.die(10) - 1),
            _ => (B, rng.die(6) + 3),
        },
        StarClass::II => match rng.roll(2, 6) {
            2..=9 => (M, rng.die(10) - 1),
            10 | 11 => (A, rng.die(4) - 1),
            _ => (B, rng.die(10) - 1),
        },
        StarClass::Ib => (B, rng.die(10) - 1),
        StarClass::Ia => match rng.die(6) {
            1 | 2 => (O, rng.die(10) - 1),
            _ => (B, rng.die(4) - 1),
        },
    };
    SpectralType::new(letter, digit)
}

/// A star ready to be persisted: its name, classification and distance
/// from the star it orbits (0 for a primary).
#[derive(Debug, Clone, PartialEq)]
pub struct StarSpec {
    pub name: String,
    pub classification: Classification,
    /// Mkm.
    pub distance: f64,
}

/// Rolls the stars of one system.
///
/// The secondary orbits the primary; a tertiary always orbits the
/// secondary. Companions can only be rolled once the star they orbit
/// exists, so each call takes the parent's classification.
#[derive(Debug, Clone)]
pub struct StarGenerator {
    system_name: String,
    star_count: usize,
}

impl StarGenerator {
    pub fn new(system_name: &str, star_count: usize) -> Self {
        Self {
            system_name: system_name.to_string(),
            star_count,
        }
    }

    pub fn star_count(&self) -> usize {
        self.star_count
    }

    fn name(&self, index: usize) -> String {
        format!("{} {}", self.system_name, STAR_SUFFIXES[index])
    }

    pub fn primary(&self, rng: &mut dyn RandomSource) -> StarSpec {
        let class = random_primary_class(rng);
        StarSpec {
            name: self.name(0),
            classification: Classification::new(class, random_spectral_type(class, rng)),
            distance: 0.0,
        }
    }

    /// Rolls a companion of the primary's companion class.
    ///
    /// # Errors
    /// `NotMultiple` for a single star system, `MissingPrimary` when no
    /// primary is given.
    pub fn secondary(
        &self,
        primary: Option<&Classification>,
        rng: &mut dyn RandomSource,
    ) -> Result<StarSpec, StarError> {
        if self.star_count < 2 {
            return Err(StarError::NotMultiple);
        }
        let primary = primary.ok_or(StarError::MissingPrimary)?;
        let class = primary.class.companion();
        Ok(StarSpec {
            name: self.name(1),
            classification: Classification::new(class, random_spectral_type(class, rng)),
            distance: f64::from(200 + 100 * rng.roll(2, 10)),
        })
    }

    /// Rolls a white dwarf in close orbit around the secondary.
    pub fn tertiary(
        &self,
        secondary: Option<&Classification>,
        rng: &mut dyn RandomSource,
    ) -> Result<StarSpec, StarError> {
        if self.star_count < 3 {
            return Err(StarError::NotMultiple);
        }
        secondary.ok_or(StarError::MissingSecondary)?;
        let class = StarClass::D;
        Ok(StarSpec {
            name: self.name(2),
            classification: Classification::new(class, random_spectral_type(class, rng)),
            distance: f64::from(rng.roll(2, 10) * 5 + 5),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{Dice, Scripted};

    #[test]
    fn test_main_sequence_is_fgk() {
        let mut dice = Dice::seeded(3);
        for _ in 0..200 {
            let t = random_spectral_type(StarClass::V, &mut dice);
            assert!(matches!(t.letter, SpectralLetter::F | SpectralLetter::G | SpectralLetter::K));
            assert!(t.digit <= 9);
        }
    }

    #[test]
    fn test_primary_class_table() {
        assert_eq!(random_primary_class(&mut Scripted::new(&[1, 1, 1])), StarClass::II);
        assert_eq!(random_primary_class(&mut Scripted::new(&[3, 3, 4])), StarClass::V);
        assert_eq!(random_primary_class(&mut Scripted::new(&[6, 6, 6])), StarClass::VI);
    }

    #[test]
    fn test_white_dwarf_spectral() {
        let t = random_spectral_type(StarClass::D, &mut Scripted::new(&[7]));
        assert_eq!(t.to_string(), "D7");
    }

    #[test]
    fn test_single_star_has_no_companion() {
        let gen = StarGenerator::new("Tau", 1);
        let primary = gen.primary(&mut Dice::seeded(1));
        assert_eq!(primary.name, "Tau Alpha");
        assert_eq!(primary.distance, 0.0);
        assert_eq!(
            gen.secondary(Some(&primary.classification), &mut Dice::seeded(1)),
            Err(StarError::NotMultiple)
        );
    }

    #[test]
    fn test_companions_need_parents() {
        let gen = StarGenerator::new("Tau", 3);
        let mut dice = Dice::seeded(5);
        assert_eq!(gen.secondary(None, &mut dice), Err(StarError::MissingPrimary));
        assert_eq!(gen.tertiary(None, &mut dice), Err(StarError::MissingSecondary));

        let primary = gen.primary(&mut dice);
        let secondary = gen.secondary(Some(&primary.classification), &mut dice).unwrap();
        assert!(secondary.distance >= 400.0);
        assert_eq!(secondary.classification.class, primary.classification.class.companion());

        let tertiary = gen.tertiary(Some(&secondary.classification), &mut dice).unwrap();
        assert_eq!(tertiary.classification.class, StarClass::D);
        assert!((15.0..=105.0).contains(&tertiary.distance));
        assert_eq!(tertiary.name, "Tau Gamma");
    }
}
