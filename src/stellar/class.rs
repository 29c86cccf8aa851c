//! Star size classes and physical forms.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::StarError;

/// Luminosity (size) class of a star, smallest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StarClass {
    /// Black hole
    BH,
    /// Neutron star
    N,
    /// White dwarf
    D,
    /// Sub dwarf
    VI,
    /// Main sequence
    V,
    /// Sub giant
    IV,
    /// Giant
    III,
    /// Bright giant
    II,
    /// Supergiant
    Ib,
    /// Bright supergiant
    Ia,
}

impl StarClass {
    /// Returns all classes, smallest first.
    pub const fn all() -> [StarClass; 10] {
        [
            StarClass::BH,
            StarClass::N,
            StarClass::D,
            StarClass::VI,
            StarClass::V,
            StarClass::IV,
            StarClass::III,
            StarClass::II,
            StarClass::Ib,
            StarClass::Ia,
        ]
    }

    /// Radius as a multiple of Sol's.
    pub fn radius(self) -> f64 {
        match self {
            StarClass::BH => 0.000_000_1,
            StarClass::N => 0.000_001,
            StarClass::D => 0.001,
            StarClass::VI => 0.5,
            StarClass::V => 1.0,
            StarClass::IV => 2.0,
            StarClass::III => 10.0,
            StarClass::II => 25.0,
            StarClass::Ib => 50.0,
            StarClass::Ia => 100.0,
        }
    }

    /// Relative symbol size for star maps.
    pub fn map_size(self) -> f64 {
        match self {
            StarClass::BH => 0.2,
            StarClass::N => 0.3,
            StarClass::D => 0.5,
            StarClass::VI => 0.7,
            StarClass::V => 1.0,
            StarClass::IV => 1.1,
            StarClass::III => 1.2,
            StarClass::II => 1.3,
            StarClass::Ib => 1.4,
            StarClass::Ia => 1.5,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            StarClass::BH => "Black Hole",
            StarClass::N => "Neutron Star",
            StarClass::D => "White Dwarf",
            StarClass::VI => "Sub Dwarf",
            StarClass::V => "Main Sequence",
            StarClass::IV => "Sub Giant",
            StarClass::III => "Giant",
            StarClass::II => "Large Giant",
            StarClass::Ib | StarClass::Ia => "Super Giant",
        }
    }

    /// Returns the class of a typical companion, never smaller than a white dwarf.
    pub fn companion(self) -> StarClass {
        match self {
            StarClass::BH | StarClass::N | StarClass::D | StarClass::VI => StarClass::D,
            StarClass::V => StarClass::VI,
            StarClass::IV | StarClass::III => StarClass::V,
            StarClass::II | StarClass::Ib | StarClass::Ia => StarClass::III,
        }
    }

    /// Physical form implied by this class.
    pub fn form(self) -> StarForm {
        match self {
            StarClass::BH => StarForm::BlackHole,
            StarClass::N => StarForm::NeutronStar,
            StarClass::D => StarForm::WhiteDwarf,
            _ => StarForm::Star,
        }
    }
}

impl fmt::Display for StarClass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            StarClass::BH => "BH",
            StarClass::N => "N",
            StarClass::D => "D",
            StarClass::VI => "VI",
            StarClass::V => "V",
            StarClass::IV => "IV",
            StarClass::III => "III",
            StarClass::II => "II",
            StarClass::Ib => "Ib",
            StarClass::Ia => "Ia",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for StarClass {
    type Err = StarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StarClass::all()
            .into_iter()
            .find(|c| c.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| StarError::ParseClass(s.to_string()))
    }
}

/// What kind of object sits at the centre of a star's orbits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StarForm {
    Star,
    WhiteDwarf,
    NeutronStar,
    BlackHole,
}

impl fmt::Display for StarForm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            StarForm::Star => "Star",
            StarForm::WhiteDwarf => "White Dwarf",
            StarForm::NeutronStar => "Neutron Star",
            StarForm::BlackHole => "Black Hole",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_companion_is_never_bigger() {
        for class in StarClass::all() {
            assert!(class.companion() <= class || class.companion() == StarClass::D);
        }
        assert_eq!(StarClass::V.companion(), StarClass::VI);
        assert_eq!(StarClass::Ia.companion(), StarClass::III);
    }

    #[test]
    fn test_class_parse_round_trip() {
        for class in StarClass::all() {
            assert_eq!(class.to_string().parse::<StarClass>().unwrap(), class);
        }
        assert!("VII".parse::<StarClass>().is_err());
    }

    #[test]
    fn test_radius_grows_with_class() {
        let radii: Vec<f64> = StarClass::all().iter().map(|c| c.radius()).collect();
        assert!(radii.windows(2).all(|w| w[0] < w[1]));
    }
}
