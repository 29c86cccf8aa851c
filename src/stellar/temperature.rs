//! Orbital temperature bands.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Typical surface temperature of an airless body at a given orbit,
/// hottest band first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Temperature {
    /// Rock vaporises.
    UltraHot,
    /// Rock melts.
    ExtremelyHot,
    /// Water boils.
    VeryHot,
    Hot,
    Warm,
    /// Earth.
    Standard,
    Cool,
    Cold,
    VeryCold,
    ExtremelyCold,
    UltraCold,
}

impl Temperature {
    /// All bands, hottest first.
    pub const fn all() -> [Temperature; 11] {
        use Temperature::*;
        [
            UltraHot,
            ExtremelyHot,
            VeryHot,
            Hot,
            Warm,
            Standard,
            Cool,
            Cold,
            VeryCold,
            ExtremelyCold,
            UltraCold,
        ]
    }

    /// Nominal surface temperature in kelvin.
    pub fn kelvin(self) -> u32 {
        match self {
            Temperature::UltraHot => 600,
            Temperature::ExtremelyHot => 400,
            Temperature::VeryHot => 360,
            Temperature::Hot => 330,
            Temperature::Warm => 310,
            Temperature::Standard => 293,
            Temperature::Cool => 273,
            Temperature::Cold => 250,
            Temperature::VeryCold => 200,
            Temperature::ExtremelyCold => 100,
            Temperature::UltraCold => 50,
        }
    }

    /// How comfortable the band is for unprotected humans, 0.0 to 1.0.
    pub fn suitability(self) -> f64 {
        match self {
            Temperature::Standard => 1.0,
            Temperature::Warm => 0.75,
            Temperature::Cool => 0.5,
            Temperature::Hot | Temperature::Cold => 0.1,
            _ => 0.0,
        }
    }

    /// One band hotter, saturating at [`Temperature::UltraHot`].
    pub fn hotter(self) -> Temperature {
        let i = self as usize;
        Temperature::all()[i.saturating_sub(1)]
    }

    /// One band colder, saturating at [`Temperature::UltraCold`].
    pub fn colder(self) -> Temperature {
        let all = Temperature::all();
        all[(self as usize + 1).min(all.len() - 1)]
    }

    pub fn is_hotter_than(self, other: Temperature) -> bool {
        self < other
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
