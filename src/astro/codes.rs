//! Classification codes attached to sectors, systems and planets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Sector classification code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SectorCode {
    /// Core region.
    Co,
    /// Barren.
    Ba,
    /// Frontier.
    Fe,
    /// Low population.
    Lo,
    /// High population.
    Hi,
    /// Sparse: fewer multiple stars, fewer planets.
    Sp,
}

impl SectorCode {
    pub fn symbol(self) -> &'static str {
        match self {
            SectorCode::Co => "Co",
            SectorCode::Ba => "Ba",
            SectorCode::Fe => "Fe",
            SectorCode::Lo => "Lo",
            SectorCode::Hi => "Hi",
            SectorCode::Sp => "Sp",
        }
    }
}

impl FromStr for SectorCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Co" => Ok(SectorCode::Co),
            "Ba" => Ok(SectorCode::Ba),
            "Fe" => Ok(SectorCode::Fe),
            "Lo" => Ok(SectorCode::Lo),
            "Hi" => Ok(SectorCode::Hi),
            "Sp" => Ok(SectorCode::Sp),
            other => Err(format!("unknown sector code '{}'", other)),
        }
    }
}

impl fmt::Display for SectorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Parses a space separated code list such as `"Sp Ba Lo"`.
pub fn parse_sector_codes(codes: &str) -> Result<Vec<SectorCode>, String> {
    let mut out: Vec<SectorCode> = Vec::new();
    for code in codes.split_whitespace() {
        let code = code.parse()?;
        if !out.contains(&code) {
            out.push(code);
        }
    }
    Ok(out)
}

/// Formats codes back into their space separated form.
pub fn format_sector_codes(codes: &[SectorCode]) -> String {
    codes
        .iter()
        .map(|c| c.symbol())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Travel advisory of a star system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Zone {
    #[default]
    Green,
    Amber,
    Red,
}

/// Dominant composition of a planet's atmosphere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AtmosphereType {
    Vacuum,
    Standard,
    LowOxygen,
    HighOxygen,
    Pollutants,
    HighCarbonDioxide,
    CarbonDioxide,
    SulphurCompounds,
    InertGases,
    Hydrogen,
    Primordial,
    WaterVapour,
}

impl AtmosphereType {
    /// How well unprotected humans fare, 0.0 to 1.0.
    pub fn suitability(self) -> f64 {
        match self {
            AtmosphereType::Standard | AtmosphereType::HighOxygen => 1.0,
            AtmosphereType::LowOxygen => 0.75,
            AtmosphereType::Pollutants => 0.5,
            AtmosphereType::HighCarbonDioxide => 0.25,
            _ => 0.0,
        }
    }

    pub fn is_breathable(self) -> bool {
        self.suitability() > 0.1
    }
}

/// Surface pressure band, thinnest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AtmospherePressure {
    None,
    Trace,
    VeryThin,
    Thin,
    Standard,
    Dense,
    VeryDense,
    SuperDense,
}

impl AtmospherePressure {
    const ALL: [AtmospherePressure; 8] = [
        AtmospherePressure::None,
        AtmospherePressure::Trace,
        AtmospherePressure::VeryThin,
        AtmospherePressure::Thin,
        AtmospherePressure::Standard,
        AtmospherePressure::Dense,
        AtmospherePressure::VeryDense,
        AtmospherePressure::SuperDense,
    ];

    pub fn denser(self) -> AtmospherePressure {
        Self::ALL[(self as usize + 1).min(Self::ALL.len() - 1)]
    }

    pub fn thinner(self) -> AtmospherePressure {
        Self::ALL[(self as usize).saturating_sub(1)]
    }

    /// Scale applied to gas resources drawn from the atmosphere.
    pub fn gas_factor(self) -> f64 {
        match self {
            AtmospherePressure::None => 0.0,
            AtmospherePressure::Trace => 0.1,
            AtmospherePressure::VeryThin => 0.25,
            AtmospherePressure::Thin => 0.5,
            AtmospherePressure::Standard => 1.0,
            AtmospherePressure::Dense => 1.5,
            AtmospherePressure::VeryDense => 2.0,
            AtmospherePressure::SuperDense => 2.5,
        }
    }
}

/// Most complex life present, simplest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum LifeType {
    #[default]
    None,
    /// Complex organic chemistry, maybe life.
    Organic,
    /// Single celled life.
    Archaean,
    /// Oxygen producing marine life.
    Aerobic,
    ComplexOcean,
    SimpleLand,
    ComplexLand,
    Extensive,
}

/// Planet trade and feature codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TradeCode {
    /// Barren.
    Ba,
    /// Vacuum world.
    Va,
    /// Asteroid.
    As,
    /// Ice world.
    Ic,
    /// Jovian world.
    Jv,
    /// Water world.
    Wa,
    /// Desert.
    De,
    /// Non-water fluid oceans.
    Fl,
    /// Hospitable.
    H0,
    H1,
    H2,
    H3,
    H4,
    /// Hostile.
    H5,
}

/// Roman numeral for an orbit number, as used in planet names.
pub fn roman(mut n: u32) -> String {
    const NUMERALS: [(u32, &str); 13] = [
        (1000, "M"),
        (900, "CM"),
        (500, "D"),
        (400, "CD"),
        (100, "C"),
        (90, "XC"),
        (50, "L"),
        (40, "XL"),
        (10, "X"),
        (9, "IX"),
        (5, "V"),
        (4, "IV"),
        (1, "I"),
    ];
    let mut out = String::new();
    for (value, numeral) in NUMERALS {
        while n >= value {
            out.push_str(numeral);
            n -= value;
        }
    }
    out
}
