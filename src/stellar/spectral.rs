//! Spectral types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::StarError;

/// Spectral letter, hottest conventional class first.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpectralLetter {
    O,
    B,
    A,
    F,
    G,
    K,
    M,
    // Brown dwarfs
    L,
    T,
    Y,
    /// White dwarf
    D,
    /// X-ray source (neutron stars, black holes)
    X,
}

impl SpectralLetter {
    pub const fn all() -> [SpectralLetter; 12] {
        use SpectralLetter::*;
        [O, B, A, F, G, K, M, L, T, Y, D, X]
    }

    fn symbol(self) -> char {
        match self {
            SpectralLetter::O => 'O',
            SpectralLetter::B => 'B',
            SpectralLetter::A => 'A',
            SpectralLetter::F => 'F',
            SpectralLetter::G => 'G',
            SpectralLetter::K => 'K',
            SpectralLetter::M => 'M',
            SpectralLetter::L => 'L',
            SpectralLetter::T => 'T',
            SpectralLetter::Y => 'Y',
            SpectralLetter::D => 'D',
            SpectralLetter::X => 'X',
        }
    }
}

/// A spectral letter plus a subtype digit 0-9 (0 hottest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpectralType {
    pub letter: SpectralLetter,
    pub digit: u8,
}

impl SpectralType {
    /// Sol's spectral type, the reference for the solar constant.
    pub const G2: SpectralType = SpectralType { letter: SpectralLetter::G, digit: 2 };

    /// Creates a spectral type, clamping the digit to 0-9.
    pub fn new(letter: SpectralLetter, digit: i32) -> Self {
        Self {
            letter,
            digit: digit.clamp(0, 9) as u8,
        }
    }

    /// Surface temperature in kelvin.
    pub fn surface_temperature(&self) -> u32 {
        // Higher digits are cooler, so work from the inverse.
        let i = 9 - self.digit as u32;
        match self.letter {
            SpectralLetter::M => 2000 + i * 170,
            SpectralLetter::K => 3700 + i * 150,
            SpectralLetter::G => 5200 + i * 80,
            SpectralLetter::F => 6000 + i * 150,
            SpectralLetter::A => 7500 + i * 250,
            SpectralLetter::B => 10_000 + i * 2000,
            SpectralLetter::O => 30_000 + i * 5000,
            SpectralLetter::L => 1300 + i * 70,
            SpectralLetter::T => 600 + i * 70,
            SpectralLetter::Y => 300 + i * 60,
            SpectralLetter::D => 1000 + i * i * 1500,
            SpectralLetter::X => 1000 + i * i * i * 2000,
        }
    }

    /// Mass relative to Sol.
    pub fn mass(&self) -> f64 {
        match self.letter {
            SpectralLetter::O => 50.0,
            SpectralLetter::B => 10.0,
            SpectralLetter::A => 2.0,
            SpectralLetter::F => 1.4,
            SpectralLetter::G => 1.0,
            SpectralLetter::K => 0.7,
            SpectralLetter::M => 0.25,
            SpectralLetter::L => 0.08,
            SpectralLetter::T => 0.05,
            SpectralLetter::Y => 0.02,
            SpectralLetter::D => 0.6,
            SpectralLetter::X => 1.4,
        }
    }

    /// Approximate visible colour.
    pub fn rgb(&self) -> [u8; 3] {
        match self.letter {
            SpectralLetter::O => [155, 176, 255],
            SpectralLetter::B => [170, 191, 255],
            SpectralLetter::A => [202, 215, 255],
            SpectralLetter::F => [248, 247, 255],
            SpectralLetter::G => [255, 244, 234],
            SpectralLetter::K => [255, 210, 161],
            SpectralLetter::M => [255, 204, 111],
            SpectralLetter::L => [200, 90, 60],
            SpectralLetter::T => [140, 60, 90],
            SpectralLetter::Y => [90, 40, 70],
            SpectralLetter::D => [240, 240, 255],
            SpectralLetter::X => [120, 120, 200],
        }
    }
}

impl fmt::Display for SpectralType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.letter.symbol(), self.digit)
    }
}

impl FromStr for SpectralType {
    type Err = StarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        let (Some(symbol), Some(digit), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(StarError::ParseSpectral(s.to_string()));
        };
        let letter = SpectralLetter::all()
            .into_iter()
            .find(|l| l.symbol() == symbol.to_ascii_uppercase())
            .ok_or_else(|| StarError::ParseSpectral(s.to_string()))?;
        let digit = digit
            .to_digit(10)
            .ok_or_else(|| StarError::ParseSpectral(s.to_string()))?;
        Ok(SpectralType::new(letter, digit as i32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sol_temperature() {
        assert_eq!(SpectralType::G2.surface_temperature(), 5760);
    }

    #[test]
    fn test_digit_orders_temperature() {
        for letter in SpectralLetter::all() {
            let hot = SpectralType::new(letter, 0).surface_temperature();
            let cool = SpectralType::new(letter, 9).surface_temperature();
            assert!(hot >= cool, "{:?}", letter);
        }
    }

    #[test]
    fn test_parse_and_display() {
        let k5: SpectralType = "K5".parse().unwrap();
        assert_eq!(k5, SpectralType::new(SpectralLetter::K, 5));
        assert_eq!(k5.to_string(), "K5");
        assert!("Q1".parse::<SpectralType>().is_err());
        assert!("G".parse::<SpectralType>().is_err());
        assert!("G12".parse::<SpectralType>().is_err());
    }

    #[test]
    fn test_new_clamps_digit() {
        assert_eq!(SpectralType::new(SpectralLetter::M, 12).digit, 9);
        assert_eq!(SpectralType::new(SpectralLetter::M, -1).digit, 0);
    }
}
