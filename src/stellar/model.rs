//! Stellar flux model: distance thresholds, temperature bands and periods.
//!
//! Every threshold is a fixed distance for a Sol-like star scaled by the
//! star's solar constant, its heat output relative to Sol.

use serde::{Deserialize, Serialize};

use super::{SpectralType, StarClass, StarForm, Temperature};

/// Orbital distances, in Mkm for a Sol-like star, at which each band ends.
const BAND_LIMITS: [(f64, Temperature); 10] = [
    (15.0, Temperature::UltraHot),
    (25.0, Temperature::ExtremelyHot),
    (50.0, Temperature::VeryHot),
    (75.0, Temperature::Hot),
    (110.0, Temperature::Warm),
    (190.0, Temperature::Standard),
    (300.0, Temperature::Cool),
    (500.0, Temperature::Cold),
    (2000.0, Temperature::VeryCold),
    (8000.0, Temperature::ExtremelyCold),
];

/// The physical description of a star that the model needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub form: StarForm,
    pub class: StarClass,
    pub spectral: SpectralType,
}

impl Classification {
    pub fn new(class: StarClass, spectral: SpectralType) -> Self {
        Self {
            form: class.form(),
            class,
            spectral,
        }
    }

    /// A G2 V star.
    pub fn sol() -> Self {
        Self::new(StarClass::V, SpectralType::G2)
    }
}

/// Heat output relative to Sol.
///
/// Ratio of surface temperature to Sol's, scaled by the square of the class
/// radius multiplier.
pub fn solar_constant(star: &Classification) -> f64 {
    let ratio = star.spectral.surface_temperature() as f64
        / SpectralType::G2.surface_temperature() as f64;
    ratio * star.class.radius().powi(2)
}

/// Innermost orbit (Mkm) at which planets are likely to form.
pub fn inner_limit(star: &Classification) -> f64 {
    30.0 * solar_constant(star)
}

/// Orbit (Mkm) at which an Earth-like world would sit.
pub fn earth_equivalent_distance(star: &Classification) -> f64 {
    150.0 * solar_constant(star)
}

/// Orbit (Mkm) beyond which worlds are likely to be ice worlds.
pub fn cold_point(star: &Classification) -> f64 {
    1000.0 * solar_constant(star)
}

/// Temperature band of an airless body orbiting at `distance` Mkm.
///
/// Never returns a hotter band for a larger distance.
pub fn orbit_temperature(star: &Classification, distance: f64) -> Temperature {
    let constant = solar_constant(star);
    BAND_LIMITS
        .iter()
        .find(|(limit, _)| distance < limit * constant)
        .map(|&(_, band)| band)
        .unwrap_or(Temperature::UltraCold)
}

/// Orbital period in days at `distance` Mkm (Kepler's third law).
pub fn orbit_period(star: &Classification, distance: f64) -> f64 {
    let a = (distance / 150.0).powi(3);
    let years = (a / star.spectral.mass()).sqrt();
    years * 365.25
}
