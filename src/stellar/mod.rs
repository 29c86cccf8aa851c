//! Stellar classification and the flux model derived from it.

mod class;
mod spectral;
mod temperature;
mod model;
mod generation;

use thiserror::Error;

pub use class::{StarClass, StarForm};
pub use spectral::{SpectralLetter, SpectralType};
pub use temperature::Temperature;
pub use model::{
    cold_point, earth_equivalent_distance, inner_limit, orbit_period, orbit_temperature,
    solar_constant, Classification,
};
pub use generation::{
    random_primary_class, random_spectral_type, StarGenerator, StarSpec, STAR_SUFFIXES,
};

/// Errors from star parsing and star generation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StarError {
    #[error("System has only one star")]
    NotMultiple,
    #[error("Primary star has not been persisted")]
    MissingPrimary,
    #[error("Secondary star has not been persisted")]
    MissingSecondary,
    #[error("Invalid spectral type '{0}'")]
    ParseSpectral(String),
    #[error("Invalid star class '{0}'")]
    ParseClass(String),
}
