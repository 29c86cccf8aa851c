//! PNG export of finished surfaces.
//!
//! Heights go to 16-bit grayscale, tiles to RGB colour maps.

mod png;
mod surface_map;

use thiserror::Error;

pub use png::{export_height_png, HeightPngOptions};
pub use surface_map::{export_surface_png, export_tile_grid_png, SurfaceMapOptions};

/// Errors that can occur during export.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Surface has not finished terrain synthesis")]
    Unfinished,
}
