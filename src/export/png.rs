//! 16-bit PNG export of a surface's height field.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ImageBuffer, ImageEncoder, Luma};

use crate::terrain::{Surface, SurfaceMap, TerrainState};

use super::ExportError;

/// Options for height PNG export.
#[derive(Debug, Clone)]
pub struct HeightPngOptions {
    /// Height written as full white; `None` uses the map's highest point.
    pub max_height: Option<i32>,
    pub compression: CompressionType,
    pub filter: FilterType,
}

impl Default for HeightPngOptions {
    fn default() -> Self {
        Self {
            max_height: None,
            compression: CompressionType::Default,
            filter: FilterType::Adaptive,
        }
    }
}

/// Returns the raster of a finished surface.
pub(crate) fn finished_map(surface: &Surface) -> Result<&SurfaceMap, ExportError> {
    match (&surface.fine, surface.state) {
        (Some(map), TerrainState::Finished) => Ok(map),
        _ => Err(ExportError::Unfinished),
    }
}

/// Writes the heights of a finished surface as a 16-bit grayscale PNG.
///
/// Heights run from 0 (black) to the configured maximum (white); pixels
/// outside the geodesic rows are black.
pub fn export_height_png(
    surface: &Surface,
    path: &Path,
    options: &HeightPngOptions,
) -> Result<(), ExportError> {
    let map = finished_map(surface)?;
    let max = options
        .max_height
        .unwrap_or_else(|| map.iter().map(|(_, _, c)| c.height).max().unwrap_or(0))
        .max(1) as f32;

    let (width, height) = (map.width() as u32, map.height() as u32);
    let mut img: ImageBuffer<Luma<u16>, Vec<u16>> = ImageBuffer::new(width, height);
    for (x, y, cell) in map.iter() {
        let normalized = (cell.height as f32 / max).clamp(0.0, 1.0);
        img.put_pixel(x as u32, y as u32, Luma([(normalized * 65535.0) as u16]));
    }

    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let encoder = PngEncoder::new_with_quality(writer, options.compression, options.filter);
    let byte_slice: &[u8] = bytemuck::cast_slice(img.as_raw());
    encoder.write_image(byte_slice, width, height, image::ExtendedColorType::L16)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::synthesize;
    use crate::random::Dice;
    use crate::terrain::{PlanetArchetype, TerrainConfig};
    use tempfile::tempdir;

    #[test]
    fn test_export_height_png() {
        let config = TerrainConfig::barren().with_tile_size(4);
        let surface = synthesize(PlanetArchetype::Hermian, &config, &mut Dice::seeded(1)).unwrap();
        let dir = tempdir().unwrap();
        let path = dir.path().join("height.png");

        export_height_png(&surface, &path, &HeightPngOptions::default()).unwrap();

        let img = image::open(&path).unwrap();
        assert_eq!((img.width(), img.height()), (160, 48));
    }

    #[test]
    fn test_unfinished_surface_is_rejected() {
        let surface = Surface::new(PlanetArchetype::Gaian);
        let dir = tempdir().unwrap();
        let result = export_height_png(&surface, &dir.path().join("x.png"), &HeightPngOptions::default());
        assert!(matches!(result, Err(ExportError::Unfinished)));
    }
}
