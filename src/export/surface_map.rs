//! Colour PNG export of surfaces and tile grids.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ImageBuffer, ImageEncoder, Rgb};

use crate::geometry::ROW_WIDTHS;
use crate::terrain::{Surface, TileGrid};

use super::png::finished_map;
use super::ExportError;

/// Widest geodesic row, in tiles.
const MAX_WIDTH: u32 = 40;

#[derive(Debug, Clone)]
pub struct SurfaceMapOptions {
    pub compression: CompressionType,
    pub filter: FilterType,
    /// Colour of pixels outside the geodesic rows.
    pub background: [u8; 3],
    /// Lighten high ground and darken low ground.
    pub shade_by_height: bool,
}

impl Default for SurfaceMapOptions {
    fn default() -> Self {
        Self {
            compression: CompressionType::Default,
            filter: FilterType::Adaptive,
            background: [0, 0, 0],
            shade_by_height: true,
        }
    }
}

fn write_rgb(
    img: &ImageBuffer<Rgb<u8>, Vec<u8>>,
    path: &Path,
    options: &SurfaceMapOptions,
) -> Result<(), ExportError> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let encoder = PngEncoder::new_with_quality(writer, options.compression, options.filter);
    encoder.write_image(
        img.as_raw(),
        img.width(),
        img.height(),
        image::ExtendedColorType::Rgb8,
    )?;
    Ok(())
}

/// Writes a finished surface at full raster resolution, one pixel per cell.
pub fn export_surface_png(
    surface: &Surface,
    path: &Path,
    options: &SurfaceMapOptions,
) -> Result<(), ExportError> {
    let map = finished_map(surface)?;
    let max = map.iter().map(|(_, _, c)| c.height).max().unwrap_or(0).max(1) as f32;

    let mut img = ImageBuffer::from_pixel(
        map.width() as u32,
        map.height() as u32,
        Rgb(options.background),
    );
    for (x, y, cell) in map.iter() {
        let tile = surface.palette.tile(cell.kind);
        let rgb = if options.shade_by_height && !tile.water {
            tile.shaded(cell.height as f32 / max - 0.5)
        } else {
            tile.rgb
        };
        img.put_pixel(x as u32, y as u32, Rgb(rgb));
    }
    write_rgb(&img, path, options)
}

/// Writes a tile grid as blocks of `tile_px` pixels, each row centred the
/// way the geodesic rows are laid out.
pub fn export_tile_grid_png(
    tiles: &TileGrid,
    tile_px: u32,
    path: &Path,
    options: &SurfaceMapOptions,
) -> Result<(), ExportError> {
    let tile_px = tile_px.max(1);
    let mut img = ImageBuffer::from_pixel(
        MAX_WIDTH * tile_px,
        ROW_WIDTHS.len() as u32 * tile_px,
        Rgb(options.background),
    );
    for (row, cells) in tiles.rows().iter().enumerate() {
        let offset = (MAX_WIDTH - ROW_WIDTHS[row] as u32) / 2;
        for (x, tile) in cells.iter().enumerate() {
            let left = (offset + x as u32) * tile_px;
            let top = row as u32 * tile_px;
            for dy in 0..tile_px {
                for dx in 0..tile_px {
                    img.put_pixel(left + dx, top + dy, Rgb(tile.rgb));
                }
            }
        }
    }
    write_rgb(&img, path, options)
}
