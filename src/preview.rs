//! # Tile Previews
//!
//! Renders projected tiles as 8x nearest neighbour upscaled PNGs so a
//! conversion can be checked by eye without compiling the output into the
//! game.

use std::fs;
use std::io;
use std::path::Path;

use image::imageops::{self, FilterType};
use image::RgbImage;

use crate::isometric::{IsoTile, TILE_HEIGHT, TILE_WIDTH};

pub const PREVIEW_SCALE: u32 = 8;

/// Draws one tile at native resolution, then upscales without smoothing
pub fn render_preview(tile: &IsoTile) -> RgbImage {
    let mut image = RgbImage::new(TILE_WIDTH as u32, TILE_HEIGHT as u32);

    for (y, row) in tile.iter().enumerate() {
        for (x, colour) in row.iter().enumerate() {
            image.put_pixel(
                x as u32,
                y as u32,
                image::Rgb([colour.r, colour.g, colour.b]),
            );
        }
    }

    imageops::resize(
        &image,
        TILE_WIDTH as u32 * PREVIEW_SCALE,
        TILE_HEIGHT as u32 * PREVIEW_SCALE,
        FilterType::Nearest,
    )
}

/// Saves an optimised preview PNG, keeping the unoptimised file when
/// optimisation fails
pub fn save_preview(tile: &IsoTile, path: &Path) -> io::Result<()> {
    let image = render_preview(tile);

    let temp_path = path.with_extension("temp.png");
    image
        .save(&temp_path)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    let mut options = oxipng::Options::from_preset(2);
    options.bit_depth_reduction = true;
    options.interlace = None;

    match oxipng::optimize(
        &oxipng::InFile::Path(temp_path.clone()),
        &oxipng::OutFile::Path(Some(path.to_path_buf())),
        &options,
    ) {
        Ok(_) => {
            let _ = fs::remove_file(temp_path);
            Ok(())
        }
        Err(e) => {
            fs::rename(temp_path, path)?;
            eprintln!(
                "Warning: oxipng optimisation failed for {}: {}. File saved unoptimised.",
                path.display(),
                e
            );
            Ok(())
        }
    }
}
