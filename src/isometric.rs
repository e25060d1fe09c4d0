//! # Isometric Projection
//!
//! Re-projects the three flat cube faces into one 31x32 isometric tile. The
//! top face is sampled through the inverse of the diamond transform wherever
//! the shared mask image marks a pixel, then the two side faces are laid in
//! as 2 pixel wide staircase strips.

use std::io;
use std::path::Path;

use image::RgbImage;

use crate::sheet::{FaceImage, Rgb, BLOCK_SIZE};

pub const TILE_WIDTH: usize = 32;
pub const TILE_HEIGHT: usize = 31;

/// Inverse of the diamond transform [[1, -1], [0.5, 0.5]]
const M_INV: [[f32; 2]; 2] = [[0.5, 1.0], [-0.5, 1.0]];

/// One projected tile, indexed `[y][x]`. Pixels no face reaches stay black.
pub type IsoTile = [[Rgb; TILE_WIDTH]; TILE_HEIGHT];

/// Marks which tile pixels belong to the top diamond. Loaded once from the
/// reference mask image and shared across every projection.
pub struct DiamondMask {
    cells: [[bool; TILE_WIDTH]; TILE_HEIGHT],
}

impl DiamondMask {
    pub fn load(path: &Path) -> io::Result<Self> {
        let image = image::open(path).map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Failed to open mask image {}: {}", path.display(), e),
            )
        })?;

        Self::from_image(&image.to_rgb8())
    }

    /// A pixel belongs to the diamond when its green channel is non-zero
    pub fn from_image(image: &RgbImage) -> io::Result<Self> {
        if image.width() as usize != TILE_WIDTH || image.height() as usize != TILE_HEIGHT {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Mask image is {}x{}, expected {}x{}",
                    image.width(),
                    image.height(),
                    TILE_WIDTH,
                    TILE_HEIGHT
                ),
            ));
        }

        let mut cells = [[false; TILE_WIDTH]; TILE_HEIGHT];
        for (y, row) in cells.iter_mut().enumerate() {
            for (x, cell) in row.iter_mut().enumerate() {
                *cell = image.get_pixel(x as u32, y as u32).0[1] > 0;
            }
        }

        Ok(DiamondMask { cells })
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        self.cells[y][x]
    }

    /// Projects one cube into an isometric tile. The top fill runs first and
    /// the side strips overwrite it afterwards.
    pub fn project(&self, top: &FaceImage, left: &FaceImage, right: &FaceImage) -> IsoTile {
        let mut tile = [[Rgb::default(); TILE_WIDTH]; TILE_HEIGHT];

        for y in 0..TILE_HEIGHT {
            for x in 0..TILE_WIDTH {
                if !self.contains(x, y) {
                    continue;
                }

                let dx = x as f32 - 16.0;
                let dy = y as f32;
                let sx = M_INV[0][0] * dx + M_INV[0][1] * dy;
                let sy = M_INV[1][0] * dx + M_INV[1][1] * dy;

                // Round half up, truncating toward zero, then clamp into the face
                let sx = ((sx + 0.5) as i32).clamp(0, BLOCK_SIZE as i32 - 1) as usize;
                let sy = ((sy + 0.5) as i32).clamp(0, BLOCK_SIZE as i32 - 1) as usize;

                tile[y][x] = top[sy][sx];
            }
        }

        for i in 0..BLOCK_SIZE / 2 {
            let x = i * 2;
            for row in 0..BLOCK_SIZE {
                for step in 0..2 {
                    tile[8 + i + row][x + step] = left[row][x + step];
                    tile[15 - i + row][16 + x + step] = right[row][x + step];
                }
            }
        }

        tile
    }
}
