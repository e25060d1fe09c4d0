//! # Texture Sheet
//!
//! Loads the flat sprite sheet holding the cube face textures. Each block is a
//! 16 pixel wide column with its top, left and right face stacked beneath each
//! other, 48 rows in total.

use std::io;
use std::path::Path;

use image::RgbaImage;

pub const BLOCK_SIZE: usize = 16;
pub const FACE_ROWS: usize = BLOCK_SIZE * 3;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn is_black(&self) -> bool {
        self.r == 0 && self.g == 0 && self.b == 0
    }
}

/// One 16x16 cube face, indexed `[y][x]`
pub type FaceImage = [[Rgb; BLOCK_SIZE]; BLOCK_SIZE];

pub struct CubeFaces {
    pub top: FaceImage,
    pub left: FaceImage,
    pub right: FaceImage,
}

/// The decoded sheet, transparency already folded to black
pub struct TextureSheet {
    pixels: Vec<Rgb>,
    width: usize,
    height: usize,
}

impl TextureSheet {
    pub fn load(path: &Path) -> io::Result<Self> {
        let image = image::open(path).map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Failed to open texture sheet {}: {}", path.display(), e),
            )
        })?;

        Self::from_rgba(&image.to_rgba8())
    }

    pub fn from_rgba(image: &RgbaImage) -> io::Result<Self> {
        let width = image.width() as usize;
        let height = image.height() as usize;

        if width == 0 || width % BLOCK_SIZE != 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Sheet width {} is not a positive multiple of {}",
                    width, BLOCK_SIZE
                ),
            ));
        }
        if height < FACE_ROWS {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Sheet height {} is too short for three stacked {}x{} faces",
                    height, BLOCK_SIZE, BLOCK_SIZE
                ),
            ));
        }

        let mut pixels = Vec::with_capacity(width * height);
        for pixel in image.pixels() {
            let [r, g, b, a] = pixel.0;
            if a == 0 {
                pixels.push(Rgb::default());
            } else {
                pixels.push(Rgb { r, g, b });
            }
        }

        Ok(TextureSheet {
            pixels,
            width,
            height,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of 16 pixel wide blocks across the sheet
    pub fn block_count(&self) -> usize {
        self.width / BLOCK_SIZE
    }

    pub fn pixel(&self, x: usize, y: usize) -> Rgb {
        self.pixels[y * self.width + x]
    }

    /// True when every channel of every pixel in the block's full column is
    /// zero. The first blank block terminates the sheet.
    pub fn block_is_blank(&self, block: usize) -> bool {
        let x0 = block * BLOCK_SIZE;
        for y in 0..self.height {
            for x in x0..x0 + BLOCK_SIZE {
                if !self.pixel(x, y).is_black() {
                    return false;
                }
            }
        }
        true
    }

    /// Copies the three stacked faces out of a block column
    pub fn block_faces(&self, block: usize) -> CubeFaces {
        CubeFaces {
            top: self.face_at(block, 0),
            left: self.face_at(block, BLOCK_SIZE),
            right: self.face_at(block, BLOCK_SIZE * 2),
        }
    }

    fn face_at(&self, block: usize, y0: usize) -> FaceImage {
        let x0 = block * BLOCK_SIZE;
        let mut face = [[Rgb::default(); BLOCK_SIZE]; BLOCK_SIZE];

        for (y, row) in face.iter_mut().enumerate() {
            for (x, colour) in row.iter_mut().enumerate() {
                *colour = self.pixel(x0 + x, y0 + y);
            }
        }

        face
    }
}
