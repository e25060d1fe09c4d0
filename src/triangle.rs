//! # Triangle Serialisation
//!
//! Flattens an isometric tile into the renderer's texture layout. Each cube
//! face is drawn as two triangles, and each triangle is a fixed 128 entry
//! list of palette indices in the renderer's scan order.

use std::io;

use crate::isometric::IsoTile;
use crate::palette::Palette;

/// Palette indices per serialised triangle
pub const TRIANGLE_LEN: usize = 128;
/// Triangles per cube: left and right halves of three faces
pub const CUBE_TRIANGLES: usize = 6;

/// Scan row widths: each triangle widens to the full face then narrows again
const SCAN_ROWS: [usize; 15] = [2, 4, 6, 8, 10, 12, 14, 16, 14, 12, 10, 8, 6, 4, 2];

pub type TriangleTex = [u16; TRIANGLE_LEN];

/// Serialises the triangle left of column `x0`, starting at row `y0`.
/// Row `y0 + step` contributes the columns `[x0 - width, x0)`.
pub fn left_triangle(
    tile: &IsoTile,
    palette: &Palette,
    x0: usize,
    y0: usize,
) -> io::Result<TriangleTex> {
    let mut tri = [0u16; TRIANGLE_LEN];
    let mut cursor = 0;

    for (step, &width) in SCAN_ROWS.iter().enumerate() {
        let y = y0 + step;
        for x in (x0 - width)..x0 {
            tri[cursor] = index_at(tile, palette, x, y)?;
            cursor += 1;
        }
    }

    Ok(tri)
}

/// Serialises the triangle right of column `x0`, starting at row `y0`.
/// Row `y0 + step` contributes the columns `[x0, x0 + width)`.
pub fn right_triangle(
    tile: &IsoTile,
    palette: &Palette,
    x0: usize,
    y0: usize,
) -> io::Result<TriangleTex> {
    let mut tri = [0u16; TRIANGLE_LEN];
    let mut cursor = 0;

    for (step, &width) in SCAN_ROWS.iter().enumerate() {
        let y = y0 + step;
        for x in x0..(x0 + width) {
            tri[cursor] = index_at(tile, palette, x, y)?;
            cursor += 1;
        }
    }

    Ok(tri)
}

fn index_at(tile: &IsoTile, palette: &Palette, x: usize, y: usize) -> io::Result<u16> {
    palette.index_of(tile[y][x]).map_err(|e| {
        io::Error::new(
            io::ErrorKind::NotFound,
            format!("Tile pixel ({}, {}): {}", x, y, e),
        )
    })
}

/// The six serialised triangles of one cube, in the renderer's face order:
/// left face, right face, then the top diamond.
pub struct CubeTexture {
    pub triangles: [TriangleTex; CUBE_TRIANGLES],
}

impl CubeTexture {
    pub fn from_tile(tile: &IsoTile, palette: &Palette) -> io::Result<Self> {
        Ok(CubeTexture {
            triangles: [
                left_triangle(tile, palette, 16, 16)?,
                right_triangle(tile, palette, 0, 8)?,
                left_triangle(tile, palette, 32, 8)?,
                right_triangle(tile, palette, 16, 16)?,
                left_triangle(tile, palette, 16, 0)?,
                right_triangle(tile, palette, 16, 0)?,
            ],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::isometric::{TILE_HEIGHT, TILE_WIDTH};
    use crate::sheet::Rgb;

    /// Tile whose colour at (x, y) maps to palette index y * 32 + x
    fn position_tile() -> (IsoTile, Palette) {
        let mut tile = [[Rgb::default(); TILE_WIDTH]; TILE_HEIGHT];
        let mut colours = Vec::new();

        for (y, row) in tile.iter_mut().enumerate() {
            for (x, colour) in row.iter_mut().enumerate() {
                *colour = Rgb {
                    r: 0,
                    g: y as u8,
                    b: x as u8,
                };
                colours.push(*colour);
            }
        }

        (tile, Palette::new(colours).unwrap())
    }

    #[test]
    fn left_triangle_scans_widening_then_narrowing_rows() {
        let (tile, palette) = position_tile();
        let tri = left_triangle(&tile, &palette, 16, 0).unwrap();

        // Row 0 is two pixels wide, ending at column 15
        assert_eq!(tri[0], 14);
        assert_eq!(tri[1], 15);
        // Row 1 widens to four pixels
        assert_eq!(tri[2], 32 + 12);
        // The widest row ends the first phase at pixel 72
        assert_eq!(tri[71], 7 * 32 + 15);
        // The second phase narrows again from 14 columns
        assert_eq!(tri[72], 8 * 32 + 2);
        assert_eq!(tri[127], 14 * 32 + 15);
    }

    #[test]
    fn right_triangle_scans_from_its_anchor_column() {
        let (tile, palette) = position_tile();
        let tri = right_triangle(&tile, &palette, 16, 0).unwrap();

        assert_eq!(tri[0], 16);
        assert_eq!(tri[1], 17);
        assert_eq!(tri[2], 32 + 16);
        assert_eq!(tri[127], 14 * 32 + 17);
    }

    #[test]
    fn offset_anchors_shift_the_scanned_region() {
        let (tile, palette) = position_tile();

        let lower_left = left_triangle(&tile, &palette, 16, 16).unwrap();
        assert_eq!(lower_left[0], 16 * 32 + 14);

        let lower_right = right_triangle(&tile, &palette, 0, 8).unwrap();
        assert_eq!(lower_right[0], 8 * 32);
    }

    #[test]
    fn unknown_tile_colours_are_fatal() {
        let (tile, _) = position_tile();
        let palette = Palette::new(vec![Rgb { r: 9, g: 9, b: 9 }]).unwrap();

        let result = left_triangle(&tile, &palette, 16, 0);
        let error = result.unwrap_err();
        assert_eq!(error.kind(), io::ErrorKind::NotFound);
        assert!(error.to_string().contains("(14, 0)"));
    }

    #[test]
    fn cube_serialisation_orders_faces_left_right_top() {
        let (tile, palette) = position_tile();
        let cube = CubeTexture::from_tile(&tile, &palette).unwrap();

        assert_eq!(cube.triangles[0][0], 16 * 32 + 14);
        assert_eq!(cube.triangles[1][0], 8 * 32);
        assert_eq!(cube.triangles[2][0], 8 * 32 + 30);
        assert_eq!(cube.triangles[3][0], 16 * 32 + 16);
        assert_eq!(cube.triangles[4][0], 14);
        assert_eq!(cube.triangles[5][0], 16);
    }
}
