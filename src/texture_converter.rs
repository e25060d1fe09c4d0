//! # Texture Converter
//!
//! Drives a whole conversion run: builds the shared palette from the full
//! sheet, then projects and serialises one cube per block until the first
//! blank block terminates the sheet.

use std::io;

use crate::isometric::{DiamondMask, IsoTile};
use crate::palette::{self, Palette, ANCHOR_COLOURS, PACKED_BASE_COLOURS, PACKED_PALETTE_LEN};
use crate::sheet::TextureSheet;
use crate::triangle::CubeTexture;

/// Everything one conversion run produces
pub struct Conversion {
    pub palette: Palette,
    pub packed_palette: [u16; PACKED_PALETTE_LEN],
    pub tiles: Vec<IsoTile>,
    pub textures: Vec<CubeTexture>,
}

pub struct TextureConverter {
    sheet: TextureSheet,
    mask: DiamondMask,
}

impl TextureConverter {
    pub fn new(sheet: TextureSheet, mask: DiamondMask) -> Self {
        TextureConverter { sheet, mask }
    }

    pub fn convert(&self) -> io::Result<Conversion> {
        let colours = palette::collect_sheet_colours(&self.sheet);
        eprintln!("  Found {} distinct colours", colours.len());

        let palette = Palette::new(palette::rearrange_colours(&colours, &ANCHOR_COLOURS))?;

        if palette.len() > PACKED_BASE_COLOURS {
            eprintln!(
                "Warning: palette has {} colours, only the first {} fit the packed table",
                palette.len(),
                PACKED_BASE_COLOURS
            );
        }
        if palette.len() > 256 {
            eprintln!(
                "Warning: palette has {} colours, too many for the renderer's 8 bit texture indices",
                palette.len()
            );
        }

        let mut tiles = Vec::new();
        let mut textures = Vec::new();

        for block in 0..self.sheet.block_count() {
            if self.sheet.block_is_blank(block) {
                eprintln!("  Block {} is blank, stopping", block);
                break;
            }

            let faces = self.sheet.block_faces(block);
            let tile = self.mask.project(&faces.top, &faces.left, &faces.right);
            let texture = CubeTexture::from_tile(&tile, &palette)
                .map_err(|e| io::Error::new(e.kind(), format!("Block {}: {}", block, e)))?;

            tiles.push(tile);
            textures.push(texture);
        }

        eprintln!("  Serialised {} cube textures", textures.len());

        let packed_palette = palette::expand_packed(&palette);

        Ok(Conversion {
            palette,
            packed_palette,
            tiles,
            textures,
        })
    }
}
