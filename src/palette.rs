//! # Colour Palette
//!
//! Builds the shared colour palette for a conversion run. The palette starts
//! with the sky sentinel, collects every distinct sheet colour in raster
//! order, then pins the nearest match for each anchor colour to the front so
//! the renderer's fixed indices (sky, UI greys) keep their meaning. The
//! packed expansion adds the shaded and water shaded variants the renderer
//! indexes at fixed 64 entry offsets.

use std::collections::{HashMap, HashSet};
use std::hash::BuildHasherDefault;
use std::io;

use twox_hash::XxHash64;

use crate::sheet::{Rgb, TextureSheet};

/// Reserved background colour, always palette index 0 before rearrangement.
/// The renderer paints palette index 0 as sky.
pub const SKY_COLOUR: Rgb = Rgb {
    r: 192,
    g: 240,
    b: 255,
};

/// Colours pinned to the front of the palette, in index order
pub const ANCHOR_COLOURS: [Rgb; 5] = [
    SKY_COLOUR,
    Rgb { r: 0, g: 0, b: 0 },
    Rgb {
        r: 144,
        g: 144,
        b: 144,
    },
    Rgb {
        r: 210,
        g: 210,
        b: 210,
    },
    Rgb {
        r: 255,
        g: 255,
        b: 255,
    },
];

/// Base colours the packed table covers per shading variant
pub const PACKED_BASE_COLOURS: usize = 64;
/// Packed table length: base, shaded, water and shaded water quarters
pub const PACKED_PALETTE_LEN: usize = PACKED_BASE_COLOURS * 4;

type ColourMap = HashMap<Rgb, u16, BuildHasherDefault<XxHash64>>;
type ColourSet = HashSet<Rgb, BuildHasherDefault<XxHash64>>;

/// Collects the sentinel plus every distinct sheet colour, first seen first
pub fn collect_sheet_colours(sheet: &TextureSheet) -> Vec<Rgb> {
    let mut colours = vec![SKY_COLOUR];
    let mut seen = ColourSet::default();
    seen.insert(SKY_COLOUR);

    for y in 0..sheet.height() {
        for x in 0..sheet.width() {
            let colour = sheet.pixel(x, y);
            if seen.insert(colour) {
                colours.push(colour);
            }
        }
    }

    colours
}

/// Index of the entry nearest to `target` by squared channel distance.
/// Ties resolve to the earliest entry.
pub fn closest_colour(colours: &[Rgb], target: Rgb) -> usize {
    let mut best = 0;
    let mut best_dist = u32::MAX;

    for (i, colour) in colours.iter().enumerate() {
        let dr = colour.r as i32 - target.r as i32;
        let dg = colour.g as i32 - target.g as i32;
        let db = colour.b as i32 - target.b as i32;
        let dist = (dr * dr + dg * dg + db * db) as u32;

        if dist < best_dist {
            best = i;
            best_dist = dist;
        }
    }

    best
}

/// Reorders the palette so each anchor's nearest entry sits at the anchor's
/// position, followed by every remaining colour in original order. The result
/// is always a permutation of the input: an anchor whose nearest entry is
/// already claimed by an earlier anchor is skipped with a warning, since a
/// duplicated entry would shift every index the renderer bakes in.
pub fn rearrange_colours(colours: &[Rgb], targets: &[Rgb]) -> Vec<Rgb> {
    let mut picked: Vec<usize> = Vec::with_capacity(targets.len());

    for target in targets {
        let index = closest_colour(colours, *target);
        if picked.contains(&index) {
            let entry = colours[index];
            eprintln!(
                "Warning: anchor ({}, {}, {}) resolves to entry ({}, {}, {}) already claimed by an earlier anchor, skipping",
                target.r, target.g, target.b, entry.r, entry.g, entry.b
            );
            continue;
        }
        picked.push(index);
    }

    let mut rearranged: Vec<Rgb> = picked.iter().map(|&i| colours[i]).collect();
    for (i, colour) in colours.iter().enumerate() {
        if !picked.contains(&i) {
            rearranged.push(*colour);
        }
    }

    rearranged
}

/// An ordered colour list with a prebuilt exact-match index
pub struct Palette {
    colours: Vec<Rgb>,
    index: ColourMap,
}

impl Palette {
    pub fn new(colours: Vec<Rgb>) -> io::Result<Self> {
        if colours.len() > u16::MAX as usize + 1 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Palette has {} colours, more than texture indices can address",
                    colours.len()
                ),
            ));
        }

        let mut index = ColourMap::default();
        for (i, colour) in colours.iter().enumerate() {
            index.entry(*colour).or_insert(i as u16);
        }

        Ok(Palette { colours, index })
    }

    pub fn len(&self) -> usize {
        self.colours.len()
    }

    pub fn colours(&self) -> &[Rgb] {
        &self.colours
    }

    /// Exact-match lookup. Every tile pixel must come from the scanned sheet,
    /// so a miss means the inputs are inconsistent.
    pub fn index_of(&self, colour: Rgb) -> io::Result<u16> {
        self.index.get(&colour).copied().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!(
                    "Colour ({}, {}, {}) is not in the palette",
                    colour.r, colour.g, colour.b
                ),
            )
        })
    }
}

/// Expands the palette into the renderer's packed table. Slots 0-63 hold the
/// first 64 base colours (zero padded, or truncated with the overflow
/// ignored), 64-127 the half bright shades, 128-191 the water tints and
/// 192-255 the half bright water tints. Channels truncate to 5 bits and pack
/// as B + 32*G + 1024*R.
pub fn expand_packed(palette: &Palette) -> [u16; PACKED_PALETTE_LEN] {
    let mut channels = [[0u16; 3]; PACKED_PALETTE_LEN];

    for (slot, colour) in channels
        .iter_mut()
        .zip(palette.colours())
        .take(PACKED_BASE_COLOURS)
    {
        *slot = [colour.r as u16, colour.g as u16, colour.b as u16];
    }

    for i in 0..PACKED_BASE_COLOURS {
        let [r, g, b] = channels[i];

        // Water pulls the colour half way toward full blue
        channels[PACKED_BASE_COLOURS * 2 + i] = [r / 2, g / 2, (b + 255) / 2];
        channels[PACKED_BASE_COLOURS + i] = [r / 2, g / 2, b / 2];

        let [wr, wg, wb] = channels[PACKED_BASE_COLOURS * 2 + i];
        channels[PACKED_BASE_COLOURS * 3 + i] = [wr / 2, wg / 2, wb / 2];
    }

    let mut packed = [0u16; PACKED_PALETTE_LEN];
    for (value, &[r, g, b]) in packed.iter_mut().zip(channels.iter()) {
        *value = (b / 8) + (g / 8) * 32 + (r / 8) * 1024;
    }

    packed
}
