//! # Conversion Manifest
//!
//! Optional JSON summary of a conversion run, written alongside the emitted
//! source so other tooling can check counts and colours without parsing C.

use std::fs;
use std::io;
use std::path::Path;

use serde::Serialize;

use crate::palette::PACKED_PALETTE_LEN;
use crate::texture_converter::Conversion;
use crate::triangle::TRIANGLE_LEN;

#[derive(Serialize)]
pub struct ConversionManifest {
    pub sheet_width: usize,
    pub sheet_height: usize,
    pub texture_count: usize,
    pub palette_colours: Vec<[u8; 3]>,
    pub packed_entries: usize,
    pub triangle_len: usize,
}

pub fn build_manifest(
    conversion: &Conversion,
    sheet_width: usize,
    sheet_height: usize,
) -> ConversionManifest {
    ConversionManifest {
        sheet_width,
        sheet_height,
        texture_count: conversion.textures.len(),
        palette_colours: conversion
            .palette
            .colours()
            .iter()
            .map(|c| [c.r, c.g, c.b])
            .collect(),
        packed_entries: PACKED_PALETTE_LEN,
        triangle_len: TRIANGLE_LEN,
    }
}

pub fn write_manifest(manifest: &ConversionManifest, path: &Path) -> io::Result<()> {
    let json = serde_json::to_string_pretty(manifest)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    fs::write(path, json)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::{Palette, SKY_COLOUR};

    #[test]
    fn manifest_reports_counts_and_palette_triples() {
        let conversion = Conversion {
            palette: Palette::new(vec![SKY_COLOUR]).unwrap(),
            packed_palette: [0; PACKED_PALETTE_LEN],
            tiles: Vec::new(),
            textures: Vec::new(),
        };

        let manifest = build_manifest(&conversion, 16, 48);
        assert_eq!(manifest.texture_count, 0);
        assert_eq!(manifest.palette_colours, vec![[192, 240, 255]]);
        assert_eq!(manifest.packed_entries, 256);
        assert_eq!(manifest.triangle_len, 128);

        let json = serde_json::to_string_pretty(&manifest).unwrap();
        assert!(json.contains("\"sheet_width\": 16"));
        assert!(json.contains("\"palette_colours\""));
    }
}
