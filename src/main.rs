mod emit;
mod isometric;
mod manifest;
mod palette;
mod preview;
mod sheet;
mod texture_converter;
mod triangle;

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use isometric::DiamondMask;
use sheet::TextureSheet;
use texture_converter::{Conversion, TextureConverter};

/// Converts a cube face sprite sheet into the isometric palette and texture
/// tables the renderer compiles in
#[derive(Debug, Parser)]
struct Args {
    /// Path to the texture sheet
    #[arg(long, default_value = "sprites/TextureMap.png")]
    sheet: PathBuf,

    /// Path to the isometric diamond mask
    #[arg(long, default_value = "sprites/block map.png")]
    mask: PathBuf,

    /// Write the generated tables here instead of standard output
    #[arg(long)]
    output: Option<PathBuf>,

    /// Save an upscaled preview PNG per block into this directory
    #[arg(long)]
    preview_dir: Option<PathBuf>,

    /// Write a JSON summary of the run here
    #[arg(long)]
    manifest: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> io::Result<()> {
    eprintln!("Loading texture sheet {}...", args.sheet.display());
    let sheet = TextureSheet::load(&args.sheet)?;
    let (sheet_width, sheet_height) = (sheet.width(), sheet.height());

    eprintln!("Loading diamond mask {}...", args.mask.display());
    let mask = DiamondMask::load(&args.mask)?;

    let converter = TextureConverter::new(sheet, mask);
    let conversion = converter.convert()?;

    write_tables(args, &conversion)?;

    if let Some(preview_dir) = &args.preview_dir {
        save_previews(&conversion, preview_dir)?;
    }

    if let Some(manifest_path) = &args.manifest {
        eprintln!("Writing manifest to {}...", manifest_path.display());
        let summary = manifest::build_manifest(&conversion, sheet_width, sheet_height);
        manifest::write_manifest(&summary, manifest_path)?;
    }

    eprintln!("\n---------------------------------");
    eprintln!("Texture Conversion Complete!");
    eprintln!("  Cube textures: {}", conversion.textures.len());
    eprintln!("  Palette colours: {}", conversion.palette.len());
    eprintln!("---------------------------------");

    Ok(())
}

fn write_tables(args: &Args, conversion: &Conversion) -> io::Result<()> {
    match &args.output {
        Some(path) => {
            eprintln!("Writing tables to {}...", path.display());
            let mut out = BufWriter::new(File::create(path)?);
            emit::write_palette_table(&mut out, &conversion.packed_palette)?;
            emit::write_texture_table(&mut out, &conversion.textures)?;
            out.flush()?;
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            emit::write_palette_table(&mut out, &conversion.packed_palette)?;
            emit::write_texture_table(&mut out, &conversion.textures)?;
        }
    }

    Ok(())
}

fn save_previews(conversion: &Conversion, dir: &Path) -> io::Result<()> {
    fs::create_dir_all(dir)?;
    eprintln!(
        "Saving {} previews to {}...",
        conversion.tiles.len(),
        dir.display()
    );

    for (i, tile) in conversion.tiles.iter().enumerate() {
        let path = dir.join(format!("block_{:03}.png", i));
        preview::save_preview(tile, &path)?;
    }

    Ok(())
}
