//! Command-line converter from WordPerfect Graphics to SVG.
//!
//! Accepts standalone `.wpg` files as well as WordPerfect documents that
//! embed a graphic in their compound-file container.
//!
//! # Usage
//!
//! ```sh
//! cargo run --example wpg2svg -- drawing.wpg -o drawing.svg
//! RUST_LOG=debug cargo run --example wpg2svg -- letter.wpd
//! ```

use clap::Parser;
use std::fs;
use std::path::PathBuf;
use wpgraphics::{SvgGenerator, SvgOptions};

/// Convert WPG1/WPG2 graphics to SVG
#[derive(Parser, Debug)]
#[command(name = "wpg2svg", version)]
struct Args {
    /// Input WPG file or WordPerfect document
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output file; defaults to the input path with an .svg extension
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// SVG user units per inch
    #[arg(long, default_value_t = 72.0)]
    units_per_inch: f64,

    /// Omit the XML declaration
    #[arg(long)]
    no_declaration: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let data = fs::read(&args.input)?;
    if !wpgraphics::is_supported_bytes(&data) {
        eprintln!("{}: not a supported WPG file", args.input.display());
        std::process::exit(1);
    }

    let mut generator = SvgGenerator::new(SvgOptions {
        units_per_inch: args.units_per_inch,
        xml_declaration: !args.no_declaration,
        title: args
            .input
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned()),
    });
    wpgraphics::parse_bytes(&data, &mut generator)?;

    let output = args
        .output
        .unwrap_or_else(|| args.input.with_extension("svg"));
    fs::write(&output, generator.into_svg())?;
    println!("✓ Wrote {}", output.display());
    Ok(())
}
