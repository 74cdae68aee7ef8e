//! pcb-pos - placement file generator for KiCad boards.
//!
//! Standalone CLI that integrates with the pcb workflow via the plugin
//! mechanism (executables named `pcb-<command>` become available as
//! `pcb <command>`).

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use env_logger::Env;

use pcb_pos::commands::generate::{self, GenerateOptions, OutputFormat, OUTPUT_DIR};
use pcb_pos::report::NumberFormat;

#[derive(Parser)]
#[command(name = "pcb-pos")]
#[command(author, version, about = "Generate ALL and SMD placement files for a KiCad board")]
struct Cli {
    /// Path to the board file (.kicad_pcb)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    board: PathBuf,

    /// Output folder name, created next to the board file
    #[arg(short, long, default_value = OUTPUT_DIR)]
    output_dir: String,

    /// Fixed decimal places for PosX, PosY and Rot (default: shortest exact form)
    #[arg(short, long)]
    precision: Option<usize>,

    /// Transliterate value and package fields to ASCII-safe text
    #[arg(short, long)]
    transliterate: bool,

    /// Summary output format
    #[arg(short, long, value_enum, default_value = "human")]
    format: OutputFormat,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Default level depends on --debug, RUST_LOG overrides it
    let env = if cli.debug {
        Env::default().default_filter_or("debug")
    } else {
        Env::default().default_filter_or("warn")
    };
    env_logger::Builder::from_env(env).init();

    let options = GenerateOptions {
        output_dir: cli.output_dir,
        numbers: cli.precision.map_or(NumberFormat::Shortest, NumberFormat::Fixed),
        transliterate: cli.transliterate,
    };

    generate::execute(&cli.board, &options, cli.format)
}
