//! Generate command - write ALL and SMD pos files for a board.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, style::Style, Alignment, Modify},
    Table, Tabled,
};

use crate::board::Board;
use crate::placement::{extract_placements, normalize::normalize_record};
use crate::report::{
    board_name, output_dir, reset_output_dir, write_pos_files, NumberFormat, PosTable, Stamp,
};

/// Default output subfolder, created next to the board file.
pub const OUTPUT_DIR: &str = "pos";

/// Output format for the run summary.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
}

/// Pipeline settings.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Output subfolder name beneath the board's directory
    pub output_dir: String,
    /// Text policy for PosX, PosY and Rot
    pub numbers: NumberFormat,
    /// Transliterate value and package fields
    pub transliterate: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            output_dir: OUTPUT_DIR.to_string(),
            numbers: NumberFormat::default(),
            transliterate: false,
        }
    }
}

/// One written pos file.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub top: usize,
    pub bottom: usize,
    pub total: usize,
}

/// What a run produced.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateReport {
    pub output_dir: PathBuf,
    /// ALL file first, then SMD
    pub files: Vec<FileReport>,
}

/// Run the pipeline on a loaded board.
///
/// Extracts and sorts placements, resets the output directory, then writes
/// both pos files. Nothing is written if the directory cannot be reset.
pub fn generate(board: &Board, options: &GenerateOptions, stamp: &Stamp) -> Result<GenerateReport> {
    let mut placements = extract_placements(board);
    if options.transliterate {
        placements = placements.map_records(normalize_record);
    }

    let table = PosTable::new(&placements, options.numbers);

    let dir = output_dir(board, &options.output_dir)?;
    reset_output_dir(&dir)?;

    let files = write_pos_files(&dir, &board_name(board), stamp, &placements, &table)?;

    let smd_top = placements.top.iter().filter(|r| r.is_smd).count();
    let smd_bottom = placements.bottom.iter().filter(|r| r.is_smd).count();

    Ok(GenerateReport {
        output_dir: dir,
        files: vec![
            FileReport {
                path: files.all,
                top: placements.top.len(),
                bottom: placements.bottom.len(),
                total: placements.num_all,
            },
            FileReport {
                path: files.smd,
                top: smd_top,
                bottom: smd_bottom,
                total: placements.num_smt,
            },
        ],
    })
}

/// Table row for the human summary.
#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "File")]
    file: String,
    #[tabled(rename = "Top")]
    top: usize,
    #[tabled(rename = "Bottom")]
    bottom: usize,
    #[tabled(rename = "Total")]
    total: usize,
}

/// Execute the generate command.
pub fn execute(board_path: &Path, options: &GenerateOptions, format: OutputFormat) -> Result<()> {
    let board = Board::load(board_path)
        .with_context(|| format!("Failed to load board {}", board_path.display()))?;

    let report = generate(&board, options, &Stamp::current())?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Human => print_summary(&report),
    }

    Ok(())
}

fn print_summary(report: &GenerateReport) {
    if report.files.iter().all(|f| f.total == 0) {
        eprintln!("{} No placeable components found", "!".yellow());
    }

    let rows: Vec<SummaryRow> = report
        .files
        .iter()
        .map(|f| SummaryRow {
            file: f
                .path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            top: f.top,
            bottom: f.bottom,
            total: f.total,
        })
        .collect();

    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..=3)).with(Alignment::right()))
        .to_string();

    println!("\n{}", table);
    println!(
        "{} Wrote pos files to {}",
        "✓".green().bold(),
        report.output_dir.display().to_string().cyan()
    );
}
