//! Output directory handling and pos file writing.

use std::env;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use super::format::{PosTable, Row};
use super::{Stamp, EOL};
use crate::board::Board;
use crate::placement::Placements;

/// Paths of the two generated files.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PosFiles {
    pub all: PathBuf,
    pub smd: PathBuf,
}

/// Output directory `<dir>` beneath the directory holding the board file.
pub fn output_dir(board: &Board, dir_name: &str) -> Result<PathBuf> {
    let board_path = if board.file_name.is_absolute() {
        board.file_name.clone()
    } else {
        env::current_dir()
            .context("Failed to resolve current directory")?
            .join(&board.file_name)
    };

    let parent = board_path.parent().unwrap_or_else(|| Path::new("/"));
    Ok(parent.join(dir_name))
}

/// Base name for the output files: title block comment 1, or the board file
/// name without extension.
pub fn board_name(board: &Board) -> String {
    if !board.title_block.comment1.is_empty() {
        return board.title_block.comment1.clone();
    }

    board
        .file_name
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Delete `path` recursively (if present) and recreate it empty.
pub fn reset_output_dir(path: &Path) -> Result<()> {
    if path.exists() && !path.is_dir() {
        anyhow::bail!(
            "Output path {} exists and is not a directory",
            path.display()
        );
    }

    match fs::remove_dir_all(path) {
        Ok(()) => log::debug!("Removed {}", path.display()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => {
            return Err(e).with_context(|| {
                format!("Failed to remove output directory: {}", path.display())
            })
        }
    }

    fs::create_dir_all(path)
        .with_context(|| format!("Failed to create output directory: {}", path.display()))?;

    Ok(())
}

/// Write `<base>-ALL.pos` and `<base>-SMD.pos` into `dir`.
///
/// The directory must already exist.
pub fn write_pos_files(
    dir: &Path,
    base: &str,
    stamp: &Stamp,
    placements: &Placements,
    table: &PosTable,
) -> Result<PosFiles> {
    let files = PosFiles {
        all: dir.join(format!("{}-ALL.pos", base)),
        smd: dir.join(format!("{}-SMD.pos", base)),
    };

    write_pos_file(&files.all, stamp, placements.num_all, table, table.rows().iter())?;
    write_pos_file(&files.smd, stamp, placements.num_smt, table, table.smd_rows())?;

    Ok(files)
}

fn write_pos_file<'a>(
    path: &Path,
    stamp: &Stamp,
    total: usize,
    table: &PosTable,
    rows: impl Iterator<Item = &'a Row>,
) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create pos file: {}", path.display()))?;
    let mut out = BufWriter::new(file);

    write_pos(&mut out, stamp, total, table, rows)
        .and_then(|()| out.flush())
        .with_context(|| format!("Failed to write pos file: {}", path.display()))?;

    log::debug!("Wrote {} ({} components)", path.display(), total);
    Ok(())
}

/// Serialize one pos file.
pub fn write_pos<'a, W: Write>(
    out: &mut W,
    stamp: &Stamp,
    total: usize,
    table: &PosTable,
    rows: impl Iterator<Item = &'a Row>,
) -> io::Result<()> {
    write!(out, "{}{}", stamp, EOL)?;
    write!(out, "# Total:{}{}", total, EOL)?;
    write!(out, "{}{}", table.header(), EOL)?;
    for row in rows {
        write!(out, "{}{}", table.render(row), EOL)?;
    }
    Ok(())
}
