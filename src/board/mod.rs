//! Read-only board model consumed by the placement pipeline.
//!
//! The model mirrors what a PCB tool exposes for a loaded board: the list of
//! placed footprints, the auxiliary origin, the board file path and the title
//! block. Lengths are kept in internal units (nanometers) and only converted
//! to millimeters by the extractor.

mod kicad;
mod sexpr;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub use kicad::parse_board;
pub use sexpr::ParseError;

/// Internal units per millimeter.
pub const IU_PER_MM: f64 = 1_000_000.0;

/// Convert internal units to millimeters.
pub fn to_mm(iu: i64) -> f64 {
    iu as f64 / IU_PER_MM
}

/// Convert millimeters to internal units, rounding to the nearest unit.
pub fn from_mm(mm: f64) -> i64 {
    (mm * IU_PER_MM).round() as i64
}

/// Errors raised while loading a board file.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("Failed to read board file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid S-expression in board file: {0}")]
    Syntax(#[from] ParseError),

    #[error("Not a KiCad board file (root is `{0}`, expected `kicad_pcb`)")]
    NotABoard(String),

    #[error("Malformed `{field}` in footprint {footprint}")]
    Malformed { footprint: String, field: &'static str },
}

/// A point in internal units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Build a point from millimeter coordinates.
    pub fn from_mm(x: f64, y: f64) -> Self {
        Self::new(from_mm(x), from_mm(y))
    }
}

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Placement technology attribute of a footprint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FootprintAttr {
    #[default]
    ThroughHole,
    Smd,
    /// Footprint with no physical part behind it (KiCad 5 `virtual`,
    /// KiCad 6+ `board_only`).
    Virtual,
}

impl FootprintAttr {
    /// Whether a footprint with this attribute is placed as a surface-mount part.
    pub fn is_smd(self) -> bool {
        matches!(self, FootprintAttr::Smd | FootprintAttr::Virtual)
    }
}

/// A placed footprint on the board.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Footprint {
    /// Reference designator (e.g., "R12", "REF**")
    pub reference: String,
    /// Value field (e.g., "10k", "Fiducial")
    pub value: String,
    /// Footprint identity as `Library:Item`
    pub fpid: String,
    /// Absolute position in internal units
    pub position: Point,
    /// Orientation in degrees
    pub orientation: f64,
    /// Mounted on the bottom side
    pub flipped: bool,
    pub attr: FootprintAttr,
}

impl Footprint {
    /// Library item name of the footprint identity (the part after `Library:`).
    pub fn lib_item_name(&self) -> &str {
        match self.fpid.split_once(':') {
            Some((_, item)) => item,
            None => &self.fpid,
        }
    }
}

/// Title block fields used by the pipeline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TitleBlock {
    pub comment1: String,
}

/// A loaded board.
#[derive(Debug, Clone, Default)]
pub struct Board {
    /// Path of the board file this model was loaded from
    pub file_name: PathBuf,
    pub footprints: Vec<Footprint>,
    /// Auxiliary axis origin in internal units
    pub aux_origin: Point,
    pub title_block: TitleBlock,
}

impl Board {
    /// Load a `.kicad_pcb` board file.
    pub fn load(path: &Path) -> Result<Self, BoardError> {
        let content = fs::read_to_string(path).map_err(|source| BoardError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut board = parse_board(&content)?;
        board.file_name = path.to_path_buf();

        log::debug!(
            "Loaded {} footprints from {}",
            board.footprints.len(),
            path.display()
        );

        Ok(board)
    }
}
