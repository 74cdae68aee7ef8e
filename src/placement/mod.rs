//! Component placement records extracted from a board.
//!
//! This module turns the footprints of a [`Board`](crate::board::Board) into
//! sorted per-side lists of [`ComponentRecord`] values.

mod extract;
pub mod normalize;
mod sort;

use serde::Serialize;

pub use extract::extract_placements;
pub use sort::{ref_group, ref_num, sort_by_reference};

/// Footprint values that mark non-placed parts (test probes, holes, fiducials,
/// no-connect markers). Matched exactly and case-sensitively.
pub const EXCLUDED_VALUES: [&str; 5] = ["TestPoint_Probe", "MountingHole_Pad", "Fiducial", "NC", "nc"];

/// Board side a component is mounted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Top,
    Bottom,
}

impl Side {
    pub fn as_str(self) -> &'static str {
        match self {
            Side::Top => "top",
            Side::Bottom => "bottom",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One physical component placement.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentRecord {
    /// Reference designator (e.g., "R12")
    pub reference: String,
    /// Value field, may be empty
    pub value: String,
    /// Footprint library item name
    pub package: String,
    /// X in mm relative to the auxiliary origin, mirrored on the bottom side
    pub position_x: f64,
    /// Y in mm relative to the auxiliary origin, pointing up
    pub position_y: f64,
    /// Orientation in degrees
    pub rotation: f64,
    pub is_smd: bool,
    pub side: Side,
}

/// Extraction result: per-side sorted lists plus counters.
#[derive(Debug, Clone, Default)]
pub struct Placements {
    pub top: Vec<ComponentRecord>,
    pub bottom: Vec<ComponentRecord>,
    /// Number of kept components on both sides
    pub num_all: usize,
    /// Number of kept surface-mount components
    pub num_smt: usize,
}

impl Placements {
    /// All records, top side first.
    pub fn iter(&self) -> impl Iterator<Item = &ComponentRecord> {
        self.top.iter().chain(self.bottom.iter())
    }

    /// Surface-mount records, top side first.
    pub fn smd(&self) -> impl Iterator<Item = &ComponentRecord> {
        self.iter().filter(|r| r.is_smd)
    }

    /// Apply `f` to every record, keeping side lists and counters.
    pub fn map_records<F>(self, mut f: F) -> Self
    where
        F: FnMut(ComponentRecord) -> ComponentRecord,
    {
        Self {
            top: self.top.into_iter().map(&mut f).collect(),
            bottom: self.bottom.into_iter().map(&mut f).collect(),
            num_all: self.num_all,
            num_smt: self.num_smt,
        }
    }
}

/// Whether a reference designator is non-annotated (e.g. "R*", "REF**").
pub fn is_non_annotated_ref(reference: &str) -> bool {
    reference.ends_with('*')
}

/// Whether a value marks a component that is never placed.
pub fn is_excluded_value(value: &str) -> bool {
    EXCLUDED_VALUES.contains(&value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_annotated_ref() {
        assert!(is_non_annotated_ref("R*"));
        assert!(is_non_annotated_ref("REF**"));
        assert!(!is_non_annotated_ref("R1"));
        assert!(!is_non_annotated_ref("*R1"));
        assert!(!is_non_annotated_ref(""));
    }

    #[test]
    fn test_excluded_value_is_exact() {
        assert!(is_excluded_value("Fiducial"));
        assert!(is_excluded_value("NC"));
        assert!(is_excluded_value("nc"));
        assert!(!is_excluded_value("Nc"));
        assert!(!is_excluded_value("Fiducial_1mm"));
        assert!(!is_excluded_value("MountingHole"));
        assert!(!is_excluded_value(""));
    }

    #[test]
    fn test_side_display() {
        assert_eq!(Side::Top.to_string(), "top");
        assert_eq!(Side::Bottom.to_string(), "bottom");
    }
}
