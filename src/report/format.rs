//! Fixed-width table rendering for pos files.
//!
//! Every column is as wide as its longest text (header included) plus one
//! separating space. The side column is written last and never padded.

use crate::placement::{ComponentRecord, Placements, Side};

/// Column titles, side last.
pub const HEADER: [&str; 7] = ["Ref", "Val", "Package", "PosX", "PosY", "Rot", "Side"];

/// Placeholder written for an empty value.
pub const EMPTY_FIELD: &str = "~";

const REF: usize = 0;
const VAL: usize = 1;

/// Number of padded columns (everything but the side).
const PADDED: usize = 6;

/// How coordinates and rotation are turned into text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NumberFormat {
    /// Shortest text that round-trips (`10`, `12.7`, `-0.254`)
    #[default]
    Shortest,
    /// Fixed number of decimal places
    Fixed(usize),
}

impl NumberFormat {
    pub fn format(self, value: f64) -> String {
        match self {
            // `-0.0 == 0.0`, this drops the sign of negative zero
            NumberFormat::Shortest => {
                let value = if value == 0.0 { 0.0 } else { value };
                value.to_string()
            }
            NumberFormat::Fixed(places) => {
                let text = format!("{:.*}", places, value);
                match text.strip_prefix('-') {
                    Some(rest) if rest.chars().all(|c| c == '0' || c == '.') => rest.to_string(),
                    _ => text,
                }
            }
        }
    }
}

/// Text of one record, before padding.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Ref, Val, Package, PosX, PosY, Rot
    pub cells: [String; PADDED],
    pub side: Side,
    pub is_smd: bool,
}

impl Row {
    pub fn from_record(record: &ComponentRecord, numbers: NumberFormat) -> Self {
        Self {
            cells: [
                record.reference.clone(),
                record.value.clone(),
                record.package.clone(),
                numbers.format(record.position_x),
                numbers.format(record.position_y),
                numbers.format(record.rotation),
            ],
            side: record.side,
            is_smd: record.is_smd,
        }
    }
}

/// Maximum text width of each padded column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnWidths([usize; PADDED]);

impl ColumnWidths {
    /// Compute widths over the header and all rows.
    ///
    /// The Ref header counts one extra character for the leading `#`. Empty
    /// values count as zero width; the placeholder always fits under `Val`.
    pub fn from_rows<'a>(rows: impl IntoIterator<Item = &'a Row>) -> Self {
        let mut widths = [0; PADDED];
        for (width, title) in widths.iter_mut().zip(HEADER) {
            *width = title.chars().count();
        }
        widths[REF] += 1;

        for row in rows {
            for (width, cell) in widths.iter_mut().zip(&row.cells) {
                *width = (*width).max(cell.chars().count());
            }
        }

        Self(widths)
    }

    pub fn get(&self, column: usize) -> usize {
        self.0[column]
    }
}

/// Rows of both sides (top first) with shared column widths.
#[derive(Debug, Clone)]
pub struct PosTable {
    rows: Vec<Row>,
    widths: ColumnWidths,
}

impl PosTable {
    pub fn new(placements: &Placements, numbers: NumberFormat) -> Self {
        let rows: Vec<Row> = placements
            .iter()
            .map(|record| Row::from_record(record, numbers))
            .collect();
        let widths = ColumnWidths::from_rows(&rows);
        Self { rows, widths }
    }

    pub fn widths(&self) -> &ColumnWidths {
        &self.widths
    }

    /// All rows, top side first.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Surface-mount rows, in the same relative order.
    pub fn smd_rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter().filter(|row| row.is_smd)
    }

    /// Header line without line terminator, e.g. `#Ref Val Package ... Side`.
    pub fn header(&self) -> String {
        let mut line = String::from("#");
        for (column, title) in HEADER.iter().enumerate().take(PADDED) {
            // `#` occupies the first character of the Ref cell
            let width = if column == REF {
                self.widths.get(column)
            } else {
                self.widths.get(column) + 1
            };
            line.push_str(&pad(title, width));
        }
        line.push_str(HEADER[PADDED]);
        line
    }

    /// One data line without line terminator.
    pub fn render(&self, row: &Row) -> String {
        let mut line = String::new();
        for (column, cell) in row.cells.iter().enumerate() {
            let text = if column == VAL && cell.is_empty() {
                EMPTY_FIELD
            } else {
                cell.as_str()
            };
            line.push_str(&pad(text, self.widths.get(column) + 1));
        }
        line.push_str(row.side.as_str());
        line
    }
}

/// Left-align `text` in a field of `width` characters.
fn pad(text: &str, width: usize) -> String {
    format!("{:<width$}", text, width = width)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(reference: &str, value: &str, x: f64, y: f64, side: Side, is_smd: bool) -> ComponentRecord {
        ComponentRecord {
            reference: reference.to_string(),
            value: value.to_string(),
            package: "R_0603".to_string(),
            position_x: x,
            position_y: y,
            rotation: 0.0,
            is_smd,
            side,
        }
    }

    fn placements(top: Vec<ComponentRecord>, bottom: Vec<ComponentRecord>) -> Placements {
        Placements {
            num_all: top.len() + bottom.len(),
            num_smt: top.iter().chain(&bottom).filter(|r| r.is_smd).count(),
            top,
            bottom,
        }
    }

    #[test]
    fn test_shortest_number_format() {
        let f = NumberFormat::Shortest;
        assert_eq!(f.format(10.0), "10");
        assert_eq!(f.format(-5.0), "-5");
        assert_eq!(f.format(12.7), "12.7");
        assert_eq!(f.format(-0.254), "-0.254");
        assert_eq!(f.format(-0.0), "0");
        assert_eq!(f.format(90.0), "90");
    }

    #[test]
    fn test_fixed_number_format() {
        let f = NumberFormat::Fixed(3);
        assert_eq!(f.format(10.0), "10.000");
        assert_eq!(f.format(-5.12345), "-5.123");
        assert_eq!(f.format(-0.0), "0.000");
        assert_eq!(f.format(-0.0001), "0.000");
        assert_eq!(NumberFormat::Fixed(0).format(-0.4), "0");
        assert_eq!(NumberFormat::Fixed(0).format(-1.6), "-2");
    }

    #[test]
    fn test_widths_from_header_only() {
        let widths = ColumnWidths::from_rows(&[]);
        assert_eq!(widths, ColumnWidths([4, 3, 7, 4, 4, 3]));
    }

    #[test]
    fn test_widths_across_both_sides() {
        let table = PosTable::new(
            &placements(
                vec![record("R123", "10k", 1.5, -2.0, Side::Top, true)],
                vec![record("C1", "100nF/50V", -120.25, -3.0, Side::Bottom, false)],
            ),
            NumberFormat::Shortest,
        );
        assert_eq!(table.widths(), &ColumnWidths([4, 9, 7, 7, 4, 3]));
    }

    #[test]
    fn test_reference_column_alignment() {
        let table = PosTable::new(
            &placements(vec![record("R123", "10k", 10.0, -5.0, Side::Top, true)], vec![]),
            NumberFormat::Shortest,
        );

        assert_eq!(table.header(), "#Ref Val Package PosX PosY Rot Side");
        assert_eq!(table.render(&table.rows()[0]), "R123 10k R_0603  10   -5   0   top");
    }

    #[test]
    fn test_empty_value_placeholder() {
        let table = PosTable::new(
            &placements(
                vec![
                    record("R1", "", 1.0, 2.0, Side::Top, true),
                    record("R2", "4k7", 1.0, 2.0, Side::Top, true),
                ],
                vec![],
            ),
            NumberFormat::Shortest,
        );

        let lines: Vec<String> = table.rows().iter().map(|r| table.render(r)).collect();
        assert_eq!(lines[0], "R1   ~   R_0603  1    2    0   top");
        assert_eq!(lines[1], "R2   4k7 R_0603  1    2    0   top");
    }

    #[test]
    fn test_wide_columns_pad_header() {
        let table = PosTable::new(
            &placements(
                vec![],
                vec![record("CONN10", "USB_C_Receptacle", -12.5, -30.25, Side::Bottom, false)],
            ),
            NumberFormat::Shortest,
        );

        let header = table.header();
        let row = table.render(&table.rows()[0]);
        assert_eq!(header, "#Ref   Val              Package PosX  PosY   Rot Side");
        assert_eq!(row, "CONN10 USB_C_Receptacle R_0603  -12.5 -30.25 0   bottom");
        assert_eq!(header.find("Side"), row.find("bottom"));
    }

    #[test]
    fn test_smd_rows_keep_order() {
        let table = PosTable::new(
            &placements(
                vec![
                    record("C1", "1u", 0.0, 0.0, Side::Top, true),
                    record("J1", "Conn", 0.0, 0.0, Side::Top, false),
                ],
                vec![record("R1", "1k", 0.0, 0.0, Side::Bottom, true)],
            ),
            NumberFormat::Shortest,
        );

        let smd: Vec<&str> = table.smd_rows().map(|r| r.cells[REF].as_str()).collect();
        assert_eq!(smd, vec!["C1", "R1"]);
        assert_eq!(table.rows().len(), 3);
    }
}
