//! KiCad `.kicad_pcb` loader.
//!
//! Understands both the KiCad 5 layout (`(module ...)` with `fp_text` fields)
//! and the KiCad 6+ layout (`(footprint ...)` with `property` fields).

use super::sexpr::{self, Sexpr};
use super::{Board, BoardError, Footprint, FootprintAttr, Point, TitleBlock};

/// Parse board file content into a [`Board`].
///
/// The returned board has an empty `file_name`; [`Board::load`] fills it in.
pub fn parse_board(content: &str) -> Result<Board, BoardError> {
    let root = sexpr::parse(content)?;

    match root.tag() {
        Some("kicad_pcb") => {}
        other => return Err(BoardError::NotABoard(other.unwrap_or("").to_string())),
    }

    let aux_origin = root
        .find("setup")
        .and_then(|setup| setup.find("aux_axis_origin"))
        .and_then(parse_xy)
        .unwrap_or_default();

    let title_block = parse_title_block(&root);

    let mut footprints = Vec::new();
    for node in root.children() {
        if matches!(node.tag(), Some("module") | Some("footprint")) {
            footprints.push(parse_footprint(node)?);
        }
    }

    Ok(Board {
        file_name: Default::default(),
        footprints,
        aux_origin,
        title_block,
    })
}

fn parse_title_block(root: &Sexpr) -> TitleBlock {
    let comment1 = root
        .find("title_block")
        .into_iter()
        .flat_map(Sexpr::children)
        .filter(|c| c.tag() == Some("comment"))
        .filter_map(Sexpr::as_list)
        .find(|items| items.get(1).and_then(Sexpr::as_atom) == Some("1"))
        .and_then(|items| items.get(2).and_then(Sexpr::as_atom))
        .unwrap_or_default()
        .to_string();

    TitleBlock { comment1 }
}

fn parse_footprint(node: &Sexpr) -> Result<Footprint, BoardError> {
    let items = node.as_list().unwrap_or_default();
    let fpid = items
        .get(1)
        .and_then(Sexpr::as_atom)
        .unwrap_or_default()
        .to_string();

    let mut footprint = Footprint {
        fpid,
        ..Default::default()
    };

    for child in node.children() {
        let Some(list) = child.as_list() else {
            continue;
        };
        match child.tag() {
            Some("layer") => {
                footprint.flipped = list.get(1).and_then(Sexpr::as_atom) == Some("B.Cu");
            }
            Some("at") => {
                footprint.position = parse_xy(child).ok_or_else(|| BoardError::Malformed {
                    footprint: footprint.fpid.clone(),
                    field: "at",
                })?;
                footprint.orientation = list.get(3).and_then(Sexpr::as_f64).unwrap_or(0.0);
            }
            Some("attr") => {
                footprint.attr = parse_attr(list);
            }
            Some("fp_text") | Some("property") => {
                let key = list.get(1).and_then(Sexpr::as_atom);
                let text = list.get(2).and_then(Sexpr::as_atom).unwrap_or_default();
                match key {
                    Some("reference") | Some("Reference") => {
                        footprint.reference = text.to_string();
                    }
                    Some("value") | Some("Value") => {
                        footprint.value = text.to_string();
                    }
                    _ => {}
                }
            }
            _ => {}
        }
    }

    Ok(footprint)
}

/// Map `(attr ...)` flags to a placement attribute.
fn parse_attr(list: &[Sexpr]) -> FootprintAttr {
    let flags: Vec<&str> = list.iter().skip(1).filter_map(Sexpr::as_sym).collect();

    if flags.contains(&"smd") {
        FootprintAttr::Smd
    } else if flags.contains(&"virtual") || flags.contains(&"board_only") {
        FootprintAttr::Virtual
    } else {
        FootprintAttr::ThroughHole
    }
}

/// Parse `(tag x y ...)` with millimeter coordinates into a point.
fn parse_xy(node: &Sexpr) -> Option<Point> {
    let items = node.as_list()?;
    let x = items.get(1)?.as_f64()?;
    let y = items.get(2)?.as_f64()?;
    Some(Point::from_mm(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    const KICAD5_BOARD: &str = r#"(kicad_pcb (version 20171130) (host pcbnew 5.1.9)
  (general (thickness 1.6))
  (title_block
    (title "Demo")
    (comment 1 "DEMO.001")
    (comment 2 "Second")
  )
  (setup
    (last_trace_width 0.25)
    (aux_axis_origin 100 50)
  )
  (module Resistor_SMD:R_0603_1608Metric (layer F.Cu) (tedit 5B301BBD) (tstamp 5C0A1234)
    (at 110 55 90)
    (descr "Resistor SMD 0603")
    (attr smd)
    (fp_text reference R1 (at 0 -1.43 90) (layer F.SilkS)
      (effects (font (size 1 1) (thickness 0.15)))
    )
    (fp_text value 10k (at 0 1.43 90) (layer F.Fab)
      (effects (font (size 1 1) (thickness 0.15)))
    )
    (pad 1 smd roundrect (at -0.7875 0 90) (size 0.875 0.95) (layers F.Cu F.Paste F.Mask))
  )
  (module Connector_PinHeader_2.54mm:PinHeader_1x02_P2.54mm_Vertical (layer B.Cu) (tedit 59FED5CC) (tstamp 5C0A5678)
    (at 120.5 60)
    (fp_text reference J1 (at 0 -2.33) (layer B.SilkS)
      (effects (font (size 1 1) (thickness 0.15)) (justify mirror))
    )
    (fp_text value Conn_01x02 (at 0 4.87) (layer B.Fab)
      (effects (font (size 1 1) (thickness 0.15)) (justify mirror))
    )
  )
  (module Fiducial:Fiducial_1mm_Mask2mm (layer F.Cu) (tedit 5C18CB26) (tstamp 5C0A9ABC)
    (at 101 51)
    (attr virtual)
    (fp_text reference FID1 (at 0 -2) (layer F.SilkS))
    (fp_text value Fiducial (at 0 2) (layer F.Fab))
  )
)"#;

    const KICAD7_BOARD: &str = r#"(kicad_pcb (version 20221018) (generator pcbnew)
  (setup (aux_axis_origin 0 0))
  (footprint "Capacitor_SMD:C_0402_1005Metric" (layer "B.Cu")
    (at 12.7 -3.81 180)
    (property "Reference" "C3" (at 0 -1.16 0) (layer "B.SilkS"))
    (property "Value" "100n" (at 0 1.16 0) (layer "B.Fab"))
    (attr smd)
  )
  (footprint "MountingHole:MountingHole_3.2mm_M3" (layer "F.Cu")
    (at 5 5)
    (property "Reference" "H1" (at 0 -4.2 0) (layer "F.SilkS"))
    (property "Value" "MountingHole" (at 0 4.2 0) (layer "F.Fab"))
    (attr exclude_from_pos_files exclude_from_bom)
  )
  (footprint "Logo:Board_Logo" (layer "F.Cu")
    (at 20 20)
    (property "Reference" "G1")
    (property "Value" "")
    (attr board_only exclude_from_pos_files)
  )
)"#;

    #[test]
    fn test_parse_kicad5_board() {
        let board = parse_board(KICAD5_BOARD).unwrap();

        assert_eq!(board.aux_origin, Point::from_mm(100.0, 50.0));
        assert_eq!(board.title_block.comment1, "DEMO.001");
        assert_eq!(board.footprints.len(), 3);

        let r1 = &board.footprints[0];
        assert_eq!(r1.reference, "R1");
        assert_eq!(r1.value, "10k");
        assert_eq!(r1.lib_item_name(), "R_0603_1608Metric");
        assert_eq!(r1.position, Point::from_mm(110.0, 55.0));
        assert_eq!(r1.orientation, 90.0);
        assert!(!r1.flipped);
        assert_eq!(r1.attr, FootprintAttr::Smd);

        let j1 = &board.footprints[1];
        assert_eq!(j1.reference, "J1");
        assert!(j1.flipped);
        assert_eq!(j1.orientation, 0.0);
        assert_eq!(j1.attr, FootprintAttr::ThroughHole);

        let fid = &board.footprints[2];
        assert_eq!(fid.value, "Fiducial");
        assert_eq!(fid.attr, FootprintAttr::Virtual);
    }

    #[test]
    fn test_parse_kicad7_board() {
        let board = parse_board(KICAD7_BOARD).unwrap();

        assert_eq!(board.aux_origin, Point::default());
        assert_eq!(board.title_block.comment1, "");
        assert_eq!(board.footprints.len(), 3);

        let c3 = &board.footprints[0];
        assert_eq!(c3.reference, "C3");
        assert_eq!(c3.value, "100n");
        assert_eq!(c3.lib_item_name(), "C_0402_1005Metric");
        assert_eq!(c3.position, Point::from_mm(12.7, -3.81));
        assert_eq!(c3.orientation, 180.0);
        assert!(c3.flipped);
        assert_eq!(c3.attr, FootprintAttr::Smd);

        assert_eq!(board.footprints[1].attr, FootprintAttr::ThroughHole);

        let logo = &board.footprints[2];
        assert_eq!(logo.value, "");
        assert_eq!(logo.attr, FootprintAttr::Virtual);
    }

    #[test]
    fn test_numeric_value_kept_verbatim() {
        let board = parse_board(
            "(kicad_pcb (module R_0402 (layer F.Cu) (at 0 0) \
             (fp_text reference R7 (at 0 0)) (fp_text value 0.10 (at 0 0))))",
        )
        .unwrap();
        assert_eq!(board.footprints[0].value, "0.10");
        assert_eq!(board.footprints[0].lib_item_name(), "R_0402");
    }

    #[test]
    fn test_rejects_non_board() {
        let err = parse_board("(kicad_sch (version 20230121))").unwrap_err();
        assert!(matches!(err, BoardError::NotABoard(ref root) if root == "kicad_sch"));
    }

    #[test]
    fn test_rejects_malformed_position() {
        let err = parse_board("(kicad_pcb (footprint \"R\" (at x 1)))").unwrap_err();
        assert!(matches!(err, BoardError::Malformed { field: "at", .. }));
    }

    #[test]
    fn test_syntax_error() {
        let err = parse_board("(kicad_pcb (module").unwrap_err();
        assert!(matches!(err, BoardError::Syntax(_)));
    }
}
