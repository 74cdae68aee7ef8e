//! Footprint filtering and coordinate transform.

use super::{is_excluded_value, is_non_annotated_ref, sort_by_reference, ComponentRecord, Placements, Side};
use crate::board::{to_mm, Board, Footprint, Point};

/// Extract placement records from a board.
///
/// Non-annotated references and excluded values are skipped. Both side lists
/// are sorted by reference before returning.
pub fn extract_placements(board: &Board) -> Placements {
    let mut placements = Placements::default();

    for footprint in &board.footprints {
        if is_non_annotated_ref(&footprint.reference) {
            log::debug!("Skipping non-annotated footprint {}", footprint.reference);
            continue;
        }

        if is_excluded_value(&footprint.value) {
            log::debug!(
                "Skipping {} (excluded value {})",
                footprint.reference,
                footprint.value
            );
            continue;
        }

        if footprint.reference.is_empty() {
            log::warn!("Footprint {} has an empty reference", footprint.fpid);
        }

        let record = to_record(footprint, board.aux_origin);

        placements.num_all += 1;
        if record.is_smd {
            placements.num_smt += 1;
        }

        match record.side {
            Side::Top => placements.top.push(record),
            Side::Bottom => placements.bottom.push(record),
        }
    }

    sort_by_reference(&mut placements.top);
    sort_by_reference(&mut placements.bottom);

    placements
}

/// Build a record for one kept footprint.
fn to_record(footprint: &Footprint, origin: Point) -> ComponentRecord {
    let pos = footprint.position - origin;

    let mut position_x = to_mm(pos.x);
    if footprint.flipped {
        position_x = -position_x;
    }

    ComponentRecord {
        reference: footprint.reference.clone(),
        value: footprint.value.clone(),
        package: footprint.lib_item_name().to_string(),
        position_x,
        position_y: -to_mm(pos.y),
        rotation: footprint.orientation,
        is_smd: footprint.attr.is_smd(),
        side: if footprint.flipped { Side::Bottom } else { Side::Top },
    }
}
