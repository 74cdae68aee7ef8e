//! Reference designator ordering.

use once_cell::sync::Lazy;
use regex::Regex;

use super::ComponentRecord;

static TRAILING_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]*$").expect("valid regex"));

/// Reference with its trailing digits stripped ("R12" -> "R").
pub fn ref_group(reference: &str) -> &str {
    match TRAILING_DIGITS.find(reference) {
        Some(m) => &reference[..m.start()],
        None => reference,
    }
}

/// Trailing number of a reference ("R12" -> 12). Missing or oversized
/// suffixes give 0.
pub fn ref_num(reference: &str) -> u64 {
    TRAILING_DIGITS
        .find(reference)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

/// Sort records by reference prefix, then by numeric suffix.
///
/// Two stable passes: first by number, then by prefix, so records sharing a
/// prefix stay in numeric order and equal keys keep their input order.
pub fn sort_by_reference(records: &mut [ComponentRecord]) {
    records.sort_by_cached_key(|r| ref_num(&r.reference));
    records.sort_by_cached_key(|r| ref_group(&r.reference).to_string());
}
