//! GTIN / PharmaCode pair extraction
//!
//! Turns the two raw cells of a row into zero or more mapping entries.
//! Rows that cannot yield a pair (blank GTIN, missing or non-numeric
//! PharmaCode, header row) are skipped without an error.

use crate::constants::{HEADER_ROW_INDEX, MULTI_GTIN_SEPARATOR};
use crate::models::{CellValue, PairMapping, RawRow};

/// Fold one row into `mapping`
///
/// Later rows overwrite earlier entries with the same GTIN.
pub fn extract(
    raw_gtin: Option<&CellValue>,
    raw_pharmacode: Option<&CellValue>,
    row_index: usize,
    mapping: &mut PairMapping,
) {
    let gtin_text = raw_gtin.map(CellValue::as_text).unwrap_or_default();
    if gtin_text.trim().is_empty() {
        return;
    }

    let pharmacode_text = if row_index > HEADER_ROW_INDEX {
        raw_pharmacode.map(render_pharmacode).unwrap_or_default()
    } else {
        String::new()
    };
    if !is_decimal_digits(&pharmacode_text) {
        return;
    }

    let pharmacode = strip_whitespace(&pharmacode_text);
    for candidate in split_gtins(&gtin_text) {
        mapping.insert(strip_whitespace(candidate), pharmacode.clone());
    }
}

/// Split a GTIN cell on the double-space separator
///
/// Trailing empty fragments are dropped; leading and inner ones are kept,
/// so `"  A"` yields `["", "A"]` and `"A  "` yields `["A"]`.
pub fn split_gtins(gtin_text: &str) -> Vec<&str> {
    let mut candidates: Vec<&str> = gtin_text.split(MULTI_GTIN_SEPARATOR).collect();
    while candidates.len() > 1 && candidates.last() == Some(&"") {
        candidates.pop();
    }
    candidates
}

/// Build a mapping from an ordered sequence of rows
///
/// Row indices are assigned in iteration order, so the first row is
/// treated as the header.
pub fn extract_all<I>(rows: I) -> PairMapping
where
    I: IntoIterator<Item = RawRow>,
{
    let mut mapping = PairMapping::new();
    for (row_index, row) in rows.into_iter().enumerate() {
        extract(
            row.gtin.as_ref(),
            row.pharmacode.as_ref(),
            row_index,
            &mut mapping,
        );
    }
    mapping
}

/// Truncated decimal rendering of a PharmaCode cell, empty if not numeric
fn render_pharmacode(cell: &CellValue) -> String {
    cell.truncated_integer()
        .map(|code| code.to_string())
        .unwrap_or_default()
}

/// True for non-empty text made only of ASCII decimal digits
pub fn is_decimal_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

/// Remove every whitespace character, not just the surrounding ones
pub fn strip_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}
