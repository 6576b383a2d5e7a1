//! Core data structures for pharmacode harvesting.
//!
//! Defines typed cell values, the raw row pair handed to the extractor,
//! the deduplicated pair mapping and the statistics reported by a run.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// A present spreadsheet cell, either text or numeric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Text(String),
    Number(f64),
}

impl CellValue {
    /// Render the cell as text, the way it reads in the sheet
    ///
    /// Integral numbers render without a fractional part, so a GTIN stored
    /// as a number keeps all of its digits.
    pub fn as_text(&self) -> String {
        match self {
            CellValue::Text(text) => text.clone(),
            CellValue::Number(number) => number.to_string(),
        }
    }

    /// Interpret the cell as a number and drop any fractional part
    ///
    /// Text cells are accepted when they parse as a number after trimming.
    /// Returns `None` for anything that is not a finite number.
    pub fn truncated_integer(&self) -> Option<i64> {
        let number = match self {
            CellValue::Number(number) => *number,
            CellValue::Text(text) => text.trim().parse::<f64>().ok()?,
        };

        if number.is_finite() {
            Some(number.trunc() as i64)
        } else {
            None
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_text())
    }
}

impl From<&str> for CellValue {
    fn from(text: &str) -> Self {
        CellValue::Text(text.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(number: f64) -> Self {
        CellValue::Number(number)
    }
}

/// The two cells of one source row that the extractor looks at
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    pub gtin: Option<CellValue>,
    pub pharmacode: Option<CellValue>,
}

impl RawRow {
    pub fn new(gtin: Option<CellValue>, pharmacode: Option<CellValue>) -> Self {
        Self { gtin, pharmacode }
    }
}

/// Zero-based column indices of the GTIN and PharmaCode columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSelection {
    pub gtin: usize,
    pub pharmacode: usize,
}

impl ColumnSelection {
    pub fn new(gtin: usize, pharmacode: usize) -> Self {
        Self { gtin, pharmacode }
    }
}

/// Deduplicated GTIN to PharmaCode mapping
///
/// Keys iterate in the order they were first inserted. Inserting an existing
/// key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairMapping {
    entries: IndexMap<String, String>,
}

impl PairMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite an entry, returning the replaced PharmaCode
    pub fn insert(&mut self, gtin: String, pharmacode: String) -> Option<String> {
        self.entries.insert(gtin, pharmacode)
    }

    pub fn get(&self, gtin: &str) -> Option<&str> {
        self.entries.get(gtin).map(String::as_str)
    }

    pub fn contains_key(&self, gtin: &str) -> bool {
        self.entries.contains_key(gtin)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(gtin, pharmacode)| (gtin.as_str(), pharmacode.as_str()))
    }
}

/// Result of writing a mapping to disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOutcome {
    pub path: PathBuf,
    pub count: usize,
}

/// Processing statistics
#[derive(Debug, Default)]
pub struct HarvestStats {
    pub rows_read: usize,
    pub pairs_written: usize,
    pub output_path: PathBuf,
    pub processing_time_ms: u128,
}
