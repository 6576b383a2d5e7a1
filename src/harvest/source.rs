//! Row sources for the extractor
//!
//! A row source yields the GTIN and PharmaCode cells of every row of the
//! first sheet, in sheet order. `WorkbookSource` decodes spreadsheet files
//! with calamine; `InMemorySource` holds a ready-made grid.

use crate::error::{HarvesterError, Result};
use crate::models::{CellValue, ColumnSelection, RawRow};

use calamine::{open_workbook_auto, Data, Range, Reader};
use std::path::Path;
use tracing::debug;

/// Ordered access to the two harvested cells of each row
pub trait RowSource {
    /// Rows in sheet order; the first yielded row is the header
    fn raw_rows(&self, columns: ColumnSelection) -> impl Iterator<Item = RawRow> + '_;
}

/// First worksheet of a spreadsheet file, fully loaded
#[derive(Debug)]
pub struct WorkbookSource {
    range: Range<Data>,
}

impl WorkbookSource {
    /// Open `path` and load its first worksheet
    ///
    /// The format is chosen from the file extension (xlsx, xlsm, xlsb, xls, ods).
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(HarvesterError::InputNotFound {
                path: path.to_path_buf(),
            });
        }

        let mut workbook = open_workbook_auto(path)?;
        if let Some(name) = workbook.sheet_names().first() {
            debug!("Using worksheet '{}' of {}", name, path.display());
        }

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| HarvesterError::NoWorksheet {
                path: path.to_path_buf(),
            })??;

        debug!(
            "Worksheet spans {:?} to {:?} ({} rows)",
            range.start(),
            range.end(),
            range.height()
        );

        Ok(Self { range })
    }

    /// Cell at an absolute sheet position, `None` when empty or out of range
    fn cell(&self, row: u32, column: usize) -> Option<CellValue> {
        let column = u32::try_from(column).ok()?;
        self.range.get_value((row, column)).and_then(cell_value)
    }
}

impl RowSource for WorkbookSource {
    fn raw_rows(&self, columns: ColumnSelection) -> impl Iterator<Item = RawRow> + '_ {
        // Column indices are absolute; the loaded range may not start at A1
        let bounds = self.range.start().zip(self.range.end());
        bounds
            .into_iter()
            .flat_map(move |((first_row, _), (last_row, _))| {
                (first_row..=last_row).map(move |row| {
                    RawRow::new(
                        self.cell(row, columns.gtin),
                        self.cell(row, columns.pharmacode),
                    )
                })
            })
    }
}

/// Convert a decoded cell into a harvestable value
fn cell_value(data: &Data) -> Option<CellValue> {
    match data {
        Data::Empty => None,
        Data::String(text) => Some(CellValue::Text(text.clone())),
        Data::Float(number) => Some(CellValue::Number(*number)),
        Data::Int(number) => Some(CellValue::Number(*number as f64)),
        other => Some(CellValue::Text(other.to_string())),
    }
}

/// Grid of optional cells held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    rows: Vec<Vec<Option<CellValue>>>,
}

impl InMemorySource {
    pub fn new(rows: Vec<Vec<Option<CellValue>>>) -> Self {
        Self { rows }
    }
}

impl RowSource for InMemorySource {
    fn raw_rows(&self, columns: ColumnSelection) -> impl Iterator<Item = RawRow> + '_ {
        self.rows.iter().map(move |row| {
            let cell = |column: usize| row.get(column).cloned().flatten();
            RawRow::new(cell(columns.gtin), cell(columns.pharmacode))
        })
    }
}
