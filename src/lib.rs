//! PharmaCode Harvester Library
//!
//! Extracts GTIN to PharmaCode pairs from the first sheet of a spreadsheet
//! and writes them as a deduplicated, comma-delimited mapping file.
//!
//! This library provides tools for:
//! - Decoding spreadsheets into typed rows (xlsx, xlsm, xlsb, xls, ods)
//! - Normalizing GTIN cells, including cells that pack several GTINs
//! - Validating and truncating numeric PharmaCodes
//! - Deduplicating pairs with last-write-wins semantics
//! - Writing the mapping to a timestamped `<millis>_pharmacode.csv` file

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod harvest;
pub mod models;

pub use config::HarvestConfig;
pub use error::{HarvesterError, Result};
pub use harvest::Harvester;
pub use harvest::extractor::{extract, extract_all};
pub use harvest::source::{InMemorySource, RowSource, WorkbookSource};
pub use harvest::writer::MappingWriter;
pub use models::{CellValue, ColumnSelection, HarvestStats, PairMapping, RawRow, WriteOutcome};
