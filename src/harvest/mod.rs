//! Harvest pipeline.
//!
//! Reads the first sheet of a spreadsheet, folds every row into a
//! deduplicated GTIN to PharmaCode mapping and writes that mapping once
//! all rows have been consumed.

pub mod extractor;
pub mod source;
pub mod writer;

#[cfg(test)]
pub mod tests;

use self::{
    extractor::extract_all,
    source::{RowSource, WorkbookSource},
    writer::MappingWriter,
};

use crate::config::HarvestConfig;
use crate::error::Result;
use crate::models::{HarvestStats, PairMapping};

use std::time::Instant;
use tracing::{debug, info};

/// Runs one harvest from spreadsheet to mapping file
#[derive(Debug)]
pub struct Harvester {
    config: HarvestConfig,
    writer: MappingWriter,
}

impl Harvester {
    /// Create a harvester for a validated configuration
    pub fn new(config: HarvestConfig) -> Result<Self> {
        config.validate()?;
        let writer = MappingWriter::new(config.delimiter as u8);
        Ok(Self { config, writer })
    }

    /// Main processing entry point
    pub fn run(&self) -> Result<HarvestStats> {
        info!("Reading {}", self.config.input_path.display());
        let source = WorkbookSource::open(&self.config.input_path)?;
        self.run_with_source(&source)
    }

    /// Harvest from an already opened row source
    pub fn run_with_source<S: RowSource>(&self, source: &S) -> Result<HarvestStats> {
        let start_time = Instant::now();

        let (mapping, rows_read) = self.collect_pairs(source);
        debug!("{} rows read, {} distinct GTINs", rows_read, mapping.len());

        let outcome = self
            .writer
            .write(&mapping, &self.config.output_directory())?;

        info!(
            "Process has successfully finished. {} lines written to {}.",
            outcome.count,
            outcome.path.display()
        );

        Ok(HarvestStats {
            rows_read,
            pairs_written: outcome.count,
            output_path: outcome.path,
            processing_time_ms: start_time.elapsed().as_millis(),
        })
    }

    /// Build the mapping without writing it
    pub fn collect_pairs<S: RowSource>(&self, source: &S) -> (PairMapping, usize) {
        let mut rows_read = 0;
        let rows = source
            .raw_rows(self.config.columns())
            .inspect(|_| rows_read += 1);
        let mapping = extract_all(rows);
        (mapping, rows_read)
    }
}
