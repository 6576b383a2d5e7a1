//! Mapping writer
//!
//! Persists a pair mapping as `gtin,pharmacode` lines into a freshly named
//! `<millis>_pharmacode.csv` file.

use crate::constants::{DEFAULT_DELIMITER, output_file_name};
use crate::error::{HarvesterError, Result};
use crate::models::{PairMapping, WriteOutcome};

use chrono::Utc;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Writes pair mappings as delimited text
#[derive(Debug, Clone)]
pub struct MappingWriter {
    delimiter: u8,
}

impl Default for MappingWriter {
    fn default() -> Self {
        Self::new(DEFAULT_DELIMITER as u8)
    }
}

impl MappingWriter {
    pub fn new(delimiter: u8) -> Self {
        Self { delimiter }
    }

    /// Write `mapping` into a new timestamped file inside `destination_directory`
    pub fn write(&self, mapping: &PairMapping, destination_directory: &Path) -> Result<WriteOutcome> {
        if !destination_directory.is_dir() {
            return Err(HarvesterError::OutputDirectoryNotFound {
                path: destination_directory.to_path_buf(),
            });
        }

        let path = destination_directory.join(output_file_name(Utc::now().timestamp_millis()));
        self.write_to_path(mapping, &path)
    }

    /// Write `mapping` to exactly `path`, replacing any existing file
    ///
    /// A file left half-written by a failure is removed again.
    pub fn write_to_path(&self, mapping: &PairMapping, path: &Path) -> Result<WriteOutcome> {
        debug!("Writing {} pairs to {}", mapping.len(), path.display());

        match self.write_records(mapping, path) {
            Ok(count) => Ok(WriteOutcome {
                path: path.to_path_buf(),
                count,
            }),
            Err(error) => {
                if path.exists() {
                    if let Err(remove_error) = fs::remove_file(path) {
                        warn!(
                            "Failed to remove incomplete output {}: {}",
                            path.display(),
                            remove_error
                        );
                    }
                }
                Err(error)
            }
        }
    }

    fn write_records(&self, mapping: &PairMapping, path: &Path) -> Result<usize> {
        let output_error = |source| HarvesterError::OutputWriteFailed {
            path: PathBuf::from(path),
            source,
        };

        let file = File::create(path).map_err(output_error)?;
        let mut writer = WriterBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .quote_style(QuoteStyle::Necessary)
            .terminator(native_terminator())
            .from_writer(file);

        let mut count = 0;
        for (gtin, pharmacode) in mapping.iter() {
            writer.write_record([gtin, pharmacode])?;
            count += 1;
        }
        writer.flush().map_err(output_error)?;

        Ok(count)
    }
}

/// Platform newline convention
fn native_terminator() -> Terminator {
    if cfg!(windows) {
        Terminator::CRLF
    } else {
        Terminator::Any(b'\n')
    }
}
