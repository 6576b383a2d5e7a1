//! Configuration management and validation.
//!
//! Holds the parameters of a harvest run: where the spreadsheet lives,
//! which columns carry GTINs and PharmaCodes, and where the mapping goes.

use crate::constants::{CURRENT_DIRECTORY, DEFAULT_DELIMITER};
use crate::error::{HarvesterError, Result};
use crate::models::ColumnSelection;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Configuration for a single harvest run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarvestConfig {
    /// Spreadsheet to read; its first sheet is used
    pub input_path: PathBuf,

    /// Zero-based GTIN column
    pub gtin_column: usize,

    /// Zero-based PharmaCode column
    pub pharmacode_column: usize,

    /// Directory for the output file (defaults to the input file's directory)
    pub output_dir: Option<PathBuf>,

    /// Field delimiter between GTIN and PharmaCode
    pub delimiter: char,
}

impl HarvestConfig {
    pub fn new(input_path: impl Into<PathBuf>, gtin_column: usize, pharmacode_column: usize) -> Self {
        Self {
            input_path: input_path.into(),
            gtin_column,
            pharmacode_column,
            output_dir: None,
            delimiter: DEFAULT_DELIMITER,
        }
    }

    /// Write the output file into `output_dir` instead of next to the input
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(output_dir.into());
        self
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn columns(&self) -> ColumnSelection {
        ColumnSelection::new(self.gtin_column, self.pharmacode_column)
    }

    /// Directory the output file is created in
    pub fn output_directory(&self) -> PathBuf {
        match &self.output_dir {
            Some(dir) => dir.clone(),
            None => match self.input_path.parent() {
                Some(parent) if parent != Path::new("") => parent.to_path_buf(),
                _ => PathBuf::from(CURRENT_DIRECTORY),
            },
        }
    }

    /// Check the configuration before any file is touched
    pub fn validate(&self) -> Result<()> {
        if self.input_path.as_os_str().is_empty() {
            return Err(HarvesterError::Configuration {
                message: "Input path is empty".to_string(),
            });
        }

        if !self.delimiter.is_ascii_graphic() || self.delimiter == '"' {
            return Err(HarvesterError::Configuration {
                message: format!("Unsupported delimiter: {:?}", self.delimiter),
            });
        }

        if self.gtin_column == self.pharmacode_column {
            debug!(
                "GTIN and PharmaCode share column {}; every pair will map a value to itself",
                self.gtin_column
            );
        }

        Ok(())
    }
}
