//! Error handling for pharmacode harvesting.
//!
//! Per-row data problems never surface here; only failures that abort a
//! whole run (unreadable input, unwritable output, bad configuration).

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarvesterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Workbook error: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Input file not found: {path}")]
    InputNotFound { path: PathBuf },

    #[error("No worksheet found in workbook: {path}")]
    NoWorksheet { path: PathBuf },

    #[error("Output directory not found: {path}")]
    OutputDirectoryNotFound { path: PathBuf },

    #[error("Failed to write mapping to {path}: {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

pub type Result<T> = std::result::Result<T, HarvesterError>;
