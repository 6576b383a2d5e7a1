//! Application constants for the pharmacode harvester
//!
//! File naming, delimiters and the spreadsheet layout conventions the
//! harvester relies on.

// =============================================================================
// Spreadsheet Layout
// =============================================================================

/// Zero-based index of the header row; its PharmaCode cell is never read
pub const HEADER_ROW_INDEX: usize = 0;

/// Separator between several GTINs packed into a single cell
pub const MULTI_GTIN_SEPARATOR: &str = "  ";

// =============================================================================
// Output File
// =============================================================================

/// Suffix appended to the millisecond timestamp of every output file
pub const OUTPUT_FILE_SUFFIX: &str = "_pharmacode.csv";

/// Field delimiter between GTIN and PharmaCode
pub const DEFAULT_DELIMITER: char = ',';

/// Fallback output directory when the input path has no parent component
pub const CURRENT_DIRECTORY: &str = ".";

// =============================================================================
// Environment
// =============================================================================

pub mod env_vars {
    pub const INPUT_PATH: &str = "PHARMACODE_INPUT";
    pub const GTIN_COLUMN: &str = "PHARMACODE_GTIN_COLUMN";
    pub const PHARMACODE_COLUMN: &str = "PHARMACODE_PHAR_COLUMN";
    pub const OUTPUT_DIR: &str = "PHARMACODE_OUTPUT_DIR";
}

/// Exit status when the required parameters are not all supplied
pub const EXIT_MISSING_PARAMETERS: i32 = 2;

/// Exit status for any other failed run
pub const EXIT_FAILURE: i32 = 1;

// =============================================================================
// Helper Functions
// =============================================================================

/// Build the output file name for a run started at `timestamp_millis`
pub fn output_file_name(timestamp_millis: i64) -> String {
    format!("{}{}", timestamp_millis, OUTPUT_FILE_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_file_name() {
        assert_eq!(
            output_file_name(1_700_000_000_123),
            "1700000000123_pharmacode.csv"
        );
    }

    #[test]
    fn test_multi_gtin_separator_is_two_spaces() {
        assert_eq!(MULTI_GTIN_SEPARATOR.len(), 2);
        assert!(MULTI_GTIN_SEPARATOR.chars().all(|c| c == ' '));
    }
}
