//! Integration tests for the harvest pipeline through the public API
//!
//! Rows are supplied by an in-memory source so the tests exercise the same
//! extraction and writing path as a spreadsheet run without needing a
//! workbook fixture.

use pharmacode_harvester::{
    CellValue, ColumnSelection, HarvestConfig, Harvester, InMemorySource, MappingWriter,
    PairMapping, RawRow, RowSource, extract, extract_all,
};
use std::fs;
use tempfile::TempDir;

fn text(value: &str) -> Option<CellValue> {
    Some(CellValue::from(value))
}

fn number(value: f64) -> Option<CellValue> {
    Some(CellValue::from(value))
}

fn rows(pairs: Vec<(Option<CellValue>, Option<CellValue>)>) -> Vec<RawRow> {
    pairs
        .into_iter()
        .map(|(gtin, pharmacode)| RawRow::new(gtin, pharmacode))
        .collect()
}

/// Re-read a written mapping file as (key, value) records
fn read_mapping(path: &std::path::Path) -> Vec<(String, String)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .expect("Failed to open written mapping");
    reader
        .records()
        .map(|record| {
            let record = record.expect("Malformed mapping line");
            (record[0].to_string(), record[1].to_string())
        })
        .collect()
}

/// Blank or absent GTIN cells never produce an entry, whatever the PharmaCode
#[test]
fn test_blank_gtin_rows_produce_nothing() {
    let mapping = extract_all(rows(vec![
        (text("GTIN"), text("PHAR")),
        (None, number(1.0)),
        (text(""), number(2.0)),
        (text("   "), number(3.0)),
        (text("\t\n"), text("4")),
    ]));

    assert!(mapping.is_empty());
}

/// Absent or non-numeric PharmaCodes never produce an entry
#[test]
fn test_invalid_pharmacode_rows_produce_nothing() {
    let mapping = extract_all(rows(vec![
        (text("GTIN"), text("PHAR")),
        (text("7680000000011"), None),
        (number(7680000000028.0), None),
        (text("7680000000035"), text("abc")),
        (text("7680000000042"), number(-12.0)),
    ]));

    assert!(mapping.is_empty());
}

/// The header row's PharmaCode column is never consulted
#[test]
fn test_header_pharmacode_is_never_read() {
    let mut mapping = PairMapping::new();
    extract(
        Some(&CellValue::from("7680000000011")),
        Some(&CellValue::from(1234.0)),
        0,
        &mut mapping,
    );

    assert!(mapping.is_empty());
}

#[test]
fn test_double_space_cell_yields_two_entries() {
    let mapping = extract_all(rows(vec![
        (text("GTIN"), text("PHAR")),
        (text("A  B"), number(7.0)),
    ]));

    let entries: Vec<_> = mapping.iter().collect();
    assert_eq!(entries, vec![("A", "7"), ("B", "7")]);
}

#[test]
fn test_last_row_wins_for_duplicate_gtin() {
    let mapping = extract_all(rows(vec![
        (text("GTIN"), text("PHAR")),
        (text("123"), number(5.0)),
        (text("123"), number(9.0)),
    ]));

    assert_eq!(mapping.len(), 1);
    assert_eq!(mapping.get("123"), Some("9"));
}

#[test]
fn test_inner_whitespace_is_stripped() {
    let mapping = extract_all(rows(vec![
        (text("GTIN"), text("PHAR")),
        (text(" 99 100 0 "), number(3.0)),
    ]));

    assert_eq!(mapping.get("991000"), Some("3"));
    assert_eq!(mapping.len(), 1);
}

/// Writing N entries and reading them back yields exactly those N entries
#[test]
fn test_write_and_reread_mapping() {
    let temp_dir = TempDir::new().unwrap();
    let mut mapping = PairMapping::new();
    for index in 0..250u64 {
        mapping.insert(
            format!("76800000{:05}", index),
            (1_000_000 + index).to_string(),
        );
    }

    let outcome = MappingWriter::default()
        .write(&mapping, temp_dir.path())
        .unwrap();

    assert_eq!(outcome.count, 250);
    let records = read_mapping(&outcome.path);
    assert_eq!(records.len(), 250);
    let expected: Vec<(String, String)> = mapping
        .iter()
        .map(|(gtin, pharmacode)| (gtin.to_string(), pharmacode.to_string()))
        .collect();
    assert_eq!(records, expected);
}

/// Two runs over the same sheet write the same content under different names
#[test]
fn test_repeated_runs_have_identical_content() {
    let temp_dir = TempDir::new().unwrap();
    let source = InMemorySource::new(vec![
        vec![text("GTIN"), text("PHAR")],
        vec![text("7680000000011  7680000000028"), number(111.0)],
        vec![text("7680000000035"), number(333.3)],
        vec![text("7680000000011"), number(444.0)],
    ]);
    let config = HarvestConfig::new(temp_dir.path().join("stamm.xlsx"), 0, 1);
    let harvester = Harvester::new(config).unwrap();

    let first = harvester.run_with_source(&source).unwrap();
    std::thread::sleep(std::time::Duration::from_millis(5));
    let second = harvester.run_with_source(&source).unwrap();

    assert_ne!(first.output_path, second.output_path);
    assert_eq!(
        fs::read_to_string(&first.output_path).unwrap(),
        fs::read_to_string(&second.output_path).unwrap()
    );
    assert_eq!(
        read_mapping(&first.output_path),
        vec![
            ("7680000000011".to_string(), "444".to_string()),
            ("7680000000028".to_string(), "111".to_string()),
            ("7680000000035".to_string(), "333".to_string()),
        ]
    );
}

#[test]
fn test_source_columns_follow_selection() {
    let source = InMemorySource::new(vec![
        vec![text("PHAR"), None, text("GTIN")],
        vec![number(42.0), None, text("7680000000011")],
    ]);

    let rows: Vec<RawRow> = source.raw_rows(ColumnSelection::new(2, 0)).collect();

    assert_eq!(rows[1].gtin, text("7680000000011"));
    assert_eq!(rows[1].pharmacode, number(42.0));
    let mapping = extract_all(rows);
    assert_eq!(mapping.get("7680000000011"), Some("42"));
}
