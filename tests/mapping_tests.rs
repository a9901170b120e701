//! End-to-end mapping tests against real .xlsx files

use calamine::{open_workbook, Data, Reader, Xlsx};
use pretty_assertions::assert_eq;
use quantity_mapper::cli::map_quantities;
use quantity_mapper::config::MapperConfig;
use quantity_mapper::error::MapperError;
use quantity_mapper::types::CellValue;
use rust_xlsxwriter::Workbook;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const PRIMARY: &str = "Foundations 20250421_100121";
const SECONDARY: &str = "Manabox scanned";
const OUTPUT_SHEET: &str = "Foundations Updated";

// ═══════════════════════════════════════════════════════════════════════════
// FIXTURES
// ═══════════════════════════════════════════════════════════════════════════

type Rows = Vec<Vec<CellValue>>;

fn write_workbook(path: &Path, sheets: &[(&str, Rows)]) {
    let mut workbook = Workbook::new();
    for (name, rows) in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(*name).unwrap();
        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                let (r, c) = (r as u32, c as u16);
                match cell {
                    CellValue::Empty => {}
                    CellValue::Int(i) => {
                        worksheet.write_number(r, c, *i as f64).unwrap();
                    }
                    CellValue::Float(f) | CellValue::DateTime(f) => {
                        worksheet.write_number(r, c, *f).unwrap();
                    }
                    CellValue::Text(s) | CellValue::Error(s) => {
                        worksheet.write_string(r, c, s).unwrap();
                    }
                    CellValue::Bool(b) => {
                        worksheet.write_boolean(r, c, *b).unwrap();
                    }
                }
            }
        }
    }
    workbook.save(path).unwrap();
}

fn t(s: &str) -> CellValue {
    CellValue::Text(s.to_string())
}

fn n(i: i64) -> CellValue {
    CellValue::Int(i)
}

fn listings(rows: &[(&str, &str)]) -> Rows {
    let mut out = vec![vec![t("Name"), t("Number"), t("Condition"), t("Price")]];
    for (i, (number, condition)) in rows.iter().enumerate() {
        out.push(vec![t("Card"), t(number), t(condition), n(i as i64 + 1)]);
    }
    out
}

fn scans(rows: &[(&str, &str, i64)]) -> Rows {
    let mut out = vec![vec![
        t("Name"),
        t("Collector number"),
        t("Foil"),
        t("Quantity"),
    ]];
    for (collector, foil, qty) in rows {
        out.push(vec![t("Card"), t(collector), t(foil), n(*qty)]);
    }
    out
}

struct Fixture {
    _dir: TempDir,
    input: PathBuf,
    output: PathBuf,
}

impl Fixture {
    fn new(sheets: &[(&str, Rows)]) -> Self {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("input.xlsx");
        let output = dir.path().join("output.xlsx");
        write_workbook(&input, sheets);
        Self {
            _dir: dir,
            input,
            output,
        }
    }

    fn standard(primary: &[(&str, &str)], secondary: &[(&str, &str, i64)]) -> Self {
        Self::new(&[(PRIMARY, listings(primary)), (SECONDARY, scans(secondary))])
    }

    fn config(&self) -> MapperConfig {
        MapperConfig::new(&self.input, &self.output)
    }
}

fn read_rows(path: &Path, sheet: &str) -> Vec<Vec<Data>> {
    let mut workbook: Xlsx<_> = open_workbook(path).unwrap();
    let range = workbook.worksheet_range(sheet).unwrap();
    range.rows().map(|r| r.to_vec()).collect()
}

fn range_start(path: &Path, sheet: &str) -> Option<(u32, u32)> {
    let mut workbook: Xlsx<_> = open_workbook(path).unwrap();
    workbook.worksheet_range(sheet).unwrap().start()
}

fn sheet_names(path: &Path) -> Vec<String> {
    let workbook: Xlsx<_> = open_workbook(path).unwrap();
    workbook.sheet_names()
}

/// Values of the `Add to Quantity` column in the output
fn added_quantities(path: &Path) -> Vec<Data> {
    let rows = read_rows(path, OUTPUT_SHEET);
    let idx = rows[0]
        .iter()
        .position(|h| h == &Data::String("Add to Quantity".to_string()))
        .expect("Add to Quantity column");
    rows[1..].iter().map(|r| r[idx].clone()).collect()
}

// ═══════════════════════════════════════════════════════════════════════════
// MAPPING BEHAVIOUR
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_foil_listing_matches_foil_scan() {
    let fx = Fixture::standard(&[("042", "NM Foil")], &[("042", "foil", 3)]);
    let report = map_quantities(&fx.config()).unwrap();

    assert_eq!(added_quantities(&fx.output), vec![Data::Float(3.0)]);
    assert_eq!(report.matched_rows, 1);
    assert_eq!(report.unmatched_rows, 0);
}

#[test]
fn test_unmatched_listing_gets_zero() {
    let fx = Fixture::standard(&[("042", "NM")], &[("042", "foil", 3)]);
    map_quantities(&fx.config()).unwrap();

    assert_eq!(added_quantities(&fx.output), vec![Data::Float(0.0)]);
}

#[test]
fn test_keys_ignore_surrounding_whitespace() {
    let fx = Fixture::standard(
        &[("123 ", "near mint"), ("  9", "Foil")],
        &[("123", "normal", 4), ("9 ", "foil", 2)],
    );
    map_quantities(&fx.config()).unwrap();

    assert_eq!(
        added_quantities(&fx.output),
        vec![Data::Float(4.0), Data::Float(2.0)]
    );
}

#[test]
fn test_foil_detection_is_case_insensitive() {
    let fx = Fixture::standard(
        &[
            ("1", "Foil"),
            ("1", "FOIL"),
            ("1", "slightly played, foil"),
            ("1", "near mint"),
        ],
        &[("1", "foil", 7), ("1", "normal", 1)],
    );
    map_quantities(&fx.config()).unwrap();

    assert_eq!(
        added_quantities(&fx.output),
        vec![
            Data::Float(7.0),
            Data::Float(7.0),
            Data::Float(7.0),
            Data::Float(1.0)
        ]
    );
}

#[test]
fn test_duplicate_scan_keys_last_row_wins() {
    let fx = Fixture::standard(&[("5", "NM")], &[("5", "normal", 2), ("5 ", "normal", 6)]);
    let report = map_quantities(&fx.config()).unwrap();

    assert_eq!(added_quantities(&fx.output), vec![Data::Float(6.0)]);
    assert_eq!(report.duplicate_keys, 1);
}

#[test]
fn test_numeric_collector_numbers_match_text() {
    let primary = vec![
        vec![t("Number"), t("Condition")],
        vec![n(17), t("NM")],
    ];
    let secondary = vec![
        vec![t("Collector number"), t("Foil"), t("Quantity")],
        vec![t("17"), t("normal"), n(3)],
    ];
    let fx = Fixture::new(&[(PRIMARY, primary), (SECONDARY, secondary)]);
    map_quantities(&fx.config()).unwrap();

    assert_eq!(added_quantities(&fx.output), vec![Data::Float(3.0)]);
}

#[test]
fn test_boolean_foil_column_never_matches() {
    let secondary = vec![
        vec![t("Collector number"), t("Foil"), t("Quantity")],
        vec![t("1"), CellValue::Bool(true), n(3)],
        vec![t("2"), CellValue::Bool(false), n(4)],
    ];
    let fx = Fixture::new(&[
        (PRIMARY, listings(&[("1", "Foil"), ("2", "NM")])),
        (SECONDARY, secondary),
    ]);
    let report = map_quantities(&fx.config()).unwrap();

    assert_eq!(
        added_quantities(&fx.output),
        vec![Data::Float(0.0), Data::Float(0.0)]
    );
    assert_eq!(report.unrecognised_foil_rows, 2);
}

// ═══════════════════════════════════════════════════════════════════════════
// OUTPUT WORKBOOK SHAPE
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_output_has_two_sheets_in_order() {
    let fx = Fixture::new(&[
        ("Notes", vec![vec![t("ignored")]]),
        (PRIMARY, listings(&[("1", "NM")])),
        (SECONDARY, scans(&[("1", "normal", 1)])),
    ]);
    map_quantities(&fx.config()).unwrap();

    assert_eq!(sheet_names(&fx.output), vec![OUTPUT_SHEET, SECONDARY]);
}

#[test]
fn test_primary_columns_preserved_and_extended() {
    let fx = Fixture::standard(&[("8", "Foil"), ("9", "NM")], &[("8", "foil", 1)]);
    map_quantities(&fx.config()).unwrap();

    let rows = read_rows(&fx.output, OUTPUT_SHEET);
    let s = |v: &str| Data::String(v.to_string());
    assert_eq!(
        rows,
        vec![
            vec![
                s("Name"),
                s("Number"),
                s("Condition"),
                s("Price"),
                s("Add to Quantity")
            ],
            vec![
                s("Card"),
                s("8"),
                s("Foil"),
                Data::Float(1.0),
                Data::Float(1.0)
            ],
            vec![
                s("Card"),
                s("9"),
                s("NM"),
                Data::Float(2.0),
                Data::Float(0.0)
            ],
        ]
    );
}

#[test]
fn test_secondary_sheet_copied_unchanged() {
    let fx = Fixture::standard(
        &[("1", "NM")],
        &[("1", "normal", 1), (" 2 ", "foil", 5), ("3", "Etched", 2)],
    );
    map_quantities(&fx.config()).unwrap();

    assert_eq!(
        read_rows(&fx.output, SECONDARY),
        read_rows(&fx.input, SECONDARY)
    );
}

#[test]
fn test_leading_blank_column_kept_in_place() {
    let secondary = vec![
        vec![CellValue::Empty, t("Collector number"), t("Foil"), t("Quantity")],
        vec![CellValue::Empty, t("042"), t("foil"), n(3)],
    ];
    let primary = vec![
        vec![CellValue::Empty, t("Number"), t("Condition")],
        vec![CellValue::Empty, t("042"), t("NM Foil")],
    ];
    let fx = Fixture::new(&[(PRIMARY, primary), (SECONDARY, secondary)]);
    map_quantities(&fx.config()).unwrap();

    assert_eq!(range_start(&fx.input, SECONDARY), Some((0, 1)));
    assert_eq!(range_start(&fx.output, SECONDARY), Some((0, 1)));
    assert_eq!(
        read_rows(&fx.output, SECONDARY),
        read_rows(&fx.input, SECONDARY)
    );

    assert_eq!(range_start(&fx.output, OUTPUT_SHEET), Some((0, 1)));
    assert_eq!(added_quantities(&fx.output), vec![Data::Float(3.0)]);
    let rows = read_rows(&fx.output, OUTPUT_SHEET);
    assert_eq!(rows[0][0], Data::String("Number".to_string()));
}

#[test]
fn test_custom_sheet_and_column_names() {
    let primary = vec![
        vec![t("No."), t("State")],
        vec![t("77"), t("Lightly Played Etched")],
    ];
    let secondary = vec![
        vec![t("CN"), t("Finish"), t("Count")],
        vec![t("77"), t("foil"), n(9)],
    ];
    let fx = Fixture::new(&[("Listings", primary), ("Scan", secondary)]);

    let mut config = fx.config();
    config.primary_sheet = "Listings".into();
    config.secondary_sheet = "Scan".into();
    config.number_col = "No.".into();
    config.condition_col = "State".into();
    config.collector_col = "CN".into();
    config.foil_col = "Finish".into();
    config.quantity_col = "Count".into();
    config.foil_keyword = "ETCHED".into();
    config.output_sheet = "Listings Updated".into();
    map_quantities(&config).unwrap();

    assert_eq!(sheet_names(&fx.output), vec!["Listings Updated", "Scan"]);
    let rows = read_rows(&fx.output, "Listings Updated");
    assert_eq!(rows[1][2], Data::Float(9.0));
}

#[test]
fn test_existing_output_is_overwritten() {
    let fx = Fixture::standard(&[("1", "NM")], &[("1", "normal", 1)]);
    std::fs::write(&fx.output, b"stale").unwrap();

    map_quantities(&fx.config()).unwrap();
    assert_eq!(added_quantities(&fx.output), vec![Data::Float(1.0)]);
}

// ═══════════════════════════════════════════════════════════════════════════
// FAILURES
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_missing_input_file() {
    let dir = TempDir::new().unwrap();
    let config = MapperConfig::new(dir.path().join("nope.xlsx"), dir.path().join("out.xlsx"));

    let err = map_quantities(&config).unwrap_err();
    assert!(matches!(err, MapperError::FileNotFound(_)));
    assert!(!config.output.exists());
}

#[test]
fn test_input_not_a_workbook() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("broken.xlsx");
    std::fs::write(&input, "Number,Condition\n1,NM\n").unwrap();
    let config = MapperConfig::new(&input, dir.path().join("out.xlsx"));

    let err = map_quantities(&config).unwrap_err();
    assert!(matches!(err, MapperError::Format(_)), "got {err:?}");
}

#[test]
fn test_missing_secondary_sheet_writes_nothing() {
    let fx = Fixture::new(&[(PRIMARY, listings(&[("1", "NM")]))]);

    let err = map_quantities(&fx.config()).unwrap_err();
    match err {
        MapperError::SheetNotFound { sheet, available } => {
            assert_eq!(sheet, SECONDARY);
            assert_eq!(available, vec![PRIMARY.to_string()]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!fx.output.exists());
}

#[test]
fn test_missing_column_writes_nothing() {
    let secondary = vec![
        vec![t("Collector number"), t("Quantity")],
        vec![t("1"), n(1)],
    ];
    let fx = Fixture::new(&[(PRIMARY, listings(&[("1", "NM")])), (SECONDARY, secondary)]);

    let err = map_quantities(&fx.config()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Column 'Foil' not found in sheet 'Manabox scanned'"
    );
    assert!(!fx.output.exists());
}

#[test]
fn test_output_sheet_clash_rejected() {
    let fx = Fixture::standard(&[("1", "NM")], &[("1", "normal", 1)]);
    let mut config = fx.config();
    config.output_sheet = SECONDARY.into();

    let err = map_quantities(&config).unwrap_err();
    assert!(matches!(err, MapperError::Config(_)));
    assert!(!fx.output.exists());
}

#[test]
fn test_output_sheet_clash_in_other_case_keeps_existing_file() {
    let fx = Fixture::standard(&[("1", "NM")], &[("1", "normal", 1)]);
    std::fs::write(&fx.output, b"previous run").unwrap();
    let mut config = fx.config();
    config.output_sheet = "MANABOX SCANNED".into();

    let err = map_quantities(&config).unwrap_err();
    assert!(matches!(err, MapperError::Config(_)));
    assert_eq!(std::fs::read(&fx.output).unwrap(), b"previous run");
}

#[test]
fn test_unwritable_output_path() {
    let fx = Fixture::standard(&[("1", "NM")], &[("1", "normal", 1)]);
    let mut config = fx.config();
    config.output = fx.input.with_file_name("missing-dir").join("out.xlsx");

    let err = map_quantities(&config).unwrap_err();
    assert!(matches!(err, MapperError::Export(_)));
}
