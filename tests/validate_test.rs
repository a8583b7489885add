//! Excel検証の統合テスト

use material_excel::config::Config;
use material_excel::export::process_json_to_excel;
use material_excel::validator::validate_excel_format;
use material_excel_common::export::excel_core::{generate_workbook_buffer, SheetData, SheetOptions};
use material_excel_common::CellValue;
use serde_json::json;
use tempfile::tempdir;

#[test]
fn test_fresh_export_is_valid() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output = dir.path().join("export.xlsx");
    let input = json!([
        {"itemCode": "H-001", "itemNameCN": "把手", "material": "AL", "mainCategory": "H", "status": "APPROVED"},
        {"itemCode": "H-002", "itemNameCN": "把手", "material": "AL", "mainCategory": "H", "status": "APPROVED"},
        {"itemCode": "M-001", "itemNameCN": "模組", "material": "ABS", "mainCategory": "M", "status": "APPROVED"},
        {"itemCode": "O-001", "itemNameCN": "其他", "material": "PP", "mainCategory": "O", "status": "PENDING"}
    ]);
    process_json_to_excel(&input.to_string(), Some(&output), &Config::default()).unwrap();

    let report = validate_excel_format(&output);
    assert!(report.valid, "検証エラー: {:?}", report.errors);
    assert!(report.errors.is_empty());
    assert!(report.warnings.is_empty(), "警告: {:?}", report.warnings);
    assert_eq!(report.summary.get("Handle"), Some(&2));
    assert_eq!(report.summary.get("ModuleAssy"), Some(&1));
    assert!(!report.summary.contains_key("Summary"));
}

#[test]
fn test_split_sheets_are_recognized() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output = dir.path().join("split.xlsx");
    let input = json!([
        {"itemCode": "S-1", "mainCategory": "S", "status": "APPROVED"},
        {"itemCode": "S-2", "mainCategory": "S", "status": "APPROVED"},
        {"itemCode": "S-3", "mainCategory": "S", "status": "APPROVED"}
    ]);
    let config = Config {
        max_rows_per_sheet: 2,
        ..Config::default()
    };
    process_json_to_excel(&input.to_string(), Some(&output), &config).unwrap();

    let report = validate_excel_format(&output);
    assert!(report.valid);
    assert!(report.warnings.is_empty());
    assert_eq!(report.summary.get("Slide"), Some(&2));
    assert_eq!(report.summary.get("Slide_2"), Some(&1));
}

#[test]
fn test_foreign_workbook_reports_problems() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("foreign.xlsx");
    let sheets = vec![
        SheetData {
            name: "Handle".into(),
            headers: vec!["料號".into(), "料件說明".into()],
            rows: vec![vec![CellValue::Text("H-1".into()), CellValue::Text("把手".into())]],
        },
        SheetData {
            name: "Sheet1".into(),
            headers: vec!["A".into()],
            rows: vec![],
        },
    ];
    let buffer = generate_workbook_buffer(None, &sheets, &SheetOptions::plain()).unwrap();
    std::fs::write(&path, buffer).unwrap();

    let report = validate_excel_format(&path);
    assert!(!report.valid);
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].contains("料件基本材質"));
    assert!(report.warnings.iter().any(|w| w.contains("Sheet1")));
    assert_eq!(report.summary.get("Handle"), Some(&1));

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["valid"], false);
    assert_eq!(json["details"][0]["sheet"], "Handle");
}

#[test]
fn test_not_an_excel_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("broken.xlsx");
    std::fs::write(&path, "not a workbook").unwrap();

    let report = validate_excel_format(&path);
    assert!(!report.valid);
    assert_eq!(report.errors.len(), 1);
}
