//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use material_excel::error::MaterialExcelError;
use material_excel::workbook::read_workbook;
use std::path::Path;
use tempfile::tempdir;

/// 存在しないワークブックを読み込んだ場合
#[test]
fn test_read_nonexistent_workbook() {
    let result = read_workbook(Path::new("/nonexistent/path/12345.xlsx"));
    assert!(matches!(result, Err(MaterialExcelError::WorkbookRead(_))));
}

/// 拡張子はxlsxだが中身が壊れている場合
#[test]
fn test_read_broken_workbook() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("broken.xlsx");
    std::fs::write(&path, b"PK\x03\x04 broken").unwrap();

    assert!(read_workbook(&path).is_err());
}

/// MaterialExcelErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        MaterialExcelError::Config("テスト設定エラー".to_string()),
        MaterialExcelError::MissingArgument("-i/--input".to_string()),
        MaterialExcelError::WorkbookRead("壊れたファイル".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// MissingArgumentエラーのメッセージ確認
#[test]
fn test_missing_argument_message() {
    let err = MaterialExcelError::MissingArgument("--files".to_string());
    let display = format!("{}", err);

    assert!(display.contains("引数"));
    assert!(display.contains("--files"));
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: MaterialExcelError = io_err.into();

    assert!(matches!(err, MaterialExcelError::Io(_)));
    assert!(format!("{}", err).contains("IO"));
}

/// JSONエラーからの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: MaterialExcelError = json_err.into();

    assert!(matches!(err, MaterialExcelError::JsonParse(_)));
}

/// common::Errorからの変換（透過的エラー）
#[test]
fn test_common_error_transparent() {
    let common_err = material_excel_common::Error::Workbook("シート名が重複".to_string());
    let err: MaterialExcelError = common_err.into();

    assert!(matches!(err, MaterialExcelError::Common(_)));
    assert!(format!("{}", err).contains("シート名が重複"));
}
