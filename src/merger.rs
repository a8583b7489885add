//! 複数Excelのシート単位の統合
//!
//! 各ファイルの見出し行をキーとして行を読み替えるため、
//! ファイル間で見出しが異なると列がずれることがある。

use crate::error::Result;
use crate::export::resolve_output_path;
use crate::workbook::{read_workbook, SheetContents};
use material_excel_common::export::excel_core::{
    generate_workbook_buffer, SheetData, SheetOptions, SUMMARY_SHEET_NAME,
};
use material_excel_common::CellValue;
use std::path::{Path, PathBuf};

pub const MERGE_FILE_PREFIX: &str = "Merged";

/// 見出しをキーにした1行（キーは初出順、重複キーは後勝ち）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergedRow {
    cells: Vec<(String, CellValue)>,
}

impl MergedRow {
    /// 見出しが空欄の列は捨てる
    pub fn from_row(headers: &[String], row: &[CellValue]) -> Self {
        let mut merged = Self::default();
        for (header, value) in headers.iter().zip(row) {
            if !header.is_empty() {
                merged.set(header, value.clone());
            }
        }
        merged
    }

    fn set(&mut self, key: &str, value: CellValue) {
        match self.cells.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = value,
            None => self.cells.push((key.to_string(), value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.cells.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(k, _)| k.as_str())
    }
}

/// 同名シートの統合結果
#[derive(Debug, Clone, Default)]
pub struct MergedSheet {
    pub name: String,
    pub rows: Vec<MergedRow>,
}

impl MergedSheet {
    /// 先頭行のキーを見出しとして書き出し用データに変換（行がなければ None）
    pub fn to_sheet_data(&self) -> Option<SheetData> {
        let first = self.rows.first()?;
        let headers: Vec<String> = first.keys().map(str::to_string).collect();

        let rows = self
            .rows
            .iter()
            .map(|row| {
                headers
                    .iter()
                    .map(|h| row.get(h).cloned().unwrap_or_default())
                    .collect()
            })
            .collect();

        Some(SheetData {
            name: self.name.clone(),
            headers,
            rows,
        })
    }
}

/// 1ファイル分のシートを統合結果に追加（Summary は除外）
pub fn append_sheets(merged: &mut Vec<MergedSheet>, sheets: &[SheetContents]) {
    for sheet in sheets.iter().filter(|s| s.name != SUMMARY_SHEET_NAME) {
        let index = match merged.iter().position(|m| m.name == sheet.name) {
            Some(index) => index,
            None => {
                merged.push(MergedSheet {
                    name: sheet.name.clone(),
                    rows: Vec::new(),
                });
                merged.len() - 1
            }
        };

        merged[index].rows.extend(
            sheet
                .non_empty_rows()
                .map(|row| MergedRow::from_row(&sheet.headers, row)),
        );
    }
}

/// 読み込めたファイルのみ統合（失敗したファイルはログを出して飛ばす）
pub fn collect_sheets(paths: &[PathBuf]) -> Vec<MergedSheet> {
    let mut merged = Vec::new();

    for path in paths {
        match read_workbook(path) {
            Ok(sheets) => {
                append_sheets(&mut merged, &sheets);
                tracing::info!("成功讀取: {}", path.display());
            }
            Err(e) => tracing::error!("讀取檔案失敗 {}: {}", path.display(), e),
        }
    }

    merged
}

/// 複数のExcelを1つのファイルに統合
pub fn merge_excel_files(paths: &[PathBuf], output: Option<&Path>) -> Result<PathBuf> {
    tracing::info!("開始合併 {} 個檔案", paths.len());

    let output_path = resolve_output_path(output, MERGE_FILE_PREFIX);
    let sheets: Vec<SheetData> = collect_sheets(paths)
        .iter()
        .filter_map(MergedSheet::to_sheet_data)
        .collect();

    let buffer = generate_workbook_buffer(None, &sheets, &SheetOptions::plain())
        .inspect_err(|e| tracing::error!("Excel生成失敗: {}", e))?;

    std::fs::write(&output_path, buffer)
        .inspect_err(|e| tracing::error!("儲存檔案失敗 {}: {}", output_path.display(), e))?;

    tracing::info!("合併完成: {}", output_path.display());
    Ok(output_path)
}
