//! 既存Excelの欄位検証

use crate::workbook::{read_workbook, SheetContents};
use material_excel_common::export::excel_core::SUMMARY_SHEET_NAME;
use material_excel_common::schema::{columns_for, REQUIRED_COLUMNS};
use material_excel_common::Category;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

/// シートごとの検証結果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SheetDetail {
    pub sheet: String,
    pub rows: usize,
    pub columns: usize,
    pub missing_columns: Vec<String>,
}

/// 検証結果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    /// シート名 → データ行数
    pub summary: BTreeMap<String, usize>,
    pub details: Vec<SheetDetail>,
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            summary: BTreeMap::new(),
            details: Vec::new(),
        }
    }
}

impl ValidationReport {
    fn error(&mut self, message: String) {
        tracing::error!("{}", message);
        self.errors.push(message);
        self.valid = false;
    }

    fn warning(&mut self, message: String) {
        tracing::warn!("{}", message);
        self.warnings.push(message);
    }

    /// 1シート分の検証
    pub fn check_sheet(&mut self, sheet: &SheetContents) {
        let Some(category) = Category::from_sheet_name(&sheet.name) else {
            self.warning(format!("工作表 {} 非標準類別", sheet.name));
            return;
        };

        let expected = columns_for(category);
        let has = |column: &&str| sheet.column_names().any(|h| h == *column);

        let missing_required: Vec<&str> = REQUIRED_COLUMNS.iter().copied().filter(|c| !has(c)).collect();
        if !missing_required.is_empty() {
            self.error(format!(
                "工作表 {} 缺少必要欄位: {}",
                sheet.name,
                missing_required.join(", ")
            ));
        }

        let missing_columns: Vec<String> = expected
            .iter()
            .filter(|c| !has(*c))
            .map(|c| c.to_string())
            .collect();
        if !missing_columns.is_empty() {
            self.warning(format!(
                "工作表 {} 缺少欄位: {}",
                sheet.name,
                missing_columns.join(", ")
            ));
        }

        let rows = sheet.non_empty_rows().count();
        let columns = sheet.column_names().count();
        tracing::debug!("{}: {} 筆資料, {} 個欄位", sheet.name, rows, columns);

        self.summary.insert(sheet.name.clone(), rows);
        self.details.push(SheetDetail {
            sheet: sheet.name.clone(),
            rows,
            columns,
            missing_columns,
        });
    }
}

/// Excelファイルを検証（読み込み失敗もレポートに記録する）
pub fn validate_excel_format(path: &Path) -> ValidationReport {
    let mut report = ValidationReport::default();

    match read_workbook(path) {
        Ok(sheets) => {
            for sheet in sheets.iter().filter(|s| s.name != SUMMARY_SHEET_NAME) {
                report.check_sheet(sheet);
            }
        }
        Err(e) => report.error(format!("檔案讀取錯誤: {}", e)),
    }

    report
}
