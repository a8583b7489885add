//! 既存ワークブックの読み込み（calamine）

use crate::error::Result;
use calamine::{open_workbook_auto, Data, Reader};
use material_excel_common::CellValue;
use std::path::Path;

/// 読み込んだシート
///
/// 列位置は A 列始まりにそろえる。
#[derive(Debug, Clone)]
pub struct SheetContents {
    pub name: String,
    /// 1行目の見出し（列位置どおり、空欄は ""）
    pub headers: Vec<String>,
    /// 見出し行以降の全行
    pub rows: Vec<Vec<CellValue>>,
}

impl SheetContents {
    /// calamine の範囲から組み立てる
    ///
    /// `start` は範囲の左上 (行, 列)。1行目が空なら見出しなし、
    /// 左側の空列は Empty で埋める。
    pub fn from_range<'a>(
        name: String,
        start: Option<(u32, u32)>,
        rows: impl Iterator<Item = &'a [Data]>,
    ) -> Self {
        let (start_row, start_col) = start.unwrap_or((0, 0));
        let pad = start_col as usize;

        let mut rows = rows.map(|row| {
            let mut cells = vec![CellValue::Empty; pad];
            cells.extend(row.iter().map(cell_value));
            cells
        });

        let headers = if start_row == 0 {
            rows.next()
                .map(|header| header.iter().map(|c| c.to_string()).collect())
                .unwrap_or_default()
        } else {
            Vec::new()
        };

        Self {
            name,
            headers,
            rows: rows.collect(),
        }
    }

    /// 空でない見出し（左から順）
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.headers.iter().map(String::as_str).filter(|h| !h.is_empty())
    }

    /// 1つでも値のある行
    pub fn non_empty_rows(&self) -> impl Iterator<Item = &Vec<CellValue>> {
        self.rows.iter().filter(|row| row.iter().any(|c| !c.is_blank()))
    }
}

pub fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(v) => CellValue::Number(*v),
        Data::Int(v) => CellValue::Number(*v as f64),
        Data::Bool(v) => CellValue::Bool(*v),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        other => CellValue::Text(other.to_string()),
    }
}

/// 全シートを読み込む
pub fn read_workbook(path: &Path) -> Result<Vec<SheetContents>> {
    let mut workbook = open_workbook_auto(path)?;
    let mut sheets = Vec::new();

    for name in workbook.sheet_names() {
        let range = workbook.worksheet_range(&name)?;
        let sheet = SheetContents::from_range(name, range.start(), range.rows());
        sheets.push(sheet);
    }

    Ok(sheets)
}
