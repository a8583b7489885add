//! Excel生成（共通ライブラリ）
//!
//! 大類シート・統合シート・摘要シートを rust_xlsxwriter でバッファに書き出す。

use crate::error::{Error, Result};
use crate::layout::{column_width, SUMMARY_COL_WIDTH};
use crate::schema::{is_numeric_column, UNIT_COLUMN, UNIT_OPTIONS};
use crate::types::CellValue;
use rust_xlsxwriter::*;

pub const SUMMARY_SHEET_NAME: &str = "Summary";

/// 1シート分のデータ（先頭行は headers）
#[derive(Debug, Clone, Default)]
pub struct SheetData {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

/// シートの書式オプション
#[derive(Debug, Clone)]
pub struct SheetOptions {
    /// 数値欄位に適用する書式（None なら標準）
    pub number_format: Option<String>,
    pub auto_filter: bool,
    /// 0 始まりの (行, 列)
    pub freeze_panes: Option<(u32, u16)>,
    /// 單位欄位にドロップダウンを付ける
    pub unit_validation: bool,
    /// 欄位名から欄幅を決める
    pub keyword_widths: bool,
}

impl SheetOptions {
    /// 見出し書式のみ（統合ファイル用）
    pub fn plain() -> Self {
        Self {
            number_format: None,
            auto_filter: false,
            freeze_panes: None,
            unit_validation: false,
            keyword_widths: false,
        }
    }
}

/// 摘要シートの内容
#[derive(Debug, Clone, Default)]
pub struct SummaryData {
    pub exported_at: String,
    pub total: usize,
    pub approved: usize,
    /// (シート名, 件数)
    pub categories: Vec<(String, usize)>,
}

/// 件数の百分率（小数1桁）
pub fn percentage(count: usize, total: usize) -> String {
    if total == 0 {
        "0%".to_string()
    } else {
        format!("{:.1}%", count as f64 / total as f64 * 100.0)
    }
}

struct Formats {
    header: Format,
    data: Format,
    number: Option<Format>,
}

impl Formats {
    fn new(number_format: Option<&str>) -> Self {
        let header = Format::new()
            .set_bold()
            .set_font_size(11.0)
            .set_font_color(Color::White)
            .set_background_color(Color::RGB(0x366092))
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter)
            .set_text_wrap()
            .set_border(FormatBorder::Thin)
            .set_border_bottom(FormatBorder::Medium);

        let data = Format::new()
            .set_font_size(10.0)
            .set_align(FormatAlign::Left)
            .set_align(FormatAlign::VerticalCenter)
            .set_text_wrap()
            .set_border(FormatBorder::Thin);

        let number = number_format.map(|f| data.clone().set_num_format(f));

        Self { header, data, number }
    }
}

fn col_num(index: usize) -> Result<ColNum> {
    ColNum::try_from(index).map_err(|_| Error::Workbook(format!("列数が上限を超えています: {}", index)))
}

fn row_num(index: usize) -> Result<RowNum> {
    RowNum::try_from(index).map_err(|_| Error::Workbook(format!("行数が上限を超えています: {}", index)))
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: RowNum,
    col: ColNum,
    value: &CellValue,
    format: &Format,
) -> Result<()> {
    match value {
        CellValue::Empty => {
            worksheet.write_blank(row, col, format)?;
        }
        CellValue::Text(s) => {
            worksheet.write_string_with_format(row, col, s, format)?;
        }
        CellValue::Number(n) => {
            worksheet.write_number_with_format(row, col, *n, format)?;
        }
        CellValue::Bool(b) => {
            worksheet.write_boolean_with_format(row, col, *b, format)?;
        }
    }
    Ok(())
}

fn write_summary_sheet(workbook: &mut Workbook, summary: &SummaryData, formats: &Formats) -> Result<()> {
    let title_format = Format::new()
        .set_bold()
        .set_font_size(16.0)
        .set_font_color(Color::RGB(0x366092))
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter);
    let section_format = Format::new().set_bold().set_font_size(12.0);

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SUMMARY_SHEET_NAME)?;

    worksheet.merge_range(0, 0, 0, 5, "物料申請匯出摘要", &title_format)?;

    worksheet.write_string(2, 0, "匯出日期：")?;
    worksheet.write_string(2, 1, &summary.exported_at)?;
    worksheet.write_string(3, 0, "總申請數：")?;
    worksheet.write_number(3, 1, summary.total as f64)?;
    worksheet.write_string(4, 0, "已核准數：")?;
    worksheet.write_number(4, 1, summary.approved as f64)?;

    worksheet.write_string_with_format(6, 0, "類別統計", &section_format)?;
    for (col, label) in ["類別", "數量", "百分比"].iter().enumerate() {
        worksheet.write_string_with_format(7, col_num(col)?, *label, &formats.header)?;
    }

    let mut row: RowNum = 8;
    for (name, count) in &summary.categories {
        worksheet.write_string(row, 0, name)?;
        worksheet.write_number(row, 1, *count as f64)?;
        worksheet.write_string(row, 2, percentage(*count, summary.approved))?;
        row += 1;
    }

    for col in 0..3 {
        worksheet.set_column_width(col, SUMMARY_COL_WIDTH)?;
    }

    Ok(())
}

fn write_data_sheet(
    workbook: &mut Workbook,
    sheet: &SheetData,
    options: &SheetOptions,
    formats: &Formats,
) -> Result<()> {
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(&sheet.name)?;

    for (col, header) in sheet.headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col_num(col)?, header, &formats.header)?;
    }

    // 欄位ごとの書式（数値欄位のみ数値書式）
    let column_formats: Vec<&Format> = sheet
        .headers
        .iter()
        .map(|h| match &formats.number {
            Some(number) if is_numeric_column(h) => number,
            _ => &formats.data,
        })
        .collect();

    for (row_idx, row) in sheet.rows.iter().enumerate() {
        let excel_row = row_num(row_idx + 1)?;
        for (col, value) in row.iter().enumerate() {
            let format = column_formats.get(col).copied().unwrap_or(&formats.data);
            write_cell(worksheet, excel_row, col_num(col)?, value, format)?;
        }
    }

    let last_row = row_num(sheet.rows.len())?;

    if options.auto_filter && !sheet.headers.is_empty() {
        let last_col = col_num(sheet.headers.len() - 1)?;
        worksheet.autofilter(0, 0, last_row, last_col)?;
    }

    if let Some((row, col)) = options.freeze_panes {
        worksheet.set_freeze_panes(row, col)?;
    }

    if options.keyword_widths {
        for (col, header) in sheet.headers.iter().enumerate() {
            worksheet.set_column_width(col_num(col)?, column_width(header))?;
        }
    }

    if options.unit_validation && last_row > 0 {
        if let Some(unit_col) = sheet.headers.iter().position(|h| h == UNIT_COLUMN) {
            let validation = DataValidation::new().allow_list_strings(UNIT_OPTIONS)?;
            let col = col_num(unit_col)?;
            worksheet.add_data_validation(1, col, last_row, col, &validation)?;
        }
    }

    Ok(())
}

/// ワークブックをバッファに生成
///
/// # Arguments
/// * `summary` - 摘要シート（先頭に配置、None なら作成しない）
/// * `sheets` - データシート（順序通りに追加）
/// * `options` - データシートの書式
///
/// 摘要シートもデータシートもない場合はエラー（空のワークブックは保存しない）。
pub fn generate_workbook_buffer(
    summary: Option<&SummaryData>,
    sheets: &[SheetData],
    options: &SheetOptions,
) -> Result<Vec<u8>> {
    if summary.is_none() && sheets.is_empty() {
        return Err(Error::Workbook("出力するシートがありません".into()));
    }

    let formats = Formats::new(options.number_format.as_deref());
    let mut workbook = Workbook::new();

    if let Some(summary) = summary {
        write_summary_sheet(&mut workbook, summary, &formats)?;
    }

    for sheet in sheets {
        write_data_sheet(&mut workbook, sheet, options, &formats)?;
    }

    Ok(workbook.save_to_buffer()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(name: &str, rows: usize) -> SheetData {
        SheetData {
            name: name.to_string(),
            headers: vec!["料號".into(), "料件外型長".into(), "單位".into()],
            rows: (0..rows)
                .map(|i| {
                    vec![
                        CellValue::Text(format!("H01.C.{:05}", i)),
                        CellValue::Number(160.0),
                        CellValue::Text("PCS".into()),
                    ]
                })
                .collect(),
        }
    }

    fn full_options() -> SheetOptions {
        SheetOptions {
            number_format: Some("#,##0.00".into()),
            auto_filter: true,
            freeze_panes: Some((1, 1)),
            unit_validation: true,
            keyword_widths: true,
        }
    }

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(1, 3), "33.3%");
        assert_eq!(percentage(2, 2), "100.0%");
        assert_eq!(percentage(0, 0), "0%");
    }

    #[test]
    fn test_generate_buffer_with_summary() {
        let summary = SummaryData {
            exported_at: "2024-11-21 10:00:00".into(),
            total: 3,
            approved: 2,
            categories: vec![("Handle".into(), 2)],
        };
        let buffer = generate_workbook_buffer(Some(&summary), &[sheet("Handle", 2)], &full_options())
            .unwrap();
        // xlsx は zip 形式
        assert!(buffer.starts_with(b"PK"));
    }

    #[test]
    fn test_generate_buffer_plain_empty_sheet() {
        let buffer = generate_workbook_buffer(None, &[sheet("Slide", 0)], &SheetOptions::plain());
        assert!(buffer.is_ok());
    }

    #[test]
    fn test_no_sheets_is_error() {
        let result = generate_workbook_buffer(None, &[], &full_options());
        assert!(matches!(result, Err(Error::Workbook(_))));
    }

    #[test]
    fn test_too_many_columns_is_error() {
        let wide = SheetData {
            name: "Others".into(),
            headers: (0..=16_384).map(|i| format!("欄{}", i)).collect(),
            rows: vec![],
        };
        let result = generate_workbook_buffer(None, &[wide], &SheetOptions::plain());
        assert!(matches!(result, Err(Error::Workbook(_))));
    }

    #[test]
    fn test_index_limits() {
        assert!(col_num(u16::MAX as usize + 1).is_err());
        assert_eq!(col_num(3).unwrap(), 3);
        assert!(row_num(3).is_ok());
    }

    #[test]
    fn test_duplicate_sheet_name_is_error() {
        let result = generate_workbook_buffer(
            None,
            &[sheet("Handle", 1), sheet("Handle", 1)],
            &full_options(),
        );
        assert!(matches!(result, Err(Error::Workbook(_))));
    }
}
