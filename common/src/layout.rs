//! シートのレイアウト設定
//!
//! 欄幅は欄位名のキーワードで決める。

use regex::Regex;

pub const WIDE_COL_WIDTH: f64 = 30.0;
pub const CODE_COL_WIDTH: f64 = 15.0;
pub const MEASURE_COL_WIDTH: f64 = 10.0;
pub const DEFAULT_COL_WIDTH: f64 = 12.0;
pub const SUMMARY_COL_WIDTH: f64 = 20.0;

/// 欄位名から欄幅を決定
pub fn column_width(name: &str) -> f64 {
    if name.contains("說明") || name.contains("包裝") {
        WIDE_COL_WIDTH
    } else if name.contains("料號") || name.contains("編號") {
        CODE_COL_WIDTH
    } else if ["長", "寬", "高", "重量", "MOQ"].iter().any(|k| name.contains(k)) {
        MEASURE_COL_WIDTH
    } else {
        DEFAULT_COL_WIDTH
    }
}

/// 小数桁数から数値書式を生成（0 → "#,##0"）
pub fn number_format(decimal_places: u8) -> String {
    if decimal_places == 0 {
        "#,##0".to_string()
    } else {
        format!("#,##0.{}", "0".repeat(decimal_places as usize))
    }
}

/// "B2" 形式のセル参照を 0 始まりの (行, 列) に変換
pub fn parse_cell_ref(cell: &str) -> Option<(u32, u16)> {
    lazy_static::lazy_static! {
        static ref CELL_RE: Regex = Regex::new(r"^([A-Za-z]{1,3})([0-9]{1,7})$").unwrap();
    }

    let caps = CELL_RE.captures(cell.trim())?;

    let col = caps[1]
        .chars()
        .try_fold(0u32, |acc, c| {
            let digit = c.to_ascii_uppercase() as u32 - 'A' as u32 + 1;
            acc.checked_mul(26)?.checked_add(digit)
        })?;
    let row: u32 = caps[2].parse().ok()?;

    if col == 0 || row == 0 {
        return None;
    }

    Some((row - 1, u16::try_from(col - 1).ok()?))
}
