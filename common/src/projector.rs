//! 申請データ → シート行の射影
//!
//! 欄位名ごとに値を取り出し、寸法欄位は数値へ、日期欄位は設定の書式へ変換する。
//! 変換に失敗した値は元のまま残す。

use crate::category::Category;
use crate::packaging::{format_packaging, PackagingField};
use crate::schema::{self, DEFAULT_UNIT};
use crate::types::{CellValue, MaterialApplication};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::fmt::Write;

/// 射影時のオプション
#[derive(Debug, Clone)]
pub struct ProjectionOptions {
    /// strftime 形式
    pub date_format: String,
}

impl Default for ProjectionOptions {
    fn default() -> Self {
        Self {
            date_format: "%Y-%m-%d".to_string(),
        }
    }
}

/// 1件の申請を欄位順のセル値に変換
pub fn project_row(
    app: &MaterialApplication,
    columns: &[&str],
    options: &ProjectionOptions,
) -> Vec<CellValue> {
    let category = Category::try_from_code(app.category_code());

    columns
        .iter()
        .map(|column| {
            let value = field_value(app, column, category);
            if schema::is_numeric_column(column) {
                coerce_number(value)
            } else if schema::is_date_column(column) {
                coerce_date(value, &options.date_format)
            } else {
                value
            }
        })
        .collect()
}

fn field_value(app: &MaterialApplication, column: &str, category: Option<Category>) -> CellValue {
    if let Some(field) = PackagingField::from_column(column) {
        return packaging_value(app, field);
    }

    match column {
        "料號" => CellValue::text(app.item_code.as_deref()),
        "料件說明" => CellValue::text(app.item_name_cn.as_deref()),
        "客戶說明" => CellValue::text(app.item_name_en.as_deref()),
        "產品大類" => CellValue::text(category.map(|c| c.sheet_name())),
        "產品中類" => CellValue::text(app.sub_category.as_deref()),
        "產品小類" => CellValue::text(app.spec_category.as_deref()),
        "料件基本材質" => CellValue::text(app.material.as_deref()),
        "料件外型長" => CellValue::from_json(&app.dimension(|d| &d.length)),
        "料件外型寬" => CellValue::from_json(&app.dimension(|d| &d.width)),
        "料件外型高" => CellValue::from_json(&app.dimension(|d| &d.height)),
        "料件外型重量" => CellValue::from_json(&app.dimension(|d| &d.weight)),
        "料件表面處理" => CellValue::text(app.surface_finish.as_deref()),
        "MOQ" => CellValue::from_json(&app.moq),
        "單位" => CellValue::text(Some(app.unit.as_deref().unwrap_or(DEFAULT_UNIT))),
        "客戶參考號" => CellValue::text(app.customer_ref.as_deref()),
        "供應商編號" => CellValue::text(app.supplier.as_deref()),
        "建立日期" => CellValue::text(app.submit_date.as_deref()),
        "狀態" => CellValue::text(app.status.as_deref()),
        _ => category_specific_value(app, column, category),
    }
}

/// 大類固有欄位（該当する大類の申請のみ値を持つ）
fn category_specific_value(
    app: &MaterialApplication,
    column: &str,
    category: Option<Category>,
) -> CellValue {
    match (category, column) {
        (Some(Category::Handle), "把手長度") => CellValue::from_json(&app.dimension(|d| &d.length)),
        (Some(Category::Handle), "孔距") => CellValue::from_json(&app.handle_hole_distance),
        (Some(Category::Slide), "滑軌長度") => CellValue::from_json(&app.dimension(|d| &d.length)),
        (Some(Category::Slide), "滑軌載重") => CellValue::from_json(&app.slide_load),
        (Some(Category::Slide), "滑軌類型") => CellValue::from_json(&app.slide_type),
        (Some(Category::Slide), "鋼珠大小") => CellValue::from_json(&app.ball_size),
        _ => CellValue::Empty,
    }
}

fn packaging_value(app: &MaterialApplication, field: PackagingField) -> CellValue {
    let formatted = app
        .packaging
        .as_ref()
        .and_then(|packaging| field.lookup(packaging))
        .map(format_packaging)
        .unwrap_or_default();

    if formatted.is_empty() {
        CellValue::Empty
    } else {
        CellValue::Text(formatted)
    }
}

/// 文字列の数値を f64 に変換
pub fn coerce_number(value: CellValue) -> CellValue {
    match &value {
        CellValue::Text(s) => match s.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => CellValue::Number(n),
            _ => value,
        },
        _ => value,
    }
}

/// ISO-8601 のタイムスタンプを指定書式の日付文字列に変換
pub fn coerce_date(value: CellValue, date_format: &str) -> CellValue {
    let formatted = value
        .as_text()
        .filter(|s| !s.is_empty())
        .and_then(parse_iso_timestamp)
        .and_then(|dt| format_datetime(&dt, date_format));

    match formatted {
        Some(s) => CellValue::Text(s),
        None => value,
    }
}

/// タイムゾーン付きはその地域時刻として扱う
pub fn parse_iso_timestamp(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_local());
    }

    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, pattern) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

// 不正な書式指定は fmt::Error になる（to_string は panic する）
fn format_datetime(dt: &NaiveDateTime, date_format: &str) -> Option<String> {
    let mut out = String::new();
    write!(out, "{}", dt.format(date_format)).ok()?;
    Some(out)
}
