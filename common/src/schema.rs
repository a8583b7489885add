//! 大類ごとの欄位定義
//!
//! 各シートの欄位 = 基本欄位 + 大類固有欄位 + 共通欄位 + 包裝欄位

use crate::category::Category;
use regex::Regex;

pub const BASE_COLUMNS: &[&str] = &[
    "料號",
    "料件說明",
    "客戶說明",
    "產品大類",
    "產品中類",
    "產品小類",
    "料件基本材質",
    "料件外型長",
    "料件外型寬",
    "料件外型高",
    "料件外型重量",
];

pub const COMMON_COLUMNS: &[&str] = &[
    "料件表面處理",
    "料件顏色",
    "測試要求",
    "認證要求",
    "品質標準",
    "MOQ",
    "單位",
    "客戶參考號",
    "供應商編號",
    "建立日期",
    "狀態",
];

pub const PACKAGING_COLUMNS: &[&str] = &[
    "個別產品包裝",
    "配件內容",
    "配件",
    "內盒",
    "外箱",
    "運輸與托盤要求",
    "裝櫃要求",
    "Other",
];

/// 検証時に欠落するとエラーになる欄位
pub const REQUIRED_COLUMNS: &[&str] = &["料號", "料件說明", "料件基本材質"];

/// 單位欄位のドロップダウン候補
pub const UNIT_COLUMN: &str = "單位";
pub const UNIT_OPTIONS: &[&str] = &["PCS", "SET", "PAIR", "KG", "M", "BOX"];
pub const DEFAULT_UNIT: &str = "PCS";

/// 大類固有欄位
pub fn category_columns(category: Category) -> &'static [&'static str] {
    match category {
        Category::Handle => &["把手長度", "孔距"],
        Category::Slide => &["滑軌長度", "滑軌載重", "滑軌類型", "鋼珠大小"],
        Category::ModuleAssy => &["模組類型", "適用櫃體寬度"],
        Category::DecorativeHardware => &["裝飾風格"],
        Category::FunctionalHardware => &["功能類型", "承載能力"],
        Category::BuildersHardware => &["建築應用", "安全等級"],
        Category::IndustrialPartsSolution => &["工業應用", "承載等級"],
        Category::Others => &[],
    }
}

/// 大類のシート欄位（順序付き）
pub fn columns_for(category: Category) -> Vec<&'static str> {
    let extra = category_columns(category);
    let mut columns = Vec::with_capacity(
        BASE_COLUMNS.len() + extra.len() + COMMON_COLUMNS.len() + PACKAGING_COLUMNS.len(),
    );
    columns.extend_from_slice(BASE_COLUMNS);
    columns.extend_from_slice(extra);
    columns.extend_from_slice(COMMON_COLUMNS);
    columns.extend_from_slice(PACKAGING_COLUMNS);
    columns
}

/// 一文字コードから欄位を取得（未知のコードは Others）
pub fn columns_for_code(code: &str) -> Vec<&'static str> {
    columns_for(Category::from_code(code))
}

/// 数値に変換する欄位か
pub fn is_numeric_column(name: &str) -> bool {
    lazy_static::lazy_static! {
        static ref NUMERIC_RE: Regex =
            Regex::new(r"^料件外型(長|寬|高|重量)$|長度|寬度|高度|重量").unwrap();
    }
    NUMERIC_RE.is_match(name)
}

/// 日付として整形する欄位か
pub fn is_date_column(name: &str) -> bool {
    name.contains("日期")
}
