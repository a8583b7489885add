//! 包裝說明欄位の解決と整形

use crate::types::{PackagingValue, StructuredPackaging};
use serde_json::Value;
use std::collections::BTreeMap;

/// 包裝欄位（シート上の列）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackagingField {
    ProductPackaging,
    AccessoriesContent,
    Accessories,
    InnerBox,
    OuterBox,
    Transport,
    Container,
    Other,
}

impl PackagingField {
    pub const ALL: [PackagingField; 8] = [
        PackagingField::ProductPackaging,
        PackagingField::AccessoriesContent,
        PackagingField::Accessories,
        PackagingField::InnerBox,
        PackagingField::OuterBox,
        PackagingField::Transport,
        PackagingField::Container,
        PackagingField::Other,
    ];

    pub fn column(&self) -> &'static str {
        match self {
            PackagingField::ProductPackaging => "個別產品包裝",
            PackagingField::AccessoriesContent => "配件內容",
            PackagingField::Accessories => "配件",
            PackagingField::InnerBox => "內盒",
            PackagingField::OuterBox => "外箱",
            PackagingField::Transport => "運輸與托盤要求",
            PackagingField::Container => "裝櫃要求",
            PackagingField::Other => "Other",
        }
    }

    /// 申請データ側のキー（優先順）
    pub fn source_keys(&self) -> &'static [&'static str] {
        match self {
            PackagingField::ProductPackaging => &["個別產品包裝", "產品包裝", "productPackaging"],
            PackagingField::AccessoriesContent => &["配件內容", "accessoriesContent"],
            PackagingField::Accessories => &["配件", "accessories"],
            PackagingField::InnerBox => &["內盒", "innerBox"],
            PackagingField::OuterBox => &["外箱", "outerBox"],
            PackagingField::Transport => &["運輸與托盤要求", "transport"],
            PackagingField::Container => &["裝櫃要求", "container"],
            PackagingField::Other => &["其他說明", "Other", "other"],
        }
    }

    pub fn from_column(column: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.column() == column)
    }

    pub fn lookup<'a>(
        &self,
        packaging: &'a BTreeMap<String, PackagingValue>,
    ) -> Option<&'a PackagingValue> {
        self.source_keys().iter().find_map(|key| packaging.get(*key))
    }
}

/// 包裝欄位を表示用文字列に整形
///
/// - 空 → ""
/// - 文字列 → そのまま
/// - 配列 → ", " 区切り
/// - {options, description} → "[A, B] | 説明"（欠けた部分は省略）
pub fn format_packaging(value: &PackagingValue) -> String {
    match value {
        PackagingValue::Text(s) => s.clone(),
        PackagingValue::List(items) => items
            .iter()
            .map(display_scalar)
            .collect::<Vec<_>>()
            .join(", "),
        PackagingValue::Structured(structured) => format_structured(structured),
        PackagingValue::Other(other) => {
            if is_falsy(other) {
                String::new()
            } else {
                display_scalar(other)
            }
        }
    }
}

fn format_structured(structured: &StructuredPackaging) -> String {
    let mut parts = Vec::new();

    if !structured.options.is_empty() {
        let options: Vec<String> = structured.options.iter().map(display_scalar).collect();
        parts.push(format!("[{}]", options.join(", ")));
    }

    if let Some(description) = structured.description.as_deref() {
        if !description.is_empty() {
            parts.push(description.to_string());
        }
    }

    parts.join(" | ")
}

fn display_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}
