//! 申請データの型定義
//!
//! - MaterialApplication: フロントエンドから出力された申請1件
//! - PackagingValue: 包裝欄位（文字列・配列・{options, description}）
//! - CellValue: Excelセルへ書き込む値

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// 核准済みステータス
pub const STATUS_APPROVED: &str = "APPROVED";

/// 物料編碼申請
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialApplication {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub item_code: Option<String>,          // 料號

    #[serde(default, rename = "itemNameCN", deserialize_with = "lenient_string")]
    pub item_name_cn: Option<String>,       // 料件說明

    #[serde(default, rename = "itemNameEN", deserialize_with = "lenient_string")]
    pub item_name_en: Option<String>,       // 客戶說明

    #[serde(default, deserialize_with = "lenient_string")]
    pub main_category: Option<String>,      // 大類コード

    #[serde(default, deserialize_with = "lenient_string")]
    pub sub_category: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub spec_category: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub material: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub surface_finish: Option<String>,

    #[serde(default)]
    pub dimensions: Option<Dimensions>,

    #[serde(default)]
    pub moq: Value,

    #[serde(default, deserialize_with = "lenient_string")]
    pub unit: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub customer_ref: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub supplier: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub submit_date: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub status: Option<String>,

    /// Handle: 孔距
    #[serde(default)]
    pub handle_hole_distance: Value,

    /// Slide: 滑軌載重
    #[serde(default)]
    pub slide_load: Value,

    /// Slide: 滑軌類型
    #[serde(default)]
    pub slide_type: Value,

    /// Slide: 鋼珠大小
    #[serde(default)]
    pub ball_size: Value,

    #[serde(default)]
    pub packaging: Option<BTreeMap<String, PackagingValue>>,

    /// 出力対象外のフィールド（applicant, notes など）
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl MaterialApplication {
    pub fn is_approved(&self) -> bool {
        self.status.as_deref() == Some(STATUS_APPROVED)
    }

    /// 大類コード（未設定は "O"）
    pub fn category_code(&self) -> &str {
        self.main_category.as_deref().unwrap_or("O")
    }

    pub fn dimension(&self, pick: fn(&Dimensions) -> &Value) -> Value {
        self.dimensions
            .as_ref()
            .map(|d| pick(d).clone())
            .unwrap_or(Value::Null)
    }
}

/// 外形寸法（数値または文字列）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Dimensions {
    pub length: Value,
    pub width: Value,
    pub height: Value,
    pub weight: Value,
}

/// 包裝欄位の値
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PackagingValue {
    Text(String),
    List(Vec<Value>),
    Structured(StructuredPackaging),
    Other(Value),
}

/// チェックボックス選択肢 + 補足説明
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructuredPackaging {
    pub options: Vec<Value>,
    pub description: Option<String>,
}

/// セル値
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl CellValue {
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => CellValue::Empty,
            Value::String(s) => CellValue::Text(s.clone()),
            Value::Number(n) => n.as_f64().map(CellValue::Number).unwrap_or_default(),
            Value::Bool(b) => CellValue::Bool(*b),
            other => CellValue::Text(other.to_string()),
        }
    }

    pub fn text(value: Option<&str>) -> Self {
        match value {
            Some(s) => CellValue::Text(s.to_string()),
            None => CellValue::Empty,
        }
    }

    /// 空欄（未設定または空文字列）か
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// 文字列以外のスカラーも文字列として受け付ける
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_full_application() {
        let app: MaterialApplication = serde_json::from_value(json!({
            "id": "1700000001",
            "itemCode": "H01.C.00001",
            "itemNameCN": "鍍鉻把手 160mm",
            "itemNameEN": "Chrome Handle 160mm",
            "mainCategory": "H",
            "status": "APPROVED",
            "dimensions": {"length": 160, "width": "25"},
            "moq": 500,
            "packaging": {
                "配件內容": {"options": ["螺絲"], "description": "附M4x25mm螺絲2顆"},
                "內盒": "印製ITEM NO.",
                "外箱": ["瓦楞紙箱", "側嘜"]
            },
            "applicant": "王小明"
        }))
        .unwrap();

        assert_eq!(app.item_code.as_deref(), Some("H01.C.00001"));
        assert_eq!(app.item_name_cn.as_deref(), Some("鍍鉻把手 160mm"));
        assert!(app.is_approved());
        assert_eq!(app.category_code(), "H");
        assert_eq!(app.dimension(|d| &d.length), json!(160));
        assert_eq!(app.dimension(|d| &d.width), json!("25"));
        assert_eq!(app.dimension(|d| &d.weight), Value::Null);
        assert_eq!(app.moq, json!(500));
        assert!(app.extra.contains_key("applicant"));

        let packaging = app.packaging.unwrap();
        assert!(matches!(packaging["配件內容"], PackagingValue::Structured(_)));
        assert!(matches!(packaging["內盒"], PackagingValue::Text(_)));
        assert!(matches!(packaging["外箱"], PackagingValue::List(_)));
    }

    #[test]
    fn test_lenient_string_fields() {
        let app: MaterialApplication = serde_json::from_value(json!({
            "id": 1700000001u64,
            "subCategory": null,
            "specCategory": 3
        }))
        .unwrap();
        assert_eq!(app.id.as_deref(), Some("1700000001"));
        assert_eq!(app.sub_category, None);
        assert_eq!(app.spec_category.as_deref(), Some("3"));
        assert_eq!(app.category_code(), "O");
        assert!(!app.is_approved());
    }

    #[test]
    fn test_null_packaging_entry() {
        let app: MaterialApplication = serde_json::from_value(json!({
            "packaging": {"配件": null, "內盒": 0}
        }))
        .unwrap();
        let packaging = app.packaging.unwrap();
        assert_eq!(packaging["配件"], PackagingValue::Other(Value::Null));
        assert_eq!(packaging["內盒"], PackagingValue::Other(json!(0)));
    }

    #[test]
    fn test_cell_value_from_json() {
        assert_eq!(CellValue::from_json(&Value::Null), CellValue::Empty);
        assert_eq!(CellValue::from_json(&json!("PCS")), CellValue::Text("PCS".into()));
        assert_eq!(CellValue::from_json(&json!(500)), CellValue::Number(500.0));
        assert_eq!(CellValue::from_json(&json!(true)), CellValue::Bool(true));
    }

    #[test]
    fn test_cell_value_is_blank() {
        assert!(CellValue::Empty.is_blank());
        assert!(CellValue::Text(String::new()).is_blank());
        assert!(!CellValue::Number(0.0).is_blank());
        assert!(!CellValue::Text("x".into()).is_blank());
    }
}
