use crate::error::{MaterialExcelError, Result};
use material_excel_common::export::excel_core::SheetOptions;
use material_excel_common::layout::{number_format, parse_cell_ref};
use material_excel_common::ProjectionOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 変換設定（JSON、全キー省略可）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 入力JSONのエンコーディング（utf-8-sig は BOM を除去）
    pub encoding: String,
    pub date_format: String,
    pub decimal_places: u8,
    pub max_rows_per_sheet: usize,
    pub include_summary: bool,
    pub include_validation: bool,
    pub auto_filter: bool,
    /// 凍結位置（"B2" 形式、null で無効）
    pub freeze_panes: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            encoding: "utf-8-sig".into(),
            date_format: "%Y-%m-%d".into(),
            decimal_places: 2,
            max_rows_per_sheet: 65000,
            include_summary: true,
            include_validation: true,
            auto_filter: true,
            freeze_panes: Some("B2".into()),
        }
    }
}

impl Config {
    /// 設定を読み込む
    ///
    /// 指定パス → ~/.config/material-excel/config.json → 既定値 の順。
    /// 読み込みに失敗した場合は警告を出して既定値を使う。
    pub fn load(path: Option<&Path>) -> Self {
        let candidate = match path {
            Some(p) if p.exists() => Some(p.to_path_buf()),
            Some(p) => {
                tracing::warn!("設定ファイルが見つかりません、既定値を使用: {}", p.display());
                None
            }
            None => Self::config_path().ok().filter(|p| p.exists()),
        };

        match candidate {
            Some(p) => Self::load_from(&p).unwrap_or_else(|e| {
                tracing::warn!("設定の読み込みに失敗、既定値を使用: {}", e);
                Self::default()
            }),
            None => Self::default(),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(strip_bom(&content))?;
        tracing::debug!("設定を読み込みました: {}", path.display());
        Ok(config)
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| MaterialExcelError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("material-excel").join("config.json"))
    }

    pub fn strips_bom(&self) -> bool {
        self.encoding.eq_ignore_ascii_case("utf-8-sig")
    }

    /// 凍結位置（不正な参照は無効扱い）
    pub fn freeze_cell(&self) -> Option<(u32, u16)> {
        let cell = self.freeze_panes.as_deref()?;
        if cell.trim().is_empty() {
            return None;
        }
        let parsed = parse_cell_ref(cell);
        if parsed.is_none() {
            tracing::warn!("凍結位置が不正です、無視します: {}", cell);
        }
        parsed
    }

    pub fn projection_options(&self) -> ProjectionOptions {
        ProjectionOptions {
            date_format: self.date_format.clone(),
        }
    }

    pub fn sheet_options(&self) -> SheetOptions {
        SheetOptions {
            number_format: Some(number_format(self.decimal_places)),
            auto_filter: self.auto_filter,
            freeze_panes: self.freeze_cell(),
            unit_validation: self.include_validation,
            keyword_widths: true,
        }
    }
}

pub(crate) fn strip_bom(content: &str) -> &str {
    content.strip_prefix('\u{feff}').unwrap_or(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.date_format, "%Y-%m-%d");
        assert_eq!(config.decimal_places, 2);
        assert_eq!(config.max_rows_per_sheet, 65000);
        assert!(config.include_summary);
        assert_eq!(config.freeze_cell(), Some((1, 1)));
    }

    #[test]
    fn test_partial_config_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"date_format": "%Y/%m/%d", "include_summary": false}"#).unwrap();

        let config = Config::load(Some(&path));
        assert_eq!(config.date_format, "%Y/%m/%d");
        assert!(!config.include_summary);
        assert_eq!(config.decimal_places, 2);
    }

    #[test]
    fn test_broken_config_falls_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert_eq!(Config::load(Some(&path)), Config::default());
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_missing_config_falls_back() {
        let config = Config::load(Some(Path::new("/nonexistent/material-excel.json")));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_freeze_panes_disabled() {
        let config = Config {
            freeze_panes: None,
            ..Config::default()
        };
        assert_eq!(config.freeze_cell(), None);

        let config = Config {
            freeze_panes: Some("??".into()),
            ..Config::default()
        };
        assert_eq!(config.freeze_cell(), None);
    }

    #[test]
    fn test_sheet_options() {
        let config = Config {
            decimal_places: 1,
            include_validation: false,
            ..Config::default()
        };
        let options = config.sheet_options();
        assert_eq!(options.number_format.as_deref(), Some("#,##0.0"));
        assert!(!options.unit_validation);
        assert!(options.auto_filter);
    }

    #[test]
    fn test_strip_bom() {
        assert_eq!(strip_bom("\u{feff}[]"), "[]");
        assert_eq!(strip_bom("[]"), "[]");
    }
}
