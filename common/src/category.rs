//! 物料大類（八大類）
//!
//! 申請データの `mainCategory` は一文字コードで、シート名は英語名を使う。

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Handle,
    Slide,
    ModuleAssy,
    DecorativeHardware,
    FunctionalHardware,
    BuildersHardware,
    IndustrialPartsSolution,
    Others,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Handle,
        Category::Slide,
        Category::ModuleAssy,
        Category::DecorativeHardware,
        Category::FunctionalHardware,
        Category::BuildersHardware,
        Category::IndustrialPartsSolution,
        Category::Others,
    ];

    /// 一文字コードから大類を取得（未知のコードは Others）
    pub fn from_code(code: &str) -> Self {
        Self::try_from_code(code).unwrap_or(Category::Others)
    }

    /// 既知のコードのみ受け付ける
    pub fn try_from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "H" => Some(Category::Handle),
            "S" => Some(Category::Slide),
            "M" => Some(Category::ModuleAssy),
            "D" => Some(Category::DecorativeHardware),
            "F" => Some(Category::FunctionalHardware),
            "B" => Some(Category::BuildersHardware),
            "I" => Some(Category::IndustrialPartsSolution),
            "O" => Some(Category::Others),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Category::Handle => "H",
            Category::Slide => "S",
            Category::ModuleAssy => "M",
            Category::DecorativeHardware => "D",
            Category::FunctionalHardware => "F",
            Category::BuildersHardware => "B",
            Category::IndustrialPartsSolution => "I",
            Category::Others => "O",
        }
    }

    pub fn sheet_name(&self) -> &'static str {
        match self {
            Category::Handle => "Handle",
            Category::Slide => "Slide",
            Category::ModuleAssy => "ModuleAssy",
            Category::DecorativeHardware => "DecorativeHardware",
            Category::FunctionalHardware => "FunctionalHardware",
            Category::BuildersHardware => "BuildersHardware",
            Category::IndustrialPartsSolution => "IndustrialPartsSolution",
            Category::Others => "Others",
        }
    }

    /// シート名から大類を逆引き
    ///
    /// 行数上限で分割されたシート（`Handle_2` など）も元の大類として扱う。
    pub fn from_sheet_name(name: &str) -> Option<Self> {
        let base = match name.rsplit_once('_') {
            Some((base, suffix))
                if !suffix.is_empty() && suffix.chars().all(|c| c.is_ascii_digit()) =>
            {
                base
            }
            _ => name,
        };

        Self::ALL.into_iter().find(|c| c.sheet_name() == base)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sheet_name())
    }
}
