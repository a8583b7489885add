//! 物料編碼申請 Excel 処理
//!
//! - convert: 申請JSON → 大類別シートのExcel
//! - validate: 既存Excelの欄位検証
//! - merge: 複数Excelの同名シート統合

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod logging;
pub mod merger;
pub mod validator;
pub mod workbook;
