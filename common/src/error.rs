//! エラー型定義

use thiserror::Error;

/// 共通エラー型（ワークブック生成の失敗）
#[derive(Error, Debug)]
pub enum Error {
    #[error("Workbook error: {0}")]
    Workbook(String),
}

#[cfg(feature = "excel")]
impl From<rust_xlsxwriter::XlsxError> for Error {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        Error::Workbook(e.to_string())
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
