use thiserror::Error;

#[derive(Error, Debug)]
pub enum MaterialExcelError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("引数が不足しています: {0}")]
    MissingArgument(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("Excel読み込みエラー: {0}")]
    WorkbookRead(String),

    #[error(transparent)]
    Common(#[from] material_excel_common::Error),
}

impl From<calamine::Error> for MaterialExcelError {
    fn from(e: calamine::Error) -> Self {
        MaterialExcelError::WorkbookRead(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MaterialExcelError>;
