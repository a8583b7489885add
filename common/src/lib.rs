//! Material Excel Common Library
//!
//! 申請データの型・大類別の欄位定義・行射影・ワークブック生成

pub mod category;
pub mod error;
pub mod export;
pub mod layout;
pub mod packaging;
pub mod projector;
pub mod schema;
pub mod types;

pub use category::Category;
pub use error::{Error, Result};
pub use packaging::{format_packaging, PackagingField};
pub use projector::{project_row, ProjectionOptions};
pub use schema::{columns_for, columns_for_code};
pub use types::{CellValue, MaterialApplication, PackagingValue};
