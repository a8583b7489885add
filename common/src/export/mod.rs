//! Export core modules shared by the converter and merger.

#[cfg(feature = "excel")]
pub mod excel_core;
