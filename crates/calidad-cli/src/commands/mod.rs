pub mod catalog;
pub mod parse;
pub mod report;
pub mod standards;

use calidad_core::dataset::MergedDataset;
use calidad_core::error::CalidadError;
use std::path::Path;

/// Load a workbook, or a dataset previously saved with `parse -O`.
pub fn load_dataset(path: &Path) -> Result<MergedDataset, CalidadError> {
    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let bytes = std::fs::read(path)?;
    if is_json {
        Ok(serde_json::from_slice(&bytes)?)
    } else {
        calidad_core::load_workbook_dataset(&bytes)
    }
}
