pub mod catalog;
pub mod compliance;
pub mod config;
pub mod dataset;
pub mod error;
pub mod format;
pub mod model;
pub mod narrative;
pub mod parsing;
pub mod reference;
pub mod regulation;
pub mod workbook;

use catalog::schema::StandardCatalog;
use config::ReportConfig;
use dataset::MergedDataset;
use error::CalidadError;
use model::{Module, RawMeasurement};
use regulation::RegulationTable;

/// Normalize raw measurements and join them with their thresholds.
pub fn prepare_dataset(raw: &[RawMeasurement], regulation: &RegulationTable) -> MergedDataset {
    let normalized = parsing::normalize_measurements(raw);
    let mut dataset = regulation::join::merge(&normalized.measurements, regulation);
    dataset.dropped = normalized.dropped;
    dataset
}

/// Main API entry point: load an xlsx workbook into a merged dataset.
pub fn load_workbook_dataset(bytes: &[u8]) -> Result<MergedDataset, CalidadError> {
    let loaded = workbook::load_workbook(bytes)?;
    Ok(prepare_dataset(&loaded.measurements, &loaded.regulation))
}

/// Generate the narrative paragraph for one parameter.
///
/// `selection` lists the active threshold columns (see
/// [`Module::default_selection`]). Fails when the parameter has no records
/// left after normalization.
pub fn generate_narrative(
    dataset: &MergedDataset,
    parameter: &str,
    module: Module,
    selection: &[String],
    catalog: &StandardCatalog,
    config: &ReportConfig,
) -> Result<String, CalidadError> {
    let view = dataset
        .parameter(parameter)
        .ok_or_else(|| CalidadError::UnknownParameter(parameter.to_string()))?;
    Ok(narrative::render(module, &view, selection, catalog, config))
}
