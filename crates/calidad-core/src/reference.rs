//! Statistical reference values for groundwater, where no regulatory
//! standard exists: mean ± 2 sample standard deviations.

use std::collections::HashMap;

use crate::dataset::MergedDataset;
use crate::regulation::key::ThresholdKey;

/// Column holding the high reference value in an annotated dataset.
pub const REFERENCE_COLUMN: &str = "lim_referencia_gw";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceValues {
    pub mean: f64,
    /// Sample standard deviation (n - 1); zero for a single value.
    pub std_dev: f64,
    pub high: f64,
    pub low: f64,
}

/// Reference values of a non-empty value set. `None` for an empty set.
pub fn reference_values(values: &[f64]) -> Option<ReferenceValues> {
    if values.is_empty() {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let std_dev = if values.len() > 1 {
        let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
        (ss / (n - 1.0)).sqrt()
    } else {
        0.0
    };

    Some(ReferenceValues {
        mean,
        std_dev,
        high: mean + 2.0 * std_dev,
        low: mean - 2.0 * std_dev,
    })
}

/// Append `lim_referencia_gw` (mean + 2·s per parameter) to every record so
/// chart consumers can draw it like any other threshold.
pub fn annotate_groundwater_reference(dataset: &mut MergedDataset) {
    let mut by_parameter: HashMap<String, f64> = HashMap::new();
    for parameter in dataset.parameters() {
        if let Some(view) = dataset.parameter(parameter) {
            if let Some(reference) = reference_values(&view.values()) {
                by_parameter.insert(parameter.to_string(), reference.high);
            }
        }
    }

    let Some(key) = ThresholdKey::parse(REFERENCE_COLUMN) else {
        return;
    };
    dataset.set_column(key, |record| {
        by_parameter.get(&record.measurement.parameter).copied()
    });
    tracing::debug!(parameters = by_parameter.len(), "annotated groundwater reference values");
}
