pub mod values;

use crate::model::{Measurement, RawMeasurement};
use serde::{Deserialize, Serialize};
use values::normalize_value;

/// Measurements that survived normalization, plus how many rows did not.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NormalizedSet {
    pub measurements: Vec<Measurement>,
    /// Rows dropped because their value could not be read as a number.
    pub dropped: usize,
}

/// Normalize raw measurement rows.
///
/// Rows whose value cannot be parsed are dropped silently; only the total is
/// reported through `NormalizedSet::dropped`. Input order is preserved.
pub fn normalize_measurements(rows: &[RawMeasurement]) -> NormalizedSet {
    let mut measurements = Vec::with_capacity(rows.len());
    let mut dropped = 0;

    for row in rows {
        let normalized = normalize_value(&row.value);
        let Some(value) = normalized.value else {
            dropped += 1;
            continue;
        };

        measurements.push(Measurement {
            parameter: row.parameter.clone(),
            unit: row.unit.clone(),
            station: row.station.clone(),
            date: row.date,
            raw_value: row.value.as_text(),
            value,
            is_detection_limit: normalized.is_detection_limit,
            label: format!("{} ({})", row.parameter, row.unit),
        });
    }

    if dropped > 0 {
        tracing::debug!(dropped, kept = measurements.len(), "dropped non-numeric measurement rows");
    }

    NormalizedSet {
        measurements,
        dropped,
    }
}
