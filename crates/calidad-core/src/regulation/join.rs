use std::collections::HashMap;

use super::RegulationTable;
use crate::dataset::{MergedDataset, MergedRecord};
use crate::model::Measurement;

/// Left-join measurements with regulation thresholds on (parameter, unit).
///
/// Every measurement appears once per matching regulation row, or once
/// with all thresholds null when nothing matches. The regulation table is
/// expected to hold at most one row per key; duplicates are not merged.
pub fn merge(measurements: &[Measurement], table: &RegulationTable) -> MergedDataset {
    let mut index: HashMap<(&str, &str), Vec<usize>> = HashMap::new();
    for (i, row) in table.rows().iter().enumerate() {
        index
            .entry((row.parameter.as_str(), row.unit.as_str()))
            .or_default()
            .push(i);
    }

    for ((parameter, unit), rows) in &index {
        if rows.len() > 1 {
            tracing::warn!(parameter, unit, rows = rows.len(), "duplicate regulation rows for key");
        }
    }

    let width = table.columns().len();
    let mut records = Vec::with_capacity(measurements.len());
    let mut unmatched = 0usize;

    for m in measurements {
        match index.get(&(m.parameter.as_str(), m.unit.as_str())) {
            Some(rows) => {
                for &i in rows {
                    records.push(MergedRecord {
                        measurement: m.clone(),
                        thresholds: table.rows()[i].values.clone(),
                    });
                }
            }
            None => {
                unmatched += 1;
                records.push(MergedRecord {
                    measurement: m.clone(),
                    thresholds: vec![None; width],
                });
            }
        }
    }

    if unmatched > 0 {
        tracing::debug!(unmatched, "measurements without regulation row");
    }

    MergedDataset {
        columns: table.columns().to_vec(),
        records,
        dropped: 0,
    }
}
