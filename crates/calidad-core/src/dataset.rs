use crate::model::Measurement;
use crate::regulation::groups::{group_columns, StandardGroup};
use crate::regulation::key::{Bound, ThresholdKey};
use serde::{Deserialize, Serialize};

/// A measurement with every threshold applicable to its (parameter, unit).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedRecord {
    pub measurement: Measurement,
    /// Aligned with `MergedDataset::columns`; null where no limit applies.
    pub thresholds: Vec<Option<f64>>,
}

/// The cleaned, merged record set handed to charts, tables and narratives.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MergedDataset {
    pub columns: Vec<ThresholdKey>,
    pub records: Vec<MergedRecord>,
    /// Measurement rows dropped during normalization.
    #[serde(default)]
    pub dropped: usize,
}

impl MergedDataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|k| k.column() == column)
    }

    /// Threshold value of `column` for one record; null when the column is
    /// unknown or empty.
    pub fn threshold(&self, record: &MergedRecord, column: &str) -> Option<f64> {
        self.column_index(column)
            .and_then(|i| record.thresholds.get(i).copied().flatten())
    }

    /// Distinct parameters in first-seen order.
    pub fn parameters(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for record in &self.records {
            let p = record.measurement.parameter.as_str();
            if !seen.contains(&p) {
                seen.push(p);
            }
        }
        seen
    }

    /// All records of one parameter. `None` when the parameter has no
    /// records, so a view is never empty.
    pub fn parameter(&self, name: &str) -> Option<ParameterView<'_>> {
        let records: Vec<&MergedRecord> = self
            .records
            .iter()
            .filter(|r| r.measurement.parameter == name)
            .collect();
        if records.is_empty() {
            return None;
        }
        Some(ParameterView {
            dataset: self,
            records,
        })
    }

    /// Threshold columns grouped by standard/category, first-seen order.
    pub fn groups(&self) -> Vec<StandardGroup> {
        group_columns(&self.columns)
    }

    /// Add (or replace) a threshold column, computing one value per record.
    pub fn set_column<F>(&mut self, key: ThresholdKey, mut value_for: F)
    where
        F: FnMut(&MergedRecord) -> Option<f64>,
    {
        let index = match self.column_index(key.column()) {
            Some(i) => i,
            None => {
                self.columns.push(key);
                self.columns.len() - 1
            }
        };
        let width = self.columns.len();
        for record in &mut self.records {
            let value = value_for(record);
            record.thresholds.resize(width, None);
            record.thresholds[index] = value;
        }
    }
}

/// Non-empty set of records for one parameter.
#[derive(Debug, Clone)]
pub struct ParameterView<'a> {
    dataset: &'a MergedDataset,
    records: Vec<&'a MergedRecord>,
}

impl<'a> ParameterView<'a> {
    fn first(&self) -> &'a MergedRecord {
        self.records[0]
    }

    pub fn parameter(&self) -> &'a str {
        &self.first().measurement.parameter
    }

    /// Unit of the first record; narratives are written in this unit.
    pub fn unit(&self) -> &'a str {
        &self.first().measurement.unit
    }

    pub fn records(&self) -> &[&'a MergedRecord] {
        &self.records
    }

    pub fn values(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.measurement.value).collect()
    }

    /// Threshold of `column`, read from the first record.
    pub fn threshold(&self, column: &str) -> Option<f64> {
        self.dataset.threshold(self.first(), column)
    }

    /// Threshold of a standard id on one side (`eca_2017_3d1`, Lower).
    pub fn bound(&self, standard_id: &str, bound: Bound) -> Option<f64> {
        let column = match bound {
            Bound::Lower => format!("lim_inf_{standard_id}"),
            Bound::Upper => format!("lim_sup_{standard_id}"),
            Bound::Single => format!("lim_{standard_id}"),
        };
        self.threshold(&column)
    }

    /// (lower, upper) pair of a standard id. A single-value `lim_<id>`
    /// column stands in for the upper limit when there is no `lim_sup_<id>`.
    pub fn limits(&self, standard_id: &str) -> (Option<f64>, Option<f64>) {
        let upper = self
            .bound(standard_id, Bound::Upper)
            .or_else(|| self.bound(standard_id, Bound::Single));
        (self.bound(standard_id, Bound::Lower), upper)
    }
}
