pub mod groups;
pub mod join;
pub mod key;

use crate::model::RawCell;
use crate::parsing::values::parse_number;
use key::ThresholdKey;
use serde::{Deserialize, Serialize};

/// One row of the regulation sheet as loaded: key columns plus the raw
/// cells of every other column, aligned with the sheet headers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRegulationRow {
    pub parameter: String,
    pub unit: String,
    pub cells: Vec<RawCell>,
}

/// Threshold values for one (parameter, unit) pair, aligned with
/// `RegulationTable::columns`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegulationRow {
    pub parameter: String,
    pub unit: String,
    pub values: Vec<Option<f64>>,
}

/// Regulation thresholds keyed by (parameter, unit).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegulationTable {
    columns: Vec<ThresholdKey>,
    rows: Vec<RegulationRow>,
}

impl RegulationTable {
    /// Build a table from already-typed columns and rows.
    ///
    /// Each row must carry exactly one value per column; shorter rows are
    /// padded with nulls and longer rows truncated.
    pub fn new(columns: Vec<ThresholdKey>, rows: Vec<RegulationRow>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.values.resize(width, None);
                row
            })
            .collect();
        RegulationTable { columns, rows }
    }

    /// Build a table from sheet headers and raw rows.
    ///
    /// `headers[i]` names `row.cells[i]`. Headers that are not threshold
    /// columns are ignored. Threshold cells that are not numbers become null.
    pub fn from_raw(headers: &[String], rows: &[RawRegulationRow]) -> Self {
        let mut columns = Vec::new();
        let mut positions = Vec::new();
        for (i, header) in headers.iter().enumerate() {
            match ThresholdKey::parse(header) {
                Some(key) => {
                    columns.push(key);
                    positions.push(i);
                }
                None => tracing::debug!(column = %header, "ignoring non-threshold regulation column"),
            }
        }

        let rows = rows
            .iter()
            .map(|raw| RegulationRow {
                parameter: raw.parameter.clone(),
                unit: raw.unit.clone(),
                values: positions
                    .iter()
                    .map(|&i| raw.cells.get(i).and_then(threshold_value))
                    .collect(),
            })
            .collect();

        RegulationTable { columns, rows }
    }

    pub fn columns(&self) -> &[ThresholdKey] {
        &self.columns
    }

    pub fn rows(&self) -> &[RegulationRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Coerce a threshold cell to a number; anything non-numeric is "no limit".
fn threshold_value(cell: &RawCell) -> Option<f64> {
    match cell {
        RawCell::Number(n) if n.is_finite() => Some(*n),
        RawCell::Number(_) | RawCell::Empty => None,
        RawCell::Text(s) => parse_number(s),
    }
}
