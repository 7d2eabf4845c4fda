use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CalidadError;
use crate::regulation::groups::{selected_columns, StandardGroup};

/// A spreadsheet cell as handed over by the loader, before any coercion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawCell {
    Number(f64),
    Text(String),
    Empty,
}

impl RawCell {
    /// String form used for "<" detection and for `Measurement::raw_value`.
    pub fn as_text(&self) -> String {
        match self {
            RawCell::Number(n) => format!("{n}"),
            RawCell::Text(s) => s.clone(),
            RawCell::Empty => String::new(),
        }
    }
}

impl From<&str> for RawCell {
    fn from(s: &str) -> Self {
        RawCell::Text(s.to_string())
    }
}

impl From<f64> for RawCell {
    fn from(n: f64) -> Self {
        RawCell::Number(n)
    }
}

impl fmt::Display for RawCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_text())
    }
}

/// One row of the measurement sheet, exactly as loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawMeasurement {
    pub parameter: String,
    pub unit: String,
    pub station: String,
    pub date: Option<NaiveDateTime>,
    pub value: RawCell,
}

/// A measurement whose value survived normalization.
///
/// Rows whose raw value cannot be read as a number never become a
/// `Measurement`; they are counted in `NormalizedSet::dropped` instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub parameter: String,
    pub unit: String,
    pub station: String,
    pub date: Option<NaiveDateTime>,
    pub raw_value: String,
    /// Parsed value; half the reported limit for "<x" entries.
    pub value: f64,
    pub is_detection_limit: bool,
    /// `"{parameter} ({unit})"`, for chart axes and tables.
    pub label: String,
}

/// Report section a narrative is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Module {
    Surface,
    Groundwater,
    Effluents,
    Sediments,
}

impl Module {
    pub fn from_str_loose(s: &str) -> Option<Module> {
        let lower = s.trim().to_lowercase();
        match lower.as_str() {
            "surface" | "superficial" | "agua superficial" => Some(Module::Surface),
            "groundwater" | "subterranea" | "subterránea" | "agua subterránea" => {
                Some(Module::Groundwater)
            }
            "effluents" | "efluentes" => Some(Module::Effluents),
            "sediments" | "sedimentos" => Some(Module::Sediments),
            _ => None,
        }
    }

    /// Threshold columns preselected for this module.
    ///
    /// Surface water starts from the irrigation and livestock categories
    /// when the sheet has them. Groundwater compares against its own
    /// reference values, so nothing is selected.
    pub fn default_selection(&self, groups: &[StandardGroup]) -> Vec<String> {
        const SURFACE_DEFAULTS: [&str; 2] = ["ECA 2017 3D1", "ECA 2017 3D2"];
        match self {
            Module::Surface => {
                let preferred: Vec<&StandardGroup> = groups
                    .iter()
                    .filter(|g| SURFACE_DEFAULTS.contains(&g.label.as_str()))
                    .collect();
                if preferred.is_empty() {
                    selected_columns(groups)
                } else {
                    selected_columns(preferred)
                }
            }
            Module::Effluents | Module::Sediments => selected_columns(groups),
            Module::Groundwater => Vec::new(),
        }
    }

    /// Spanish section title used in report headings.
    pub fn title(&self) -> &'static str {
        match self {
            Module::Surface => "Agua Superficial",
            Module::Groundwater => "Agua Subterránea",
            Module::Effluents => "Efluentes",
            Module::Sediments => "Sedimentos",
        }
    }
}

impl FromStr for Module {
    type Err = CalidadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Module::from_str_loose(s).ok_or_else(|| CalidadError::UnknownModule(s.to_string()))
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Module::Surface => write!(f, "surface"),
            Module::Groundwater => write!(f, "groundwater"),
            Module::Effluents => write!(f, "effluents"),
            Module::Sediments => write!(f, "sediments"),
        }
    }
}
