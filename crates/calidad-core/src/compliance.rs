use serde::{Deserialize, Serialize};

use crate::format::round_to;

/// Compliance of one parameter's values against one lower/upper pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceResult {
    /// Standard id or reference the limits came from.
    pub standard_key: String,
    pub lower_limit: Option<f64>,
    pub upper_limit: Option<f64>,
    pub total_count: usize,
    /// `None` when neither limit exists: the standard does not apply.
    pub violation_count: Option<usize>,
}

/// How a result reads in a narrative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComplianceStatus {
    NotApplicable,
    AllCompliant,
    NoneCompliant,
    Partial(usize),
}

/// Decimal places of a percentage in a given sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precision {
    Whole,
    Hundredths,
}

impl Precision {
    fn decimals(self) -> u32 {
        match self {
            Precision::Whole => 0,
            Precision::Hundredths => 2,
        }
    }
}

/// Count values outside `lower <= v <= upper`. A null bound leaves that
/// side unconstrained; both null means not applicable.
pub fn evaluate(
    standard_key: &str,
    values: &[f64],
    lower: Option<f64>,
    upper: Option<f64>,
) -> ComplianceResult {
    let violation_count = if lower.is_none() && upper.is_none() {
        None
    } else {
        Some(
            values
                .iter()
                .filter(|&&v| lower.is_some_and(|lo| v < lo) || upper.is_some_and(|hi| v > hi))
                .count(),
        )
    };

    ComplianceResult {
        standard_key: standard_key.to_string(),
        lower_limit: lower,
        upper_limit: upper,
        total_count: values.len(),
        violation_count,
    }
}

impl ComplianceResult {
    pub fn status(&self) -> ComplianceStatus {
        match self.violation_count {
            None => ComplianceStatus::NotApplicable,
            Some(0) => ComplianceStatus::AllCompliant,
            Some(n) if n == self.total_count => ComplianceStatus::NoneCompliant,
            Some(n) => ComplianceStatus::Partial(n),
        }
    }

    /// Share of violating records, rounded half away from zero.
    ///
    /// `None` when not applicable; NaN when there are no records at all.
    pub fn percentage(&self, precision: Precision) -> Option<f64> {
        let violations = self.violation_count?;
        if self.total_count == 0 {
            return Some(f64::NAN);
        }
        let raw = 100.0 * violations as f64 / self.total_count as f64;
        Some(round_to(raw, precision.decimals()))
    }
}
