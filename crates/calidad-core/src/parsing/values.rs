use crate::model::RawCell;

/// Outcome of reading one raw measurement cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedValue {
    /// `None` when the cell could not be read as a number.
    pub value: Option<f64>,
    pub is_detection_limit: bool,
}

/// Normalize a raw measurement cell.
///
/// Handles formats like:
/// - 68 (numeric cell) -> 68
/// - "0.030" -> 0.030
/// - "<0.030" or "< 0.030" -> 0.015, flagged as detection limit
/// - "", "ND", "<" -> no value
pub fn normalize_value(cell: &RawCell) -> NormalizedValue {
    match cell {
        RawCell::Number(n) => NormalizedValue {
            value: Some(*n).filter(|v| v.is_finite()),
            is_detection_limit: false,
        },
        RawCell::Empty => NormalizedValue {
            value: None,
            is_detection_limit: false,
        },
        RawCell::Text(s) => normalize_text(s),
    }
}

fn normalize_text(s: &str) -> NormalizedValue {
    if s.contains('<') {
        let stripped = s.replace('<', "");
        return NormalizedValue {
            value: parse_number(&stripped).map(|limit| limit / 2.0),
            is_detection_limit: true,
        };
    }

    NormalizedValue {
        value: parse_number(s),
        is_detection_limit: false,
    }
}

/// Parse a plain decimal number. Decimal commas and non-finite values are
/// rejected.
pub fn parse_number(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// The detection limit as written in the raw cell ("<0,5" -> 0.5).
///
/// Accepts a decimal comma, since it is only used for display.
pub fn detection_limit_of(raw: &str) -> Option<f64> {
    if !raw.contains('<') {
        return None;
    }
    parse_number(&raw.replace('<', "").replace(',', "."))
}
