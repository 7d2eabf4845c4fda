//! Number rendering for report text.
//!
//! All separators come from an explicit [`NumberFormat`]; nothing here reads
//! process locale.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumberFormat {
    pub decimal_separator: char,
    pub thousands_separator: Option<char>,
}

impl Default for NumberFormat {
    fn default() -> Self {
        NumberFormat {
            decimal_separator: ',',
            thousands_separator: None,
        }
    }
}

impl NumberFormat {
    /// Six significant digits, trailing zeros removed, scientific notation
    /// outside `1e-4 <= |v| < 1e6` (printf `%g`). Used for statistics.
    pub fn general(&self, value: f64) -> String {
        if value.is_nan() {
            return "NaN".to_string();
        }
        self.localize(&format_g(value))
    }

    /// Shortest decimal that reads back as the same value (`1.0` -> "1").
    /// Used for limits, detection limits and percentages.
    pub fn plain(&self, value: f64) -> String {
        if value.is_nan() {
            return "NaN".to_string();
        }
        self.localize(&format!("{value}"))
    }

    fn localize(&self, s: &str) -> String {
        let (mantissa, exponent) = match s.find('e') {
            Some(idx) => (&s[..idx], &s[idx..]),
            None => (s, ""),
        };
        let (sign, unsigned) = match mantissa.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", mantissa),
        };
        let (int_part, frac_part) = match unsigned.find('.') {
            Some(idx) => (&unsigned[..idx], Some(&unsigned[idx + 1..])),
            None => (unsigned, None),
        };

        let mut out = String::with_capacity(s.len() + 4);
        out.push_str(sign);
        match self.thousands_separator {
            Some(sep) => out.push_str(&group_thousands(int_part, sep)),
            None => out.push_str(int_part),
        }
        if let Some(frac) = frac_part {
            out.push(self.decimal_separator);
            out.push_str(frac);
        }
        out.push_str(exponent);
        out
    }
}

fn group_thousands(digits: &str, sep: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(sep);
        }
        out.push(c);
    }
    out
}

fn format_g(value: f64) -> String {
    const PRECISION: i32 = 6;

    if value == 0.0 {
        return "0".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    // Round to the target significant digits first; the exponent of the
    // rounded value decides the notation.
    let sci = format!("{:.*e}", (PRECISION - 1) as usize, value);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };

    if exp < -4 || exp >= PRECISION {
        let mantissa = strip_trailing_zeros(mantissa);
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exp.abs())
    } else {
        let decimals = (PRECISION - 1 - exp).max(0) as usize;
        strip_trailing_zeros(&format!("{value:.decimals$}"))
    }
}

fn strip_trailing_zeros(s: &str) -> String {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s.to_string()
    }
}

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
