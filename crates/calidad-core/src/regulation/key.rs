use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of the compliance range a threshold column holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bound {
    Lower,
    Upper,
    /// A single guideline value (`lim_*`, `ISQG_*`, `PEL_*`).
    Single,
}

/// Regulatory standard family a threshold column belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Family {
    Eca,
    Lga,
    Lmp,
    Nmp,
    Isqg,
    Pel,
    /// Statistically derived groundwater reference value.
    Reference,
    Other(String),
}

impl Family {
    fn from_segment(segment: &str) -> Family {
        match segment.to_lowercase().as_str() {
            "eca" => Family::Eca,
            "lga" => Family::Lga,
            "lmp" => Family::Lmp,
            "nmp" => Family::Nmp,
            "referencia" => Family::Reference,
            _ => Family::Other(segment.to_string()),
        }
    }
}

/// A parsed threshold column name such as `lim_inf_eca_2017_3d1` or
/// `PEL_marine`.
///
/// Parsing is deterministic: one column name always yields the same
/// family, year, category and bound. The column name is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ThresholdKey {
    column: String,
    standard_id: String,
    family: Family,
    year: Option<u16>,
    category: Option<String>,
    bound: Bound,
}

impl ThresholdKey {
    /// Parse a column header. Returns `None` for columns that are not
    /// threshold columns (e.g. `parametro`, free-text notes).
    pub fn parse(column: &str) -> Option<ThresholdKey> {
        let column = column.trim();

        let bounded = [
            ("lim_inf_", Bound::Lower),
            ("lim_sup_", Bound::Upper),
            ("lim_", Bound::Single),
        ];
        for (prefix, bound) in bounded {
            if let Some(rest) = column.strip_prefix(prefix) {
                return Self::parse_standard(column, rest, bound);
            }
        }

        Self::parse_sediment(column)
    }

    fn parse_standard(column: &str, standard_id: &str, bound: Bound) -> Option<ThresholdKey> {
        if standard_id.is_empty() {
            return None;
        }
        let segments: Vec<&str> = standard_id.split('_').collect();
        let family = Family::from_segment(segments[0]);

        let year = segments
            .get(1)
            .filter(|s| s.len() == 4 && s.chars().all(|c| c.is_ascii_digit()))
            .and_then(|s| s.parse::<u16>().ok());
        let category_start = if year.is_some() { 2 } else { 1 };
        let category = segments
            .get(category_start..)
            .map(|rest| rest.join("_"))
            .filter(|c| !c.is_empty());

        Some(ThresholdKey {
            column: column.to_string(),
            standard_id: standard_id.to_string(),
            family,
            year,
            category,
            bound,
        })
    }

    fn parse_sediment(column: &str) -> Option<ThresholdKey> {
        let (head, environment) = column.split_once('_')?;
        let family = match head.to_uppercase().as_str() {
            // "ISGQ" is a common misspelling found in older templates.
            "ISQG" | "ISGQ" => Family::Isqg,
            "PEL" => Family::Pel,
            _ => return None,
        };
        if environment.is_empty() {
            return None;
        }
        Some(ThresholdKey {
            column: column.to_string(),
            standard_id: column.to_string(),
            family,
            year: None,
            category: Some(environment.to_string()),
            bound: Bound::Single,
        })
    }

    /// Full column name as it appears in the regulation sheet.
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Column name without its bound prefix (`eca_2017_3d1`). Lower and
    /// upper columns of one standard/category share this id.
    pub fn standard_id(&self) -> &str {
        &self.standard_id
    }

    pub fn family(&self) -> &Family {
        &self.family
    }

    pub fn year(&self) -> Option<u16> {
        self.year
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn bound(&self) -> Bound {
        self.bound
    }

    /// Friendly group label: `eca_2017_3d1` -> `ECA 2017 3D1`.
    pub fn group_label(&self) -> String {
        standard_label(&self.standard_id)
    }

    /// Two-line legend label for chart consumers, lines separated by `\n`.
    pub fn legend_label(&self) -> String {
        let prefix = match self.bound {
            Bound::Lower => "Lím. inf.",
            Bound::Upper => "Lím. sup.",
            Bound::Single => "Lím.",
        };
        let parts: Vec<&str> = self.standard_id.split('_').collect();
        let tail = |from: usize| parts.get(from..).unwrap_or(&[]).join(" ");

        let (body, category) = match &self.family {
            Family::Lga => (
                "LGA".to_string(),
                format!("Cat. {}", parts.get(1).copied().unwrap_or("")),
            ),
            Family::Eca => (
                format!("ECA-{}", parts.get(1).copied().unwrap_or("")),
                eca_legend_category(&parts.get(2..).unwrap_or(&[]).join("_")),
            ),
            Family::Nmp => ("NMP".to_string(), tail(1).to_lowercase()),
            Family::Lmp => (
                format!("LMP {}", parts.get(1).copied().unwrap_or("")),
                tail(2).to_lowercase(),
            ),
            Family::Isqg | Family::Pel => {
                return format!("{}\n{}", parts[0], capitalize(&tail(1)));
            }
            Family::Reference => {
                return "Valor Referencial\nPromedio + 2 Desv. Est.".to_string();
            }
            Family::Other(_) => (parts[0].to_uppercase(), tail(1).to_uppercase()),
        };

        format!("{prefix} {body}\n{category}")
    }
}

/// Label of a standard id, e.g. `lmp_2010_minero` -> `LMP 2010 MINERO`.
pub fn standard_label(standard_id: &str) -> String {
    standard_id.replace('_', " ").to_uppercase()
}

/// Strip the bound prefix from a column name; ids pass through unchanged.
pub fn standard_id_of(column_or_id: &str) -> &str {
    let s = column_or_id.trim();
    s.strip_prefix("lim_inf_")
        .or_else(|| s.strip_prefix("lim_sup_"))
        .or_else(|| s.strip_prefix("lim_"))
        .unwrap_or(s)
}

fn eca_legend_category(raw: &str) -> String {
    const SUFFIXES: [(&str, &str); 4] = [
        ("cys", "costa y sierra"),
        ("s", "selva"),
        ("e", "estuario"),
        ("m", "mar"),
    ];

    let mut code = raw.to_string();
    let mut suffix = String::new();
    for (short, long) in SUFFIXES {
        let marker = format!("_{short}");
        if code.ends_with(&marker) {
            suffix = format!(" {long}");
            code = code.replace(&marker, "");
            break;
        }
    }

    let mut chars = code.chars();
    match chars.next() {
        Some(first) if code.chars().count() >= 3 && first.is_ascii_digit() => {
            format!("Cat. {}-{}{}", first, chars.as_str().to_uppercase(), suffix)
        }
        _ => format!("Cat. {}{}", code.to_uppercase(), suffix),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => {
            let rest = chars.as_str().to_lowercase();
            first.to_uppercase().chain(rest.chars()).collect()
        }
        None => String::new(),
    }
}

impl TryFrom<String> for ThresholdKey {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ThresholdKey::parse(&value).ok_or_else(|| format!("'{value}' is not a threshold column"))
    }
}

impl From<ThresholdKey> for String {
    fn from(key: ThresholdKey) -> Self {
        key.column
    }
}

impl fmt::Display for ThresholdKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column)
    }
}
