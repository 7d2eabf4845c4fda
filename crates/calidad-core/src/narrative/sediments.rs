//! Sediments: CCME ISQG and PEL guidelines, upper side only.

use super::clause::Clause;
use crate::compliance::{evaluate, ComplianceStatus, Precision};
use crate::dataset::ParameterView;
use crate::format::NumberFormat;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Environment {
    Freshwater,
    Marine,
}

impl Environment {
    /// Freshwater wins when the selection mentions it at all.
    fn of(selection: &[String]) -> Environment {
        if selection.iter().any(|s| s.contains("freshwater")) {
            Environment::Freshwater
        } else {
            Environment::Marine
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            Environment::Freshwater => "freshwater",
            Environment::Marine => "marine",
        }
    }

    fn description(self) -> &'static str {
        match self {
            Environment::Freshwater => "sedimentos de agua dulce",
            Environment::Marine => "sedimentos marinos",
        }
    }
}

pub fn clauses(view: &ParameterView<'_>, selection: &[String], fmt: &NumberFormat) -> Vec<Clause> {
    let environment = Environment::of(selection);
    let suffix = environment.suffix();
    let kind = environment.description();

    let isqg_key = format!("ISQG_{suffix}");
    let pel_key = format!("PEL_{suffix}");
    let isqg = view
        .threshold(&isqg_key)
        .or_else(|| view.threshold(&format!("ISGQ_{suffix}")));
    let pel = view.threshold(&pel_key);

    let values = view.values();
    let unit = view.unit();
    let compare = |key: &str, limit: Option<f64>, name: &str| {
        limit.map(|limit| {
            let result = evaluate(key, &values, None, Some(limit));
            let opening = format!(
                "Al comparar los resultados obtenidos con el {name} ({} {unit}), se observa que",
                fmt.plain(limit)
            );
            let body = match result.status() {
                ComplianceStatus::Partial(n) => format!(
                    "{opening} {n} ({} %) de los registros exceden el valor establecido.",
                    result
                        .percentage(Precision::Hundredths)
                        .map(|p| fmt.plain(p))
                        .unwrap_or_else(|| "NaN".to_string())
                ),
                ComplianceStatus::NoneCompliant => {
                    format!("{opening} todos los registros exceden el valor establecido.")
                }
                _ => format!("{opening} todos los registros cumplen con el valor establecido."),
            };
            Clause::standalone(body)
        })
    };

    match (compare(&isqg_key, isqg, "ISQG"), compare(&pel_key, pel, "PEL")) {
        (None, None) => vec![Clause::standalone(format!(
            "Cabe mencionar que no existe un ISQG ni un PEL para {kind} aplicable para este parámetro."
        ))],
        (isqg, pel) => {
            let missing = |name: &str| {
                Clause::standalone(format!(
                    "Cabe mencionar que no existe un {name} para {kind} aplicable para este parámetro."
                ))
            };
            vec![
                isqg.unwrap_or_else(|| missing("ISQG")),
                pel.unwrap_or_else(|| missing("PEL")),
            ]
        }
    }
}
