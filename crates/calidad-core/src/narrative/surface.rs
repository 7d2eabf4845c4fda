//! Surface water: ECA 2017, ECA 2008 and LGA categories.

use super::clause::Clause;
use super::format_limits;
use crate::catalog::schema::StandardCatalog;
use crate::compliance::{evaluate, ComplianceResult, ComplianceStatus, Precision};
use crate::dataset::ParameterView;
use crate::format::NumberFormat;

/// Irrigation category; rendered together with [`LIVESTOCK`] when both are
/// selected.
pub const IRRIGATION: &str = "eca_2017_3d1";
/// Animal drinking category.
pub const LIVESTOCK: &str = "eca_2017_3d2";

/// Comparison clauses for the active standard ids, in encounter order.
///
/// When both 3-D1 and 3-D2 are active they produce one combined clause,
/// placed first, and are skipped by the per-category loop.
pub fn clauses(
    view: &ParameterView<'_>,
    active: &[&str],
    catalog: &StandardCatalog,
    fmt: &NumberFormat,
) -> Vec<Clause> {
    let values = view.values();
    let unit = view.unit();
    let mut out = Vec::new();

    let combined = active.contains(&IRRIGATION) && active.contains(&LIVESTOCK);
    if combined {
        out.push(combined_clause(view, &values, fmt));
    }

    for &key in active {
        if combined && (key == IRRIGATION || key == LIVESTOCK) {
            continue;
        }

        let meta = catalog.describe(key);
        let standard = &meta.standard;
        let (lower, upper) = view.limits(key);
        let result = evaluate(key, &values, lower, upper);
        let limits = format_limits(lower, upper, fmt);
        let comparing = format!(
            "Al comparar los resultados obtenidos con el {standard} para agua para la categoría {} ({limits} {unit}), se observa que",
            meta.category
        );

        let body = match result.status() {
            ComplianceStatus::NotApplicable => format!(
                "Cabe mencionar que no existe un {standard} para agua para la categoría {} ({}) aplicable para este parámetro.",
                meta.category, meta.description
            ),
            ComplianceStatus::AllCompliant => {
                format!("{comparing} todos los registros cumplen con el {standard}.")
            }
            ComplianceStatus::NoneCompliant => {
                format!("{comparing} todos los registros no cumplen con el {standard}.")
            }
            ComplianceStatus::Partial(n) => format!(
                "{comparing} {n} ({} %) de los registros no cumplen con el valor establecido.",
                percent(&result, Precision::Whole, fmt)
            ),
        };
        out.push(Clause::standalone(body));
    }

    out
}

fn combined_clause(view: &ParameterView<'_>, values: &[f64], fmt: &NumberFormat) -> Clause {
    const STANDARD: &str = "ECA 2017";
    const D1: &str = "para agua para la categoría 3 – D1";
    const D2: &str = "3 - D2";

    let unit = view.unit();
    let (lower1, upper1) = view.limits(IRRIGATION);
    let (lower2, upper2) = view.limits(LIVESTOCK);
    let r1 = evaluate(IRRIGATION, values, lower1, upper1);
    let r2 = evaluate(LIVESTOCK, values, lower2, upper2);
    let lim1 = format_limits(lower1, upper1, fmt);
    let lim2 = format_limits(lower2, upper2, fmt);

    let body = match (r1.status(), r2.status()) {
        (ComplianceStatus::NotApplicable, ComplianceStatus::NotApplicable) => format!(
            "Cabe mencionar que no existe un {STANDARD} {D1} (riego de vegetales) y {D2} (bebida de animales) aplicable para este parámetro."
        ),
        (ComplianceStatus::AllCompliant, ComplianceStatus::AllCompliant) => format!(
            "Al comparar los resultados obtenidos con el {STANDARD} {D1} ({lim1} {unit}) y {D2} ({lim2} {unit}), se observa que todos los registros cumplen con el {STANDARD}."
        ),
        (ComplianceStatus::NoneCompliant, ComplianceStatus::NoneCompliant) => format!(
            "Al comparar los resultados obtenidos con el {STANDARD} {D1} ({lim1} {unit}) y {D2} ({lim2} {unit}), se observa que todos los registros no cumplen con el {STANDARD}."
        ),
        _ => {
            let first = side(&format!("{STANDARD} {D1}"), &lim1, unit, &r1, fmt);
            let second = side(
                &format!("{STANDARD} para agua para la categoría {D2}"),
                &lim2,
                unit,
                &r2,
                fmt,
            );
            format!("Al comparar los resultados obtenidos con el {first}; y comparando con el {second}.")
        }
    };

    Clause::standalone(body)
}

/// "<reference> (<limits> <unit>), se observa que <outcome>" for one side
/// of the combined clause.
fn side(
    reference: &str,
    limits: &str,
    unit: &str,
    result: &ComplianceResult,
    fmt: &NumberFormat,
) -> String {
    let outcome = match result.status() {
        ComplianceStatus::NotApplicable => {
            return format!(
                "{reference}, se observa que no existe un valor establecido aplicable para este parámetro"
            );
        }
        ComplianceStatus::AllCompliant => "todos los registros cumplen con el ECA 2017".to_string(),
        ComplianceStatus::NoneCompliant => {
            "todos los registros no cumplen con el ECA 2017".to_string()
        }
        ComplianceStatus::Partial(n) => format!(
            "{n} ({} %) de los registros no cumplen con el valor establecido",
            percent(result, Precision::Hundredths, fmt)
        ),
    };
    format!("{reference} ({limits} {unit}), se observa que {outcome}")
}

fn percent(result: &ComplianceResult, precision: Precision, fmt: &NumberFormat) -> String {
    result
        .percentage(precision)
        .map(|p| fmt.plain(p))
        .unwrap_or_else(|| "NaN".to_string())
}
