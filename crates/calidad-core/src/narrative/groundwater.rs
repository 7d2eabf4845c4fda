//! Groundwater: no regulatory standard, compared against mean ± 2·s.

use super::clause::Clause;
use crate::compliance::{evaluate, ComplianceStatus, Precision};
use crate::config::GroundwaterOptions;
use crate::dataset::ParameterView;
use crate::format::NumberFormat;
use crate::reference::reference_values;

const HIGH_REFERENCE: &str = "referencia_alta";
const LOW_REFERENCE: &str = "referencia_baja";

pub fn clauses(
    view: &ParameterView<'_>,
    options: &GroundwaterOptions,
    fmt: &NumberFormat,
) -> Vec<Clause> {
    if !options.high_reference && !options.low_reference {
        return Vec::new();
    }
    let values = view.values();
    let Some(reference) = reference_values(&values) else {
        return Vec::new();
    };
    let unit = view.unit();

    let mut basis = Vec::new();
    let mut high_outcome = None;
    let mut low_outcome = None;

    if options.high_reference {
        basis.push(format!(
            "el promedio más dos veces la desviación estándar ({} {unit})",
            fmt.general(reference.high)
        ));
        let result = evaluate(HIGH_REFERENCE, &values, None, Some(reference.high));
        high_outcome = Some(match result.status() {
            ComplianceStatus::Partial(n) => format!(
                "{n} ({} %) de los registros exceden el valor de referencia alto",
                percent(result.percentage(Precision::Hundredths), fmt)
            ),
            ComplianceStatus::NoneCompliant => {
                "la totalidad de los registros exceden el valor de referencia alto".to_string()
            }
            _ => "todos los registros se encuentran por debajo del valor de referencia alto"
                .to_string(),
        });
    }

    if options.low_reference {
        basis.push(format!(
            "el promedio menos dos veces la desviación estándar ({} {unit})",
            fmt.general(reference.low)
        ));
        let result = evaluate(LOW_REFERENCE, &values, Some(reference.low), None);
        low_outcome = Some(match result.status() {
            ComplianceStatus::Partial(n) => format!(
                "{n} ({} %) de los registros se encuentran por debajo del valor de referencia bajo",
                percent(result.percentage(Precision::Hundredths), fmt)
            ),
            ComplianceStatus::NoneCompliant => {
                "la totalidad de los registros se encuentran por debajo del valor de referencia bajo"
                    .to_string()
            }
            _ => "todos los registros se encuentran por encima del valor de referencia bajo"
                .to_string(),
        });
    }

    let intro = format!(
        "Debido a que no se cuenta con un Estándar de Calidad Ambiental (ECA) específico para aguas subterráneas, se estableció como valor de referencia {}.",
        basis.join(" y ")
    );

    let comparison = match (high_outcome, low_outcome) {
        (Some(high), Some(low)) => format!("{high}; mientras que {low}"),
        (Some(one), None) | (None, Some(one)) => one,
        (None, None) => return vec![Clause::standalone(intro)],
    };

    vec![
        Clause::standalone(intro),
        Clause::standalone(format!(
            "Al realizar la comparación, se observa que {comparison}."
        )),
    ]
}

fn percent(value: Option<f64>, fmt: &NumberFormat) -> String {
    value.map(|p| fmt.plain(p)).unwrap_or_else(|| "NaN".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{MergedDataset, MergedRecord};
    use crate::model::Measurement;

    fn dataset(values: &[f64]) -> MergedDataset {
        MergedDataset {
            columns: vec![],
            records: values
                .iter()
                .map(|&v| MergedRecord {
                    measurement: Measurement {
                        parameter: "Hierro".into(),
                        unit: "mg/L".into(),
                        station: "PZ-1".into(),
                        date: None,
                        raw_value: v.to_string(),
                        value: v,
                        is_detection_limit: false,
                        label: "Hierro (mg/L)".into(),
                    },
                    thresholds: vec![],
                })
                .collect(),
            dropped: 0,
        }
    }

    fn render(values: &[f64], high: bool, low: bool) -> String {
        let ds = dataset(values);
        let view = ds.parameter("Hierro").unwrap();
        let options = GroundwaterOptions {
            high_reference: high,
            low_reference: low,
        };
        clauses(&view, &options, &NumberFormat::default())
            .iter()
            .map(|c| c.to_string())
            .collect()
    }

    #[test]
    fn test_high_reference_all_below() {
        // mean 2, s 1 -> high reference 4
        let text = render(&[1.0, 2.0, 3.0], true, false);
        assert_eq!(
            text,
            " Debido a que no se cuenta con un Estándar de Calidad Ambiental (ECA) específico para aguas subterráneas, se estableció como valor de referencia el promedio más dos veces la desviación estándar (4 mg/L). Al realizar la comparación, se observa que todos los registros se encuentran por debajo del valor de referencia alto."
        );
    }

    #[test]
    fn test_high_reference_partial() {
        let mut values = vec![1.0; 19];
        values.push(100.0);
        let text = render(&values, true, false);
        assert!(
            text.ends_with("se observa que 1 (5 %) de los registros exceden el valor de referencia alto."),
            "{text}"
        );
    }

    #[test]
    fn test_both_references_combined() {
        let text = render(&[1.0, 2.0, 3.0], true, true);
        assert!(text.contains(
            "el promedio más dos veces la desviación estándar (4 mg/L) y el promedio menos dos veces la desviación estándar (0 mg/L)."
        ));
        assert!(text.ends_with(
            "se observa que todos los registros se encuentran por debajo del valor de referencia alto; mientras que todos los registros se encuentran por encima del valor de referencia bajo."
        ));
    }

    #[test]
    fn test_no_reference_selected() {
        assert_eq!(render(&[1.0, 2.0], false, false), "");
    }

    #[test]
    fn test_single_value_reference_equals_value() {
        let text = render(&[2.5], true, false);
        assert!(text.contains("(2,5 mg/L)"));
        assert!(text.contains("todos los registros se encuentran por debajo"));
    }
}
