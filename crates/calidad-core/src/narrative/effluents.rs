//! Effluents: NMP 1996 and the two LMP 2010 standards, always in that order.

use super::clause::{fold_clauses, Clause, Position};
use super::format_limits;
use crate::compliance::{evaluate, ComplianceStatus, Precision};
use crate::dataset::ParameterView;
use crate::format::NumberFormat;

/// One of the three effluent standards a report can compare against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffluentStandard {
    MiningNmp1996,
    MiningLmp2010,
    DomesticLmp2010,
}

impl EffluentStandard {
    pub const ORDER: [EffluentStandard; 3] = [
        EffluentStandard::MiningNmp1996,
        EffluentStandard::MiningLmp2010,
        EffluentStandard::DomesticLmp2010,
    ];

    /// Standard id inside the threshold column names.
    pub fn id(self) -> &'static str {
        match self {
            EffluentStandard::MiningNmp1996 => "nmp_minero",
            EffluentStandard::MiningLmp2010 => "lmp_2010_minero",
            EffluentStandard::DomesticLmp2010 => "lmp_2010_domestico",
        }
    }

    fn reference(self) -> &'static str {
        match self {
            EffluentStandard::MiningNmp1996 => "NMP 1996 para efluentes minero-metalúrgicos",
            EffluentStandard::MiningLmp2010 => "LMP 2010 para efluentes minero-metalúrgicos",
            EffluentStandard::DomesticLmp2010 => {
                "LMP 2010 para efluentes domésticos o municipales"
            }
        }
    }

    fn short_name(self) -> &'static str {
        match self {
            EffluentStandard::MiningNmp1996 => "NMP",
            _ => "LMP",
        }
    }

    fn not_applicable(self, position: Position) -> String {
        match self {
            EffluentStandard::MiningNmp1996 => {
                "Cabe mencionar que no existe un NMP 1996 para efluentes minero-metalúrgicos aplicable para este parámetro.".to_string()
            }
            EffluentStandard::MiningLmp2010 => format!(
                "{} existe un LMP 2010 para efluentes minero-metalúrgicos (valor en cualquier momento) aplicable para este parámetro.",
                position.opening("no")
            ),
            EffluentStandard::DomesticLmp2010 => format!(
                "{} existe un valor en los LMP 2010 para efluentes domésticos o municipales aplicable para este parámetro.",
                position.opening("no")
            ),
        }
    }

    /// Article before the reference in the partial-compliance sentence.
    /// The domestic standard drops it.
    fn partial_article(self) -> &'static str {
        match self {
            EffluentStandard::DomesticLmp2010 => "",
            _ => "el ",
        }
    }

    /// Whether any selected column or id names this standard.
    pub fn is_selected(self, selection: &[String]) -> bool {
        selection.iter().any(|s| s.contains(self.id()))
    }
}

pub fn clauses(view: &ParameterView<'_>, selection: &[String], fmt: &NumberFormat) -> Vec<Clause> {
    let values = view.values();
    let unit = view.unit();

    let active = EffluentStandard::ORDER
        .into_iter()
        .filter(|s| s.is_selected(selection));

    fold_clauses(active, |standard, position| {
        let (lower, upper) = view.limits(standard.id());
        let result = evaluate(standard.id(), &values, lower, upper);
        let limits = format_limits(lower, upper, fmt);
        let opening = position.opening("Al");
        let reference = standard.reference();
        let short = standard.short_name();

        let body = match result.status() {
            ComplianceStatus::NotApplicable => standard.not_applicable(position),
            ComplianceStatus::AllCompliant => format!(
                "{opening} comparar los resultados obtenidos con el {reference} ({limits} {unit}), se observa que todos los registros cumplen con el {short}."
            ),
            ComplianceStatus::NoneCompliant => format!(
                "{opening} comparar los resultados obtenidos con el {reference} ({limits} {unit}), se observa que todos los registros no cumplen con el {short}."
            ),
            ComplianceStatus::Partial(n) => format!(
                "{opening} comparar los resultados obtenidos con {}{reference} ({limits} {unit}), se observa que {n} ({} %) de los registros no cumplen con el valor establecido.",
                standard.partial_article(),
                result
                    .percentage(Precision::Hundredths)
                    .map(|p| fmt.plain(p))
                    .unwrap_or_else(|| "NaN".to_string())
            ),
        };
        Some(Clause::at(position, body))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{MergedDataset, MergedRecord};
    use crate::model::Measurement;
    use crate::regulation::key::ThresholdKey;

    const COLUMNS: [&str; 3] = [
        "lim_sup_nmp_minero",
        "lim_sup_lmp_2010_minero",
        "lim_sup_lmp_2010_domestico",
    ];

    fn dataset(values: &[f64], thresholds: [Option<f64>; 3]) -> MergedDataset {
        MergedDataset {
            columns: COLUMNS.iter().filter_map(|c| ThresholdKey::parse(c)).collect(),
            records: values
                .iter()
                .map(|&v| MergedRecord {
                    measurement: Measurement {
                        parameter: "Cobre".into(),
                        unit: "mg/L".into(),
                        station: "EF-1".into(),
                        date: None,
                        raw_value: v.to_string(),
                        value: v,
                        is_detection_limit: false,
                        label: "Cobre (mg/L)".into(),
                    },
                    thresholds: thresholds.to_vec(),
                })
                .collect(),
            dropped: 0,
        }
    }

    fn render(ds: &MergedDataset, selection: &[&str]) -> String {
        let view = ds.parameter("Cobre").unwrap();
        let selection: Vec<String> = selection.iter().map(|s| s.to_string()).collect();
        clauses(&view, &selection, &NumberFormat::default())
            .iter()
            .map(|c| c.to_string())
            .collect()
    }

    #[test]
    fn test_order_is_fixed_regardless_of_selection() {
        let ds = dataset(&[0.1, 0.2], [Some(1.0), Some(0.5), Some(1.0)]);
        let text = render(&ds, &COLUMNS.iter().rev().copied().collect::<Vec<_>>());
        assert_eq!(
            text,
            " Al comparar los resultados obtenidos con el NMP 1996 para efluentes minero-metalúrgicos (1 mg/L), se observa que todos los registros cumplen con el NMP. Por otro lado, al comparar los resultados obtenidos con el LMP 2010 para efluentes minero-metalúrgicos (0,5 mg/L), se observa que todos los registros cumplen con el LMP. Por otro lado, al comparar los resultados obtenidos con el LMP 2010 para efluentes domésticos o municipales (1 mg/L), se observa que todos los registros cumplen con el LMP."
        );
    }

    #[test]
    fn test_first_clause_capitalized_when_nmp_not_selected() {
        let ds = dataset(&[0.1, 0.2], [None, None, Some(1.0)]);
        let text = render(&ds, &["lim_sup_lmp_2010_minero", "lim_sup_lmp_2010_domestico"]);
        assert_eq!(
            text,
            " No existe un LMP 2010 para efluentes minero-metalúrgicos (valor en cualquier momento) aplicable para este parámetro. Por otro lado, al comparar los resultados obtenidos con el LMP 2010 para efluentes domésticos o municipales (1 mg/L), se observa que todos los registros cumplen con el LMP."
        );
    }

    #[test]
    fn test_domestic_not_applicable_after_prior_clause() {
        let ds = dataset(&[0.1], [Some(1.0), None, None]);
        let text = render(&ds, &["lim_sup_nmp_minero", "lim_sup_lmp_2010_domestico"]);
        assert!(text.ends_with(
            " Por otro lado, no existe un valor en los LMP 2010 para efluentes domésticos o municipales aplicable para este parámetro."
        ));
    }

    #[test]
    fn test_nmp_not_applicable() {
        let ds = dataset(&[0.1], [None, None, None]);
        assert_eq!(
            render(&ds, &["lim_sup_nmp_minero"]),
            " Cabe mencionar que no existe un NMP 1996 para efluentes minero-metalúrgicos aplicable para este parámetro."
        );
    }

    #[test]
    fn test_partial_domestic_omits_article() {
        let ds = dataset(&[0.5, 1.5, 2.0], [None, None, Some(1.0)]);
        assert_eq!(
            render(&ds, &["lim_sup_lmp_2010_domestico"]),
            " Al comparar los resultados obtenidos con LMP 2010 para efluentes domésticos o municipales (1 mg/L), se observa que 2 (66,67 %) de los registros no cumplen con el valor establecido."
        );
    }

    #[test]
    fn test_none_compliant_mining() {
        let ds = dataset(&[2.0, 3.0], [None, Some(1.0), None]);
        assert_eq!(
            render(&ds, &["lim_sup_lmp_2010_minero"]),
            " Al comparar los resultados obtenidos con el LMP 2010 para efluentes minero-metalúrgicos (1 mg/L), se observa que todos los registros no cumplen con el LMP."
        );
    }

    #[test]
    fn test_nothing_selected() {
        let ds = dataset(&[0.1], [Some(1.0), Some(1.0), Some(1.0)]);
        assert_eq!(render(&ds, &[]), "");
    }
}
