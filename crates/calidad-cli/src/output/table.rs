use calidad_core::dataset::MergedDataset;
use calidad_core::model::Module;
use calidad_core::regulation::groups::StandardGroup;

use crate::commands::report::Narrative;

/// Format a merged dataset as a human-readable table.
pub fn format_dataset(dataset: &MergedDataset) -> String {
    let mut out = String::new();

    let parameters = dataset.parameters();
    out.push_str(&format!(
        "Records: {} ({} dropped), parameters: {}, threshold columns: {}\n\n",
        dataset.len(),
        dataset.dropped,
        parameters.len(),
        dataset.columns.len()
    ));

    for parameter in parameters {
        let Some(view) = dataset.parameter(parameter) else {
            continue;
        };
        out.push_str(&format!("=== {} ({}) ===\n\n", view.parameter(), view.unit()));

        let max_station = view
            .records()
            .iter()
            .map(|r| r.measurement.station.len())
            .max()
            .unwrap_or(8)
            .max("Station".len());

        out.push_str(&format!(
            "  {:<width$}  {:<19}  {:>12}  {:>12}\n",
            "Station",
            "Date",
            "Raw",
            "Value",
            width = max_station
        ));
        out.push_str(&format!("  {}\n", "-".repeat(max_station + 51)));

        for record in view.records() {
            let m = &record.measurement;
            let date = m
                .date
                .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "-".into());
            let marker = if m.is_detection_limit { " (LD)" } else { "" };
            out.push_str(&format!(
                "  {:<width$}  {:<19}  {:>12}  {:>12}{}\n",
                m.station,
                date,
                m.raw_value,
                m.value,
                marker,
                width = max_station
            ));
        }

        let limits: Vec<String> = dataset
            .columns
            .iter()
            .filter_map(|key| {
                view.threshold(key.column())
                    .map(|v| format!("{} = {}", key.column(), v))
            })
            .collect();
        if !limits.is_empty() {
            out.push_str(&format!("\n  Limits: {}\n", limits.join(", ")));
        }
        out.push('\n');
    }

    out
}

/// Format standard groups, marking preselected ones with `*`.
pub fn format_groups(groups: &[StandardGroup], preselected: &[String]) -> String {
    let max_label = groups.iter().map(|g| g.label.len()).max().unwrap_or(10);

    let mut out = String::from("Standards:\n\n");
    for group in groups {
        let marker = if group.columns.iter().any(|c| preselected.contains(c)) {
            "*"
        } else {
            " "
        };
        out.push_str(&format!(
            "  {} {:<width$}  {}\n",
            marker,
            group.label,
            group.columns.join(", "),
            width = max_label
        ));
    }
    if !preselected.is_empty() {
        out.push_str("\n  * preselected for the module\n");
    }
    out
}

pub fn print_narratives(module: Module, narratives: &[Narrative]) {
    println!("=== {} ===\n", module.title());
    for narrative in narratives {
        println!("--- {} ---\n", narrative.parameter);
        println!("{}\n", narrative.text);
    }
}
