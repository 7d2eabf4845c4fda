use crate::dataset::ParameterView;
use crate::format::{round_to, NumberFormat};
use crate::parsing::values::detection_limit_of;

/// Opening sentence shared by every module: the range of the parameter's
/// values across all stations, with detection limits spelled out.
pub fn summary_sentence(view: &ParameterView<'_>, fmt: &NumberFormat) -> String {
    let unit = view.unit();
    let values = view.values();
    let flags: Vec<bool> = view
        .records()
        .iter()
        .map(|r| r.measurement.is_detection_limit)
        .collect();

    let limits = detection_limits(view, fmt);

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mean = values.iter().sum::<f64>() / values.len() as f64;

    let min_t = fmt.general(min);
    let max_t = fmt.general(max);
    // Rounding small means to two places would print them as 0.
    let mean_t = if mean.abs() >= 0.1 {
        fmt.general(round_to(mean, 2))
    } else {
        fmt.general(mean)
    };

    let summary = if flags.iter().all(|&ld| ld) {
        format!("se encontraron por debajo del límite de detección ({limits} {unit})")
    } else if !flags.iter().any(|&ld| ld) {
        format!(
            "variaron desde un mínimo igual a {min_t} {unit} hasta un máximo igual a {max_t} {unit}, contando con un valor promedio de {mean_t} {unit}"
        )
    } else {
        format!(
            "variaron desde por debajo del límite de detección ({limits} {unit}) hasta un máximo igual a {max_t} {unit}, con un valor promedio de {mean_t} {unit}"
        )
    };

    format!(
        "Como se observa en el gráfico, los valores de {} registrados en todas las estaciones {}.",
        view.parameter(),
        summary
    )
}

/// Distinct detection limits, ascending, comma-separated.
fn detection_limits(view: &ParameterView<'_>, fmt: &NumberFormat) -> String {
    let mut limits: Vec<f64> = view
        .records()
        .iter()
        .filter(|r| r.measurement.is_detection_limit)
        .filter_map(|r| detection_limit_of(&r.measurement.raw_value))
        .collect();
    limits.sort_by(f64::total_cmp);
    limits.dedup();

    limits
        .iter()
        .map(|&l| fmt.plain(l))
        .collect::<Vec<_>>()
        .join(", ")
}
