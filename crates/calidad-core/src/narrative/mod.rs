pub mod clause;
pub mod effluents;
pub mod groundwater;
pub mod sediments;
pub mod stats;
pub mod surface;

use crate::catalog::schema::StandardCatalog;
use crate::config::ReportConfig;
use crate::dataset::ParameterView;
use crate::format::NumberFormat;
use crate::model::Module;
use crate::regulation::key::standard_id_of;

/// Render the full paragraph for one parameter.
///
/// `selection` holds threshold column names (`lim_sup_eca_2017_3d1`) or
/// bare standard ids; columns of the same standard collapse into one.
pub fn render(
    module: Module,
    view: &ParameterView<'_>,
    selection: &[String],
    catalog: &StandardCatalog,
    config: &ReportConfig,
) -> String {
    let fmt = &config.number_format;
    let preamble = stats::summary_sentence(view, fmt);
    let active = active_standards(selection);

    let clauses = match module {
        Module::Surface => surface::clauses(view, &active, catalog, fmt),
        Module::Groundwater => groundwater::clauses(view, &config.groundwater, fmt),
        Module::Effluents => effluents::clauses(view, selection, fmt),
        Module::Sediments => sediments::clauses(view, selection, fmt),
    };

    tracing::debug!(
        module = %module,
        parameter = view.parameter(),
        clauses = clauses.len(),
        "rendered narrative"
    );
    clause::paragraph(&preamble, &clauses)
}

/// Distinct standard ids of a selection, in selection order.
pub fn active_standards(selection: &[String]) -> Vec<&str> {
    let mut active: Vec<&str> = Vec::new();
    for entry in selection {
        let id = standard_id_of(entry);
        if !id.is_empty() && !active.contains(&id) {
            active.push(id);
        }
    }
    active
}

/// `"inf a sup"` when both limits exist, else whichever does, else empty.
pub fn format_limits(lower: Option<f64>, upper: Option<f64>, fmt: &NumberFormat) -> String {
    match (lower, upper) {
        (Some(lo), Some(hi)) => format!("{} a {}", fmt.plain(lo), fmt.plain(hi)),
        (None, Some(hi)) => fmt.plain(hi),
        (Some(lo), None) => fmt.plain(lo),
        (None, None) => String::new(),
    }
}
