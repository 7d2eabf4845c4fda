use calidad_core::catalog::{builtin, load_catalog};
use calidad_core::config::{load_config, ReportConfig};
use calidad_core::error::CalidadError;
use calidad_core::model::Module;
use calidad_core::regulation::groups::select_standards;
use serde::Serialize;
use std::path::PathBuf;

use super::load_dataset;
use crate::output;

pub struct ReportArgs {
    pub input_file: PathBuf,
    pub module: String,
    pub parameters: Vec<String>,
    pub standards: Vec<String>,
    pub config: Option<PathBuf>,
    pub catalog: Option<PathBuf>,
    pub low_reference: bool,
    pub no_high_reference: bool,
    pub output_format: String,
}

/// One generated paragraph.
#[derive(Debug, Serialize)]
pub struct Narrative {
    pub parameter: String,
    pub module: Module,
    pub text: String,
}

pub fn run(args: ReportArgs) -> Result<(), CalidadError> {
    let module: Module = args.module.parse()?;

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => ReportConfig::default(),
    };
    if args.low_reference {
        config.groundwater.low_reference = true;
    }
    if args.no_high_reference {
        config.groundwater.high_reference = false;
    }

    let catalog = match &args.catalog {
        Some(path) => load_catalog(path)?,
        None => builtin::surface_water()?,
    };

    let dataset = load_dataset(&args.input_file)?;
    let groups = dataset.groups();
    let selection = if args.standards.is_empty() {
        module.default_selection(&groups)
    } else {
        select_standards(&groups, &args.standards)?
    };
    tracing::debug!(columns = ?selection, "selected threshold columns");

    let parameters: Vec<String> = if args.parameters.is_empty() {
        dataset.parameters().into_iter().map(String::from).collect()
    } else {
        args.parameters.clone()
    };

    let mut narratives = Vec::with_capacity(parameters.len());
    for parameter in parameters {
        let text = calidad_core::generate_narrative(
            &dataset, &parameter, module, &selection, &catalog, &config,
        )?;
        narratives.push(Narrative {
            parameter,
            module,
            text,
        });
    }

    match args.output_format.as_str() {
        "json" => output::json::print(&narratives)?,
        _ => output::table::print_narratives(module, &narratives),
    }

    Ok(())
}
