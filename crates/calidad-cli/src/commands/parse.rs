use std::path::PathBuf;

use calidad_core::dataset::MergedDataset;
use calidad_core::error::CalidadError;
use calidad_core::model::Module;
use calidad_core::reference::annotate_groundwater_reference;

use crate::output;

pub fn run(
    input_file: PathBuf,
    output_format: &str,
    output_file: Option<PathBuf>,
    module: Option<&str>,
) -> Result<(), CalidadError> {
    let module: Option<Module> = module.map(str::parse).transpose()?;
    let bytes = std::fs::read(&input_file)?;
    let mut dataset = calidad_core::load_workbook_dataset(&bytes)?;
    annotate_for_module(&mut dataset, module);

    match output_file {
        Some(path) => {
            // Saved datasets are always JSON so `report` can read them back.
            let json = serde_json::to_string_pretty(&dataset)?;
            std::fs::write(&path, json)?;
            eprintln!(
                "Parsed {} record(s), written to {}",
                dataset.len(),
                path.display()
            );
            if dataset.dropped > 0 {
                eprintln!(
                    "  {} row(s) dropped: value is not a number",
                    dataset.dropped
                );
            }
        }
        None => match output_format {
            "json" => output::json::print(&dataset)?,
            _ => println!("{}", output::table::format_dataset(&dataset)),
        },
    }

    Ok(())
}

/// Groundwater has no regulatory limit; its reference value is stored as a
/// threshold column instead.
fn annotate_for_module(dataset: &mut MergedDataset, module: Option<Module>) {
    if module == Some(Module::Groundwater) {
        annotate_groundwater_reference(dataset);
    }
}
