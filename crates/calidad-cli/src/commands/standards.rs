use calidad_core::model::Module;
use std::path::PathBuf;

use super::load_dataset;
use crate::output;

pub fn run(
    input_file: PathBuf,
    module: Option<&str>,
) -> Result<(), calidad_core::error::CalidadError> {
    let dataset = load_dataset(&input_file)?;
    let groups = dataset.groups();

    let preselected = match module {
        Some(name) => name.parse::<Module>()?.default_selection(&groups),
        None => Vec::new(),
    };

    if groups.is_empty() {
        println!("No threshold columns found.");
        return Ok(());
    }

    println!("{}", output::table::format_groups(&groups, &preselected));
    Ok(())
}
