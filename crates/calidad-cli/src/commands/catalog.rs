use calidad_core::catalog::builtin;

pub fn list() -> Result<(), calidad_core::error::CalidadError> {
    let catalog = builtin::surface_water()?;

    println!("{} (v{})\n", catalog.name, catalog.version);
    if let Some(ref desc) = catalog.description {
        println!("{}\n", desc);
    }

    let width = catalog
        .entries
        .iter()
        .map(|e| e.key.len())
        .max()
        .unwrap_or(12);

    for entry in &catalog.entries {
        print!("  {:<width$}  {} {}", entry.key, entry.standard, entry.category);
        if entry.description.is_empty() {
            println!();
        } else {
            println!(" -- {}", entry.description);
        }
    }
    println!();
    println!("Keys not listed here are reported with their id in upper case.");

    Ok(())
}
