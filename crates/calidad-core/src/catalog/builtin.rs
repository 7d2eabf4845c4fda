use crate::catalog::schema::StandardCatalog;
use crate::error::CalidadError;

const SURFACE_WATER_JSON: &str = include_str!("../../../../catalog/surface-water.json");

/// Load the builtin surface-water catalog (ECA 2017, ECA 2008, LGA).
pub fn surface_water() -> Result<StandardCatalog, CalidadError> {
    let catalog: StandardCatalog = serde_json::from_str(SURFACE_WATER_JSON)?;
    Ok(catalog)
}
