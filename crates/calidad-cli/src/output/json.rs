use calidad_core::error::CalidadError;
use serde::Serialize;

pub fn print<T: Serialize + ?Sized>(value: &T) -> Result<(), CalidadError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
