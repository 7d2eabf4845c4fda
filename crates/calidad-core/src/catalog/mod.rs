pub mod builtin;
pub mod schema;

use crate::error::CalidadError;
use crate::regulation::key::standard_label;
use schema::{CategoryEntry, StandardCatalog};
use std::collections::HashSet;
use std::path::Path;

/// Load a standard catalog from a JSON file.
pub fn load_catalog(path: &Path) -> Result<StandardCatalog, CalidadError> {
    let content = std::fs::read_to_string(path).map_err(|e| CalidadError::CatalogLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_catalog(&content, path)
}

/// Parse a standard catalog from a JSON string read from `source`.
pub fn parse_catalog(json: &str, source: &Path) -> Result<StandardCatalog, CalidadError> {
    let catalog: StandardCatalog =
        serde_json::from_str(json).map_err(|e| CalidadError::CatalogLoad {
            path: source.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_catalog(&catalog)?;
    Ok(catalog)
}

/// Parse a standard catalog from a JSON string (no file path context).
pub fn parse_catalog_str(json: &str) -> Result<StandardCatalog, CalidadError> {
    let catalog: StandardCatalog = serde_json::from_str(json)?;
    validate_catalog(&catalog)?;
    Ok(catalog)
}

/// Validate that a catalog is well-formed.
pub fn validate_catalog(catalog: &StandardCatalog) -> Result<(), CalidadError> {
    let mut seen = HashSet::new();
    for entry in &catalog.entries {
        if entry.key.trim().is_empty() {
            return Err(CalidadError::InvalidCatalog(
                "entry key must not be empty".into(),
            ));
        }
        if entry.standard.trim().is_empty() {
            return Err(CalidadError::InvalidCatalog(format!(
                "entry '{}' has an empty standard name",
                entry.key
            )));
        }
        if !seen.insert(entry.key.as_str()) {
            return Err(CalidadError::InvalidCatalog(format!(
                "duplicate entry '{}'",
                entry.key
            )));
        }
    }
    Ok(())
}

impl StandardCatalog {
    pub fn get(&self, key: &str) -> Option<&CategoryEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    /// Metadata for `key`, falling back to a generic label for ids the
    /// catalog does not list (`eca_2008_1a2` -> "ECA 2008 1A2", no
    /// description).
    pub fn describe(&self, key: &str) -> CategoryEntry {
        if let Some(entry) = self.get(key) {
            return entry.clone();
        }
        tracing::debug!(key, "standard id not in catalog, using generic label");
        CategoryEntry {
            key: key.to_string(),
            standard: fallback_standard(key).to_string(),
            category: standard_label(key),
            description: String::new(),
        }
    }
}

fn fallback_standard(key: &str) -> &'static str {
    if key.contains("eca_2017") {
        "ECA 2017"
    } else if key.contains("eca_2008") {
        "ECA 2008"
    } else {
        "LGA"
    }
}
