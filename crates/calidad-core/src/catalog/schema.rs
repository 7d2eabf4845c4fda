use serde::{Deserialize, Serialize};

/// Display metadata for the standard/category ids of one report module.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardCatalog {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: String,
    pub entries: Vec<CategoryEntry>,
}

/// One standard/category id and how narratives name it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryEntry {
    /// Standard id as found in column names, without bound prefix.
    pub key: String,
    /// Standard name used in sentences ("ECA 2017").
    pub standard: String,
    /// Category label ("3 - D1").
    pub category: String,
    /// Intended use of the category ("riego de vegetales"); may be empty.
    #[serde(default)]
    pub description: String,
}
