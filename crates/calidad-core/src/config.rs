use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::CalidadError;
use crate::format::NumberFormat;

/// Which groundwater reference comparisons a narrative includes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundwaterOptions {
    /// Compare against mean + 2·s.
    pub high_reference: bool,
    /// Compare against mean - 2·s.
    pub low_reference: bool,
}

impl Default for GroundwaterOptions {
    fn default() -> Self {
        GroundwaterOptions {
            high_reference: true,
            low_reference: false,
        }
    }
}

/// Everything a narrative needs besides the data itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub number_format: NumberFormat,
    pub groundwater: GroundwaterOptions,
}

/// Load a report configuration from a JSON file.
pub fn load_config(path: &Path) -> Result<ReportConfig, CalidadError> {
    let content = std::fs::read_to_string(path).map_err(|e| CalidadError::ConfigLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let config: ReportConfig =
        serde_json::from_str(&content).map_err(|e| CalidadError::ConfigLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_config(&config)?;
    Ok(config)
}

/// Parse a report configuration from a JSON string.
pub fn parse_config_str(json: &str) -> Result<ReportConfig, CalidadError> {
    let config: ReportConfig = serde_json::from_str(json)?;
    validate_config(&config)?;
    Ok(config)
}

pub fn validate_config(config: &ReportConfig) -> Result<(), CalidadError> {
    let fmt = &config.number_format;
    if fmt.decimal_separator.is_ascii_digit() || fmt.decimal_separator == '-' {
        return Err(CalidadError::InvalidConfig(format!(
            "decimal separator '{}' is not allowed",
            fmt.decimal_separator
        )));
    }
    if let Some(sep) = fmt.thousands_separator {
        if sep == fmt.decimal_separator {
            return Err(CalidadError::InvalidConfig(
                "thousands and decimal separators must differ".into(),
            ));
        }
        if sep.is_ascii_digit() || sep == '-' {
            return Err(CalidadError::InvalidConfig(format!(
                "thousands separator '{sep}' is not allowed"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_gives_defaults() {
        let config = parse_config_str("{}").unwrap();
        assert_eq!(config, ReportConfig::default());
        assert_eq!(config.number_format.decimal_separator, ',');
        assert!(config.groundwater.high_reference);
        assert!(!config.groundwater.low_reference);
    }

    #[test]
    fn test_partial_override() {
        let config = parse_config_str(
            r#"{ "number_format": { "decimal_separator": "." }, "groundwater": { "low_reference": true } }"#,
        )
        .unwrap();
        assert_eq!(config.number_format.decimal_separator, '.');
        assert!(config.groundwater.high_reference);
        assert!(config.groundwater.low_reference);
    }

    #[test]
    fn test_same_separators_rejected() {
        let json = r#"{ "number_format": { "decimal_separator": ",", "thousands_separator": "," } }"#;
        assert!(parse_config_str(json).is_err());
    }

    #[test]
    fn test_digit_separator_rejected() {
        let json = r#"{ "number_format": { "decimal_separator": "1" } }"#;
        assert!(parse_config_str(json).is_err());
    }

    #[test]
    fn test_load_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "groundwater": { "high_reference": false } }"#).unwrap();
        let config = load_config(&path).unwrap();
        assert!(!config.groundwater.high_reference);
    }

    #[test]
    fn test_load_config_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            load_config(&path),
            Err(CalidadError::ConfigLoad { .. })
        ));
    }
}
