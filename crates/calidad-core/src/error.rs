use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CalidadError {
    /// Missing sheet or column. The message is shown to the user as-is.
    #[error("{0}")]
    InputSchema(String),

    #[error("Error al leer el archivo: {0}")]
    Workbook(String),

    #[error("no records available for parameter '{0}'")]
    UnknownParameter(String),

    #[error("unknown module '{0}'. Available: surface, groundwater, effluents, sediments")]
    UnknownModule(String),

    #[error("unknown standard '{0}'")]
    UnknownStandard(String),

    #[error("invalid standard catalog: {0}")]
    InvalidCatalog(String),

    #[error("failed to load standard catalog from {path}: {reason}")]
    CatalogLoad { path: PathBuf, reason: String },

    #[error("invalid report configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to load report configuration from {path}: {reason}")]
    ConfigLoad { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
