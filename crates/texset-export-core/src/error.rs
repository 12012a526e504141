use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExporterError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Texture set not found in project: {0}")]
    TextureSetNotFound(String),
    #[error("Row {index} is out of range (table has {len} rows)")]
    RowOutOfRange { index: usize, len: usize },
    #[error("Export of texture set {0} is disabled until validation is OK")]
    RowDisabled(String),
    #[error("No project is open")]
    ProjectNotOpen,
    #[error("Export failed: {0}")]
    Export(String),
}

pub type Result<T> = std::result::Result<T, ExporterError>;
