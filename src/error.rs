use std::path::PathBuf;
use thiserror::Error;

pub type MapperResult<T> = Result<T, MapperError>;

#[derive(Error, Debug)]
pub enum MapperError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Input workbook not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Workbook format error: {0}")]
    Format(String),

    #[error("Sheet '{sheet}' not found (available: {})", .available.join(", "))]
    SheetNotFound {
        sheet: String,
        available: Vec<String>,
    },

    #[error("Column '{column}' not found in sheet '{sheet}'")]
    ColumnNotFound { column: String, sheet: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Excel export error: {0}")]
    Export(String),
}
