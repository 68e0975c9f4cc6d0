//! Ingestion and export error types.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, IngestionError>;

#[derive(Debug, Error)]
pub enum IngestionError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet error: {0}")]
    Excel(#[from] calamine::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported input format '{0}': expected .csv or a spreadsheet")]
    UnsupportedFormat(String),

    #[error("Spreadsheet has no worksheets")]
    EmptyWorkbook,

    #[error("Input has no header row")]
    MissingHeader,

    #[error("Nothing to export: {0}")]
    NothingToExport(String),
}
