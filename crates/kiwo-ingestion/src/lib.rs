//! kiwo-ingestion: Survey file loading (CSV, spreadsheets) and result export.

pub mod error;
pub mod export;
pub mod loader;

pub use error::{IngestionError, Result};
pub use export::{
    export_to_file, read_exported_scores, to_csv_string, write_csv, ExportProjection, ExportedScore,
    DEFAULT_EXPORT_FILE,
};
pub use loader::{load_csv, load_excel, load_table, parse_csv_str, read_csv, read_excel_range};
