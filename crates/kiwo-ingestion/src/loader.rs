//! Survey input loader for CSV and spreadsheet files.
//!
//! Reads an uploaded survey file into a [`PlotTable`]. The loader only
//! shapes the data; required columns and null checks are left to
//! [`PlotTable::validate`] so the pipeline reports them uniformly.

use std::io::Read;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader};
use tracing::{debug, info};

use kiwo_common::PlotTable;

use crate::error::{IngestionError, Result};

const UTF8_BOM: char = '\u{feff}';

/// Parse CSV from any reader. Ragged rows are accepted: short rows are
/// padded with nulls, long rows truncated.
pub fn read_csv<R: Read>(reader: R) -> Result<PlotTable> {
    // Header names are trimmed by `PlotTable::new`.
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, h)| if i == 0 { h.trim_start_matches(UTF8_BOM).to_string() } else { h.to_string() })
        .collect();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(IngestionError::MissingHeader);
    }

    let mut table = PlotTable::new(headers);
    for result in reader.records() {
        let record = result?;
        // Fully blank lines carry no plot.
        if record.iter().all(|c| c.trim().is_empty()) {
            continue;
        }
        table.push_row(record.iter().map(|c| Some(c.to_string())));
    }

    debug!(rows = table.len(), columns = table.columns().len(), "Parsed CSV table");
    Ok(table)
}

pub fn parse_csv_str(content: &str) -> Result<PlotTable> {
    read_csv(content.as_bytes())
}

/// Load a survey file, dispatching on its extension.
pub async fn load_table(path: impl AsRef<Path>) -> Result<PlotTable> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "csv" => load_csv(path).await,
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => load_excel(path).await,
        other => Err(IngestionError::UnsupportedFormat(other.to_string())),
    }
}

/// Load a CSV file from disk.
pub async fn load_csv(path: impl AsRef<Path>) -> Result<PlotTable> {
    let path = path.as_ref();
    debug!("Loading plot table from {:?}", path);

    let content = tokio::fs::read_to_string(path).await?;
    let table = parse_csv_str(&content)?;

    info!(rows = table.len(), "Loaded plot table from {}", path.display());
    Ok(table)
}

/// Build a table from a worksheet range. The first row is the header;
/// empty and error cells are nulls, fully blank rows are skipped.
pub fn read_excel_range(range: &Range<Data>) -> Result<PlotTable> {
    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .map(|row| row.iter().map(|c| excel_text(c).unwrap_or_default()).collect())
        .unwrap_or_default();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(IngestionError::MissingHeader);
    }

    let mut table = PlotTable::new(headers);
    for row in rows {
        let cells: Vec<Option<String>> = row.iter().map(excel_text).collect();
        if cells.iter().flatten().all(|c| c.trim().is_empty()) {
            continue;
        }
        table.push_row(cells);
    }

    debug!(rows = table.len(), columns = table.columns().len(), "Parsed worksheet");
    Ok(table)
}

fn excel_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        other => Some(other.to_string()),
    }
}

/// Load the first worksheet of a spreadsheet file.
pub async fn load_excel(path: impl AsRef<Path>) -> Result<PlotTable> {
    let path = path.as_ref().to_path_buf();
    debug!("Loading plot table from {:?}", path);

    let source = path.clone();
    let range = tokio::task::spawn_blocking(move || -> Result<Range<Data>> {
        let mut workbook = open_workbook_auto(&source)?;
        let range = workbook.worksheet_range_at(0).ok_or(IngestionError::EmptyWorkbook)??;
        Ok(range)
    })
    .await
    .map_err(|e| IngestionError::Io(std::io::Error::other(e)))??;
    let table = read_excel_range(&range)?;

    info!(rows = table.len(), "Loaded plot table from {}", path.display());
    Ok(table)
}
