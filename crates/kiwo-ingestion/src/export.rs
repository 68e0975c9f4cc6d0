//! CSV export of scored plots.

use std::io::{self, Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use kiwo_common::schema::{DIAGNOSIS, GSS, PLOT_NAME};
use kiwo_ranker::{Diagnosis, ScoredDataset};

use crate::error::{IngestionError, Result};

/// File name offered for downloads when the caller does not pick one.
pub const DEFAULT_EXPORT_FILE: &str = "gss_results_filtered.csv";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportProjection {
    /// Every input column, then `GSS` and `Diagnosis`. Score columns already
    /// present in the input are replaced, not repeated.
    #[default]
    Full,
    /// `Plot Name` and `GSS` only.
    Minimal,
}

/// One row of an exported file, as read back.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExportedScore {
    #[serde(rename = "Plot Name")]
    pub plot_name: String,
    #[serde(rename = "GSS")]
    pub gss: f64,
    #[serde(rename = "Diagnosis", default)]
    pub diagnosis: Option<Diagnosis>,
}

/// Write `scored` as CSV. A failed result has nothing to write and is an error.
pub fn write_csv<W: Write>(scored: &ScoredDataset, projection: ExportProjection, writer: W) -> Result<()> {
    if let Some(reason) = scored.failure() {
        return Err(IngestionError::NothingToExport(reason.to_string()));
    }

    let mut out = csv::Writer::from_writer(writer);
    match projection {
        ExportProjection::Full => {
            let carried: Vec<&str> = scored
                .columns
                .iter()
                .map(String::as_str)
                .filter(|c| *c != GSS && *c != DIAGNOSIS)
                .collect();
            let mut header = carried.clone();
            header.extend([GSS, DIAGNOSIS]);
            out.write_record(&header)?;

            for row in scored.rows() {
                let mut cells: Vec<String> = carried
                    .iter()
                    .map(|c| row.record.cell_text(c).unwrap_or_default())
                    .collect();
                cells.push(row.gss().to_string());
                cells.push(row.diagnosis().label().to_string());
                out.write_record(&cells)?;
            }
        }
        ExportProjection::Minimal => {
            out.write_record([PLOT_NAME, GSS])?;
            for row in scored.rows() {
                out.write_record([row.plot_name(), row.gss().to_string().as_str()])?;
            }
        }
    }
    out.flush()?;
    Ok(())
}

pub fn to_csv_string(scored: &ScoredDataset, projection: ExportProjection) -> Result<String> {
    let mut buf = Vec::new();
    write_csv(scored, projection, &mut buf)?;
    String::from_utf8(buf).map_err(|e| IngestionError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
}

/// Write an export file to disk.
pub async fn export_to_file(
    scored: &ScoredDataset,
    projection: ExportProjection,
    path: impl AsRef<Path>,
) -> Result<()> {
    let path = path.as_ref();
    let content = to_csv_string(scored, projection)?;
    tokio::fs::write(path, content).await?;
    info!(rows = scored.len(), ?projection, "Wrote GSS results to {}", path.display());
    Ok(())
}

/// Read back `Plot Name`/`GSS` (and `Diagnosis`, when present) from an export.
pub fn read_exported_scores<R: Read>(reader: R) -> Result<Vec<ExportedScore>> {
    let mut reader = csv::Reader::from_reader(reader);
    let rows = reader.deserialize().collect::<std::result::Result<Vec<ExportedScore>, _>>()?;
    Ok(rows)
}
