use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A null cell inside a required column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingCell {
    /// Zero-based data row index (header excluded).
    pub row: usize,
    pub column: String,
}

impl fmt::Display for MissingCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {} column '{}'", self.row, self.column)
    }
}

/// Input shape problems detected before any computation runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("dataset is empty: at least one plot row is required")]
    EmptyDataset,

    #[error("missing required columns: {}", quoted(.0))]
    MissingColumns(Vec<String>),

    #[error("missing values in required columns: {}", join_cells(.0))]
    MissingValues(Vec<MissingCell>),
}

impl ValidationError {
    /// Columns named by this error, if it is about absent columns.
    pub fn missing_columns(&self) -> &[String] {
        match self {
            ValidationError::MissingColumns(cols) => cols,
            _ => &[],
        }
    }
}

/// Failures inside normalisation or scoring. The orchestrator turns these
/// into an empty, failed result instead of letting them escape.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum ComputationError {
    #[error("non-numeric value {value:?} at row {row} column '{column}'")]
    NonNumeric {
        row: usize,
        column: String,
        value: String,
    },

    #[error("non-finite value at row {row} column '{column}'")]
    NonFinite { row: usize, column: String },

    #[error("non-finite GSS computed for row {row} (plot '{plot}')")]
    NonFiniteScore { row: usize, plot: String },
}

/// Either kind of scoring failure, for callers that treat them alike.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum KiwoError {
    #[error("Input rejected: {0}")]
    Validation(#[from] ValidationError),

    #[error("GSS calculation failed: {0}")]
    Computation(#[from] ComputationError),
}

pub type Result<T> = std::result::Result<T, KiwoError>;

fn quoted(names: &[String]) -> String {
    names
        .iter()
        .map(|n| format!("'{n}'"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn join_cells(cells: &[MissingCell]) -> String {
    cells
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
