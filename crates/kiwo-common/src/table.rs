//! Untyped tabular input as handed over by a loader.
//!
//! A `PlotTable` carries whatever the upload contained: any column order,
//! extra columns, null cells. `validate` is the gate every table passes
//! through before it is converted into a typed [`Dataset`](crate::entities::Dataset).

use serde::{Deserialize, Serialize};

use crate::error::{MissingCell, ValidationError};
use crate::schema::{is_missing_marker, REQUIRED_COLUMNS};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlotTable {
    columns: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl PlotTable {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(|c| c.into().trim().to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row. Short rows are padded with nulls, long rows truncated
    /// to the header width. Missing-value markers are stored as `None`.
    pub fn push_row<I>(&mut self, cells: I)
    where
        I: IntoIterator<Item = Option<String>>,
    {
        let width = self.columns.len();
        let mut row: Vec<Option<String>> = cells
            .into_iter()
            .take(width)
            .map(|c| c.filter(|s| !is_missing_marker(s)))
            .collect();
        row.resize(width, None);
        self.rows.push(row);
    }

    /// Builder-style variant of [`push_row`](Self::push_row) for plain strings.
    pub fn with_row<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push_row(cells.into_iter().map(|c| Some(c.into())));
        self
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Option<String>>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows.get(row)?.get(column)?.as_deref()
    }

    /// Check the table can be scored: non-empty, every required column
    /// present, no nulls in those columns. Stops at the first failing check.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.is_empty() {
            return Err(ValidationError::EmptyDataset);
        }

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|c| !self.has_column(c))
            .map(|c| c.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ValidationError::MissingColumns(missing));
        }

        let mut holes = Vec::new();
        for (row_idx, row) in self.rows.iter().enumerate() {
            for name in REQUIRED_COLUMNS {
                // Presence was checked above.
                let Some(col) = self.column_index(name) else { continue };
                if row[col].is_none() {
                    holes.push(MissingCell {
                        row: row_idx,
                        column: name.to_string(),
                    });
                }
            }
        }
        if !holes.is_empty() {
            return Err(ValidationError::MissingValues(holes));
        }

        Ok(())
    }
}
