//! Typed plot records. A `Dataset` is built once from input and never
//! mutated afterwards; everything the pipeline derives lives elsewhere.

use serde::{Deserialize, Serialize};

use crate::error::{ComputationError, MissingCell, ValidationError};
use crate::schema::{self, FeatureKind, LATITUDE, LONGITUDE, PLOT_NAME};
use crate::table::PlotTable;

// ---------------------------------------------------------------------------
// Location
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

// ---------------------------------------------------------------------------
// Raw features
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawFeatures {
    pub available_biomass: f64,
    pub shrub_percent: f64,
    pub grazing_pressure: f64,
    pub woody_count: f64,
}

impl RawFeatures {
    pub fn get(&self, kind: FeatureKind) -> f64 {
        self.as_array()[kind.index()]
    }

    pub fn as_array(&self) -> [f64; 4] {
        [
            self.available_biomass,
            self.shrub_percent,
            self.grazing_pressure,
            self.woody_count,
        ]
    }
}

// ---------------------------------------------------------------------------
// Plot record
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotRecord {
    /// Unique within a dataset by convention only.
    pub plot_name: String,
    pub features: RawFeatures,
    pub location: Option<GeoPoint>,
    /// Every other input column as raw text, in input order. Includes the
    /// coordinate columns, so a half-filled or unparsable location survives.
    #[serde(default)]
    pub extra: Vec<(String, Option<String>)>,
}

impl PlotRecord {
    pub fn new(plot_name: impl Into<String>, features: RawFeatures) -> Self {
        Self {
            plot_name: plot_name.into(),
            features,
            location: None,
            extra: Vec::new(),
        }
    }

    pub fn with_location(mut self, latitude: f64, longitude: f64) -> Self {
        self.location = Some(GeoPoint { latitude, longitude });
        self
    }

    /// Text for `column` as it should appear in an export.
    /// Returns `None` for null cells and unknown columns.
    pub fn cell_text(&self, column: &str) -> Option<String> {
        match column {
            PLOT_NAME => Some(self.plot_name.clone()),
            LATITUDE | LONGITUDE => match self.extra_cell(column) {
                Some(raw) => raw,
                None if column == LATITUDE => self.location.map(|p| p.latitude.to_string()),
                None => self.location.map(|p| p.longitude.to_string()),
            },
            _ => {
                if let Some(kind) = FeatureKind::ALL.iter().find(|k| k.column() == column) {
                    return Some(self.features.get(*kind).to_string());
                }
                self.extra_cell(column).flatten()
            }
        }
    }

    /// `Some(cell)` when `column` was carried as an extra, even if the cell is null.
    fn extra_cell(&self, column: &str) -> Option<Option<String>> {
        self.extra
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.clone())
    }
}

// ---------------------------------------------------------------------------
// Dataset
// ---------------------------------------------------------------------------

/// Ordered, non-empty collection of plots sharing one schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    columns: Vec<String>,
    records: Vec<PlotRecord>,
}

impl Dataset {
    /// Build a dataset from typed records. NaN features count as missing values.
    pub fn new(records: Vec<PlotRecord>) -> Result<Self, ValidationError> {
        if records.is_empty() {
            return Err(ValidationError::EmptyDataset);
        }

        let holes: Vec<MissingCell> = records
            .iter()
            .enumerate()
            .flat_map(|(row, rec)| {
                FeatureKind::ALL
                    .iter()
                    .filter(move |k| rec.features.get(**k).is_nan())
                    .map(move |k| MissingCell {
                        row,
                        column: k.column().to_string(),
                    })
            })
            .collect();
        if !holes.is_empty() {
            return Err(ValidationError::MissingValues(holes));
        }

        let mut columns: Vec<String> = schema::REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect();
        if records.iter().any(|r| r.location.is_some()) {
            columns.push(LATITUDE.to_string());
            columns.push(LONGITUDE.to_string());
        }
        for (name, _) in records.iter().flat_map(|r| &r.extra) {
            if !columns.contains(name) {
                columns.push(name.clone());
            }
        }

        Ok(Self { columns, records })
    }

    /// Convert a table that already passed [`PlotTable::validate`].
    ///
    /// Parse failures here mean something slipped past validation and are
    /// reported as computation errors.
    pub fn from_validated_table(table: &PlotTable) -> Result<Self, ComputationError> {
        let index_of = |name: &str| table.column_index(name);
        let name_col = index_of(PLOT_NAME);
        let feature_cols: Vec<(FeatureKind, Option<usize>)> =
            FeatureKind::ALL.iter().map(|k| (*k, index_of(k.column()))).collect();
        let lat_col = index_of(LATITUDE);
        let lon_col = index_of(LONGITUDE);

        let mut records = Vec::with_capacity(table.len());
        for row in 0..table.len() {
            let mut values = [0.0f64; 4];
            for (kind, col) in &feature_cols {
                let text = col.and_then(|c| table.cell(row, c)).unwrap_or("");
                values[kind.index()] = parse_feature(row, kind.column(), text)?;
            }

            let location = match (
                lat_col.and_then(|c| parse_optional(table.cell(row, c))),
                lon_col.and_then(|c| parse_optional(table.cell(row, c))),
            ) {
                (Some(latitude), Some(longitude)) => Some(GeoPoint { latitude, longitude }),
                _ => None,
            };

            let extra = table
                .columns()
                .iter()
                .enumerate()
                .filter(|(_, name)| !is_typed_column(name))
                .map(|(c, name)| (name.clone(), table.cell(row, c).map(str::to_string)))
                .collect();

            records.push(PlotRecord {
                plot_name: name_col
                    .and_then(|c| table.cell(row, c))
                    .unwrap_or_default()
                    .trim()
                    .to_string(),
                features: RawFeatures {
                    available_biomass: values[0],
                    shrub_percent: values[1],
                    grazing_pressure: values[2],
                    woody_count: values[3],
                },
                location,
                extra,
            });
        }

        Ok(Self {
            columns: table.columns().to_vec(),
            records,
        })
    }

    /// Column names in input order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[PlotRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false for a constructed dataset; kept for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All values of one feature, in record order.
    pub fn feature_column(&self, kind: FeatureKind) -> Vec<f64> {
        self.records.iter().map(|r| r.features.get(kind)).collect()
    }
}

fn is_typed_column(name: &str) -> bool {
    schema::REQUIRED_COLUMNS.contains(&name)
}

fn parse_feature(row: usize, column: &str, text: &str) -> Result<f64, ComputationError> {
    let value: f64 = text.trim().parse().map_err(|_| ComputationError::NonNumeric {
        row,
        column: column.to_string(),
        value: text.to_string(),
    })?;
    if !value.is_finite() {
        return Err(ComputationError::NonFinite {
            row,
            column: column.to_string(),
        });
    }
    Ok(value)
}

fn parse_optional(text: Option<&str>) -> Option<f64> {
    text.and_then(|t| t.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}
