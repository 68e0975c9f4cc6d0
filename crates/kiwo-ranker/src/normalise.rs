//! Feature normalisation.
//! Global min-max scaling: every feature column is rescaled to [0, 1]
//! using the min and max observed across the whole dataset.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use kiwo_common::{Dataset, FeatureKind};

/// Value assigned to every record when a feature column is constant
/// (min == max). Matches what a standard min-max scaler yields for a
/// zero-width range.
pub const CONSTANT_COLUMN_FALLBACK: f64 = 0.0;

/// Observed range of one feature column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureRange {
    pub min: f64,
    pub max: f64,
}

impl FeatureRange {
    /// Range of `values`; `None` for an empty slice.
    pub fn of(values: &[f64]) -> Option<Self> {
        let first = *values.first()?;
        Some(values.iter().skip(1).fold(
            Self { min: first, max: first },
            |acc, &v| Self { min: acc.min.min(v), max: acc.max.max(v) },
        ))
    }

    pub fn is_degenerate(&self) -> bool {
        self.max == self.min
    }

    pub fn scale(&self, value: f64) -> f64 {
        minmax_normalise(value, self.min, self.max)
    }
}

/// Min-max normalisation within a given range [min_val, max_val].
/// Only an exactly zero-width range returns [`CONSTANT_COLUMN_FALLBACK`].
pub fn minmax_normalise(value: f64, min_val: f64, max_val: f64) -> f64 {
    if max_val == min_val {
        return CONSTANT_COLUMN_FALLBACK;
    }
    let span = max_val - min_val;
    let scaled = if span.is_finite() {
        (value - min_val) / span
    } else {
        // Width above f64::MAX: halve everything first.
        (value / 2.0 - min_val / 2.0) / (max_val / 2.0 - min_val / 2.0)
    };
    scaled.clamp(0.0, 1.0)
}

/// Normalise a whole column. Returns values in the same order as input.
pub fn minmax_normalise_column(values: &[f64]) -> Vec<f64> {
    match FeatureRange::of(values) {
        Some(range) => values.iter().map(|&v| range.scale(v)).collect(),
        None => vec![],
    }
}

/// Per-record normalised features, all in [0, 1] (pre-inversion: a high
/// `shrub` value still means a lot of shrub cover).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedFeatures {
    pub biomass: f64,
    pub shrub: f64,
    pub grazing: f64,
    pub woody: f64,
}

impl NormalizedFeatures {
    pub fn from_array(values: [f64; 4]) -> Self {
        Self {
            biomass: values[0],
            shrub: values[1],
            grazing: values[2],
            woody: values[3],
        }
    }

    pub fn get(&self, kind: FeatureKind) -> f64 {
        self.as_array()[kind.index()]
    }

    pub fn as_array(&self) -> [f64; 4] {
        [self.biomass, self.shrub, self.grazing, self.woody]
    }
}

/// Normalise every feature of every record against the dataset-wide range.
pub fn normalise_dataset(dataset: &Dataset) -> Vec<NormalizedFeatures> {
    let mut rows = vec![[0.0f64; 4]; dataset.len()];

    for kind in FeatureKind::ALL {
        let column = dataset.feature_column(kind);
        let Some(range) = FeatureRange::of(&column) else { continue };

        if range.is_degenerate() {
            warn!(
                column = kind.column(),
                value = range.min,
                fallback = CONSTANT_COLUMN_FALLBACK,
                "Constant feature column; using fallback normalised value"
            );
        } else {
            debug!(column = kind.column(), min = range.min, max = range.max, "Feature range");
        }

        for (row, value) in rows.iter_mut().zip(column) {
            row[kind.index()] = range.scale(value);
        }
    }

    rows.into_iter().map(NormalizedFeatures::from_array).collect()
}
