//! Column schema for plot survey tables.

use serde::{Deserialize, Serialize};

pub const PLOT_NAME: &str = "Plot Name";
pub const AVAILABLE_BIOMASS: &str = "available_biomass";
pub const SHRUB_PERCENT: &str = "Shrub %";
pub const GRAZING_PRESSURE: &str = "grazing_pressure";
pub const WOODY_COUNT: &str = "total woody count";
pub const LATITUDE: &str = "latitude";
pub const LONGITUDE: &str = "longitude";

/// Output columns appended by the scoring pipeline.
pub const GSS: &str = "GSS";
pub const DIAGNOSIS: &str = "Diagnosis";

/// Every column a table must carry before it can be scored, in schema order.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    PLOT_NAME,
    AVAILABLE_BIOMASS,
    SHRUB_PERCENT,
    GRAZING_PRESSURE,
    WOODY_COUNT,
];

/// Cell texts read as null, after trimming.
const MISSING_MARKERS: [&str; 8] = ["", "NA", "N/A", "NaN", "nan", "null", "NULL", "None"];

pub fn is_missing_marker(cell: &str) -> bool {
    MISSING_MARKERS.contains(&cell.trim())
}

/// The four raw measurements that feed the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKind {
    Biomass,
    Shrub,
    Grazing,
    Woody,
}

impl FeatureKind {
    pub const ALL: [FeatureKind; 4] = [
        FeatureKind::Biomass,
        FeatureKind::Shrub,
        FeatureKind::Grazing,
        FeatureKind::Woody,
    ];

    /// Header text of the input column holding this feature.
    pub fn column(self) -> &'static str {
        match self {
            FeatureKind::Biomass => AVAILABLE_BIOMASS,
            FeatureKind::Shrub => SHRUB_PERCENT,
            FeatureKind::Grazing => GRAZING_PRESSURE,
            FeatureKind::Woody => WOODY_COUNT,
        }
    }

    /// Position inside a `[f64; 4]` feature array.
    pub fn index(self) -> usize {
        match self {
            FeatureKind::Biomass => 0,
            FeatureKind::Shrub => 1,
            FeatureKind::Grazing => 2,
            FeatureKind::Woody => 3,
        }
    }

    /// Whether a larger raw value makes a plot more suitable for grazing.
    pub fn higher_is_better(self) -> bool {
        matches!(self, FeatureKind::Biomass)
    }
}
