//! kiwo-common: Shared plot types, column schema and error taxonomy used across all Kiwo crates.

pub mod error;
pub mod entities;
pub mod schema;
pub mod table;

// Re-export commonly used types
pub use entities::{Dataset, GeoPoint, PlotRecord, RawFeatures};
pub use error::{ComputationError, KiwoError, MissingCell, Result, ValidationError};
pub use schema::FeatureKind;
pub use table::PlotTable;
