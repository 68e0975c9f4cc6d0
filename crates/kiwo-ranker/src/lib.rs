//! kiwo-ranker: Grazing Suitability Score engine.
//! Normalise → score → diagnose, plus the orchestrator that ties them together.

pub mod diagnosis;
pub mod normalise;
pub mod pipeline;
pub mod result;
pub mod scorer;
pub mod weights;

pub use diagnosis::{diagnose, Diagnosis};
pub use normalise::{NormalizedFeatures, CONSTANT_COLUMN_FALLBACK};
pub use pipeline::{normalize_and_score, score_dataset, score_table, score_typed_dataset};
pub use result::{ScoredDataset, ScoredPlot};
pub use scorer::{compute_gss, ScoreResult};
pub use weights::WeightConfig;
