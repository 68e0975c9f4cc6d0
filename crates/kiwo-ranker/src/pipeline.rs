//! Scoring pipeline orchestration.
//!
//! validate → build typed dataset → normalise → score → diagnose.
//! Validation problems are returned to the caller untouched. Anything that
//! goes wrong after validation is logged with the run id and turned into an
//! empty, failed [`ScoredDataset`]; a partial table is never returned.

use tracing::{error, info, warn};
use uuid::Uuid;

use kiwo_common::{ComputationError, Dataset, PlotTable, ValidationError};

use crate::normalise::normalise_dataset;
use crate::result::{ScoredDataset, ScoredPlot};
use crate::scorer::{score_record, ScoreResult};
use crate::weights::WeightConfig;

/// Score a typed dataset. Results have the same length and order as the
/// dataset's records.
pub fn score_dataset(dataset: &Dataset, weights: &WeightConfig) -> Result<Vec<ScoreResult>, ComputationError> {
    normalise_dataset(dataset)
        .into_iter()
        .zip(dataset.records())
        .enumerate()
        .map(|(row, (normed, record))| {
            let result = score_record(normed, weights);
            if result.gss.is_finite() {
                Ok(result)
            } else {
                Err(ComputationError::NonFiniteScore {
                    row,
                    plot: record.plot_name.clone(),
                })
            }
        })
        .collect()
}

/// Validate and score an input table.
pub fn normalize_and_score(table: &PlotTable, weights: &WeightConfig) -> Result<ScoredDataset, ValidationError> {
    let run_id = Uuid::new_v4();
    info!(%run_id, rows = table.len(), columns = table.columns().len(), "Starting GSS scoring");

    if let Err(e) = table.validate() {
        warn!(%run_id, error = %e, "Input table rejected");
        return Err(e);
    }

    let outcome = Dataset::from_validated_table(table)
        .and_then(|dataset| score_dataset(&dataset, weights).map(|scores| (dataset, scores)));

    Ok(finish(run_id, table.columns().to_vec(), weights, outcome))
}

/// [`normalize_and_score`] with validation and computation failures folded
/// into one error. The failed result is still logged with its run id.
pub fn score_table(table: &PlotTable, weights: &WeightConfig) -> kiwo_common::Result<ScoredDataset> {
    normalize_and_score(table, weights)?.into_result()
}

/// Score a dataset that was built directly from typed records.
pub fn score_typed_dataset(dataset: &Dataset, weights: &WeightConfig) -> ScoredDataset {
    let run_id = Uuid::new_v4();
    info!(%run_id, rows = dataset.len(), "Starting GSS scoring");
    let outcome = score_dataset(dataset, weights).map(|scores| (dataset.clone(), scores));
    finish(run_id, dataset.columns().to_vec(), weights, outcome)
}

fn finish(
    run_id: Uuid,
    columns: Vec<String>,
    weights: &WeightConfig,
    outcome: Result<(Dataset, Vec<ScoreResult>), ComputationError>,
) -> ScoredDataset {
    if !weights.sums_to_one() {
        warn!(%run_id, sum = weights.sum(), "Weights do not sum to 1.0; GSS may leave [0, 1]");
    }

    match outcome {
        Ok((dataset, scores)) => {
            let rows: Vec<ScoredPlot> = dataset
                .records()
                .iter()
                .cloned()
                .zip(scores)
                .map(|(record, score)| ScoredPlot { record, score })
                .collect();
            info!(%run_id, scored = rows.len(), "GSS scoring complete");
            ScoredDataset::completed(run_id, columns, *weights, rows)
        }
        Err(e) => {
            error!(
                %run_id,
                error = %e,
                detail = ?e,
                ?weights,
                "GSS computation failed; returning empty result"
            );
            ScoredDataset::failed(run_id, columns, *weights, e)
        }
    }
}
