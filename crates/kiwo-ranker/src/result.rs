//! Pipeline output: the input plots augmented with GSS and diagnosis.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use kiwo_common::{ComputationError, PlotRecord};

use crate::diagnosis::Diagnosis;
use crate::scorer::ScoreResult;
use crate::weights::WeightConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredPlot {
    pub record: PlotRecord,
    pub score: ScoreResult,
}

impl ScoredPlot {
    pub fn plot_name(&self) -> &str {
        &self.record.plot_name
    }

    pub fn gss(&self) -> f64 {
        self.score.gss
    }

    pub fn diagnosis(&self) -> Diagnosis {
        self.score.diagnosis
    }
}

/// Scored plots in input order, or an empty failed result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredDataset {
    pub run_id: Uuid,
    /// Input column order, used by full exports.
    pub columns: Vec<String>,
    pub weights: WeightConfig,
    rows: Vec<ScoredPlot>,
    failure: Option<ComputationError>,
}

impl ScoredDataset {
    pub(crate) fn completed(
        run_id: Uuid,
        columns: Vec<String>,
        weights: WeightConfig,
        rows: Vec<ScoredPlot>,
    ) -> Self {
        Self { run_id, columns, weights, rows, failure: None }
    }

    pub(crate) fn failed(
        run_id: Uuid,
        columns: Vec<String>,
        weights: WeightConfig,
        reason: ComputationError,
    ) -> Self {
        Self { run_id, columns, weights, rows: Vec::new(), failure: Some(reason) }
    }

    pub fn rows(&self) -> &[ScoredPlot] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Why scoring failed, if it did. A failed result never carries rows.
    pub fn failure(&self) -> Option<&ComputationError> {
        self.failure.as_ref()
    }

    pub fn is_failed(&self) -> bool {
        self.failure.is_some()
    }

    /// The result itself, or the failure it carries.
    pub fn into_result(self) -> kiwo_common::Result<Self> {
        match self.failure {
            Some(reason) => Err(reason.into()),
            None => Ok(self),
        }
    }

    pub fn gss_values(&self) -> Vec<f64> {
        self.rows.iter().map(ScoredPlot::gss).collect()
    }

    /// First plot with this name. Names are not enforced unique.
    pub fn find_plot(&self, name: &str) -> Option<&ScoredPlot> {
        self.rows.iter().find(|r| r.plot_name() == name)
    }

    /// Best `n` plots by GSS, highest first. Ties keep input order.
    pub fn top(&self, n: usize) -> Vec<&ScoredPlot> {
        let mut sorted: Vec<&ScoredPlot> = self.rows.iter().collect();
        sorted.sort_by(|a, b| b.gss().total_cmp(&a.gss()));
        sorted.truncate(n);
        sorted
    }

    /// Worst `n` plots by GSS, lowest first. Ties keep input order.
    pub fn bottom(&self, n: usize) -> Vec<&ScoredPlot> {
        let mut sorted: Vec<&ScoredPlot> = self.rows.iter().collect();
        sorted.sort_by(|a, b| a.gss().total_cmp(&b.gss()));
        sorted.truncate(n);
        sorted
    }

    /// Plot count per diagnosis, in rule order, zero counts included.
    pub fn diagnosis_counts(&self) -> Vec<(Diagnosis, usize)> {
        Diagnosis::ALL
            .iter()
            .map(|d| (*d, self.rows.iter().filter(|r| r.diagnosis() == *d).count()))
            .collect()
    }
}
