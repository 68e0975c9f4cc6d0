//! Composite Grazing Suitability Score computation.
//!
//! GSS = Σ(w_i × t_i) where t_i is the transformed score of feature i:
//! biomass keeps its normalised value, the three pressure features are
//! inverted (1 − n) because less of them is better for grazing.

use serde::{Deserialize, Serialize};

use crate::diagnosis::{diagnose_normalized, Diagnosis};
use crate::normalise::NormalizedFeatures;
use crate::weights::WeightConfig;

/// Transformed component scores (all in [0, 1], higher is better).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformedScores {
    pub biomass_score: f64,
    pub shrub_score: f64,
    pub grazing_score: f64,
    pub woody_score: f64,
}

impl TransformedScores {
    pub fn from_normalized(normed: &NormalizedFeatures) -> Self {
        Self {
            biomass_score: normed.biomass,
            shrub_score: 1.0 - normed.shrub,
            grazing_score: 1.0 - normed.grazing,
            woody_score: 1.0 - normed.woody,
        }
    }

    pub fn as_array(&self) -> [f64; 4] {
        [
            self.biomass_score,
            self.shrub_score,
            self.grazing_score,
            self.woody_score,
        ]
    }
}

/// Weighted sum of the transformed scores.
///
/// Precondition: weights are non-negative and sum to 1.0; only then is the
/// result guaranteed to lie in [0, 1]. Nothing is clamped here.
pub fn compute_gss(normed: &NormalizedFeatures, weights: &WeightConfig) -> f64 {
    TransformedScores::from_normalized(normed)
        .as_array()
        .iter()
        .zip(weights.as_array().iter())
        .map(|(t, w)| t * w)
        .sum()
}

/// Score and diagnosis for one record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub normalized: NormalizedFeatures,
    pub gss: f64,
    pub diagnosis: Diagnosis,
}

/// Score one record's normalised features and diagnose it.
pub fn score_record(normed: NormalizedFeatures, weights: &WeightConfig) -> ScoreResult {
    let gss = compute_gss(&normed, weights);
    ScoreResult {
        normalized: normed,
        gss,
        diagnosis: diagnose_normalized(gss, &normed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normed(b: f64, s: f64, g: f64, w: f64) -> NormalizedFeatures {
        NormalizedFeatures::from_array([b, s, g, w])
    }

    #[test]
    fn test_pressure_features_are_inverted() {
        let t = TransformedScores::from_normalized(&normed(0.8, 0.25, 1.0, 0.0));
        assert_eq!(t.as_array(), [0.8, 0.75, 0.0, 1.0]);
    }

    #[test]
    fn test_default_weights_best_and_worst() {
        let w = WeightConfig::default();
        assert!((compute_gss(&normed(1.0, 0.0, 0.0, 0.0), &w) - 1.0).abs() < 1e-12);
        assert!(compute_gss(&normed(0.0, 1.0, 1.0, 1.0), &w).abs() < 1e-12);
    }

    #[test]
    fn test_biomass_only_weights() {
        let w = WeightConfig::new(1.0, 0.0, 0.0, 0.0);
        assert_eq!(compute_gss(&normed(0.0, 0.3, 0.9, 0.1), &w), 0.0);
        assert_eq!(compute_gss(&normed(1.0, 0.3, 0.9, 0.1), &w), 1.0);
    }

    #[test]
    fn test_gss_in_unit_interval_for_normalised_weights() {
        let grid = [0.0, 0.1, 0.35, 0.5, 0.72, 0.99, 1.0];
        let weights = [
            WeightConfig::default(),
            WeightConfig::new(0.25, 0.25, 0.25, 0.25),
            WeightConfig::new(0.0, 0.0, 0.0, 1.0),
            WeightConfig::new(0.7, 0.1, 0.15, 0.05),
        ];
        for w in &weights {
            for &b in &grid {
                for &s in &grid {
                    for &g in &grid {
                        let gss = compute_gss(&normed(b, s, g, 1.0 - b), w);
                        assert!(
                            (-1e-12..=1.0 + 1e-12).contains(&gss),
                            "GSS {gss} out of range for {w:?}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_weights_not_summing_to_one_are_not_corrected() {
        let w = WeightConfig::new(1.0, 1.0, 0.0, 0.0);
        assert_eq!(compute_gss(&normed(1.0, 0.0, 0.0, 0.0), &w), 2.0);
    }

    #[test]
    fn test_score_record_attaches_diagnosis() {
        let r = score_record(normed(1.0, 0.0, 0.0, 0.0), &WeightConfig::default());
        assert_eq!(r.diagnosis, Diagnosis::HighlySuitable);
        assert_eq!(r.normalized.shrub, 0.0);
    }
}
