//! Weight vector for the Grazing Suitability Score.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use kiwo_common::FeatureKind;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum WeightError {
    #[error("weight '{name}' must be a finite, non-negative number (got {value})")]
    Invalid { name: &'static str, value: f64 },
}

/// The 4-component weight vector W.
/// Expected to sum to 1.0 so that the GSS stays in [0, 1]; the scorer
/// does not enforce this, callers do.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightConfig {
    /// Available biomass (higher is better)
    #[serde(default = "default_biomass")]
    pub biomass: f64,
    /// Shrub cover percentage (lower is better)
    #[serde(default = "default_minor")]
    pub shrub: f64,
    /// Grazing pressure (lower is better)
    #[serde(default = "default_minor")]
    pub grazing: f64,
    /// Total woody plant count (lower is better)
    #[serde(default = "default_minor")]
    pub woody: f64,
}

fn default_biomass() -> f64 { 0.4 }
fn default_minor()   -> f64 { 0.2 }

impl Default for WeightConfig {
    fn default() -> Self {
        Self {
            biomass: default_biomass(),
            shrub:   default_minor(),
            grazing: default_minor(),
            woody:   default_minor(),
        }
    }
}

impl WeightConfig {
    pub fn new(biomass: f64, shrub: f64, grazing: f64, woody: f64) -> Self {
        Self { biomass, shrub, grazing, woody }
    }

    pub fn get(&self, kind: FeatureKind) -> f64 {
        self.as_array()[kind.index()]
    }

    pub fn sum(&self) -> f64 {
        self.as_array().iter().sum()
    }

    /// Whether the weights sum to ~1.0
    pub fn sums_to_one(&self) -> bool {
        (self.sum() - 1.0).abs() < 1e-6
    }

    /// Reject negative or non-finite weights.
    pub fn validate(&self) -> Result<(), WeightError> {
        let named = [
            ("biomass", self.biomass),
            ("shrub", self.shrub),
            ("grazing", self.grazing),
            ("woody", self.woody),
        ];
        for (name, value) in named {
            if !value.is_finite() || value < 0.0 {
                return Err(WeightError::Invalid { name, value });
            }
        }
        Ok(())
    }

    /// Renormalise weights so they sum to 1.0
    pub fn normalise(&mut self) {
        let sum = self.sum();
        if sum > 0.0 {
            self.biomass /= sum;
            self.shrub   /= sum;
            self.grazing /= sum;
            self.woody   /= sum;
        }
    }

    /// Convert to array for iteration, indexed by [`FeatureKind::index`].
    pub fn as_array(&self) -> [f64; 4] {
        [self.biomass, self.shrub, self.grazing, self.woody]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_sum_to_one() {
        let w = WeightConfig::default();
        assert!(w.sums_to_one(), "Default weights must sum to 1.0");
        assert_eq!(w.as_array(), [0.4, 0.2, 0.2, 0.2]);
    }

    #[test]
    fn test_normalise_restores_sum() {
        let mut w = WeightConfig::default();
        w.biomass += 0.10; // deliberately break sum
        assert!(!w.sums_to_one());
        w.normalise();
        assert!(w.sums_to_one());
    }

    #[test]
    fn test_normalise_leaves_all_zero_weights() {
        let mut w = WeightConfig::new(0.0, 0.0, 0.0, 0.0);
        w.normalise();
        assert_eq!(w.sum(), 0.0);
    }

    #[test]
    fn test_validate_rejects_negative() {
        let w = WeightConfig::new(0.6, -0.2, 0.3, 0.3);
        assert!(matches!(w.validate(), Err(WeightError::Invalid { name: "shrub", .. })));
        assert!(WeightConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_config_falls_back_to_defaults() {
        let w: WeightConfig = serde_json::from_str(r#"{"biomass": 1.0}"#).unwrap();
        assert_eq!(w.biomass, 1.0);
        assert_eq!(w.shrub, 0.2);
    }
}
