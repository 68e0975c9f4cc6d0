//! Rule-based plot diagnosis.
//!
//! Rules are an ordered table of (predicate, diagnosis) pairs; the first
//! predicate that holds decides the label. The three "cause" rules for low
//! scores come first, in priority order shrub > grazing > woody.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::normalise::NormalizedFeatures;

/// GSS below this is a low-scoring plot.
pub const LOW_GSS: f64 = 0.3;
/// GSS below this (and at least `LOW_GSS`) needs intervention.
pub const POOR_GSS: f64 = 0.5;
/// GSS at or above this is highly suitable.
pub const HIGH_GSS: f64 = 0.75;
/// A normalised pressure feature above this is blamed for a low score.
pub const CAUSE_THRESHOLD: f64 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Diagnosis {
    #[serde(rename = "Too much shrub cover")]
    TooMuchShrubCover,
    #[serde(rename = "Excessive grazing pressure")]
    ExcessiveGrazingPressure,
    #[serde(rename = "High woody plant density")]
    HighWoodyPlantDensity,
    #[serde(rename = "Very low biomass")]
    VeryLowBiomass,
    #[serde(rename = "Poor condition, needs intervention")]
    PoorCondition,
    #[serde(rename = "Moderately suitable")]
    ModeratelySuitable,
    #[serde(rename = "Highly suitable")]
    HighlySuitable,
}

impl Diagnosis {
    /// Every label, in rule order.
    pub const ALL: [Diagnosis; 7] = [
        Diagnosis::TooMuchShrubCover,
        Diagnosis::ExcessiveGrazingPressure,
        Diagnosis::HighWoodyPlantDensity,
        Diagnosis::VeryLowBiomass,
        Diagnosis::PoorCondition,
        Diagnosis::ModeratelySuitable,
        Diagnosis::HighlySuitable,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Diagnosis::TooMuchShrubCover => "Too much shrub cover",
            Diagnosis::ExcessiveGrazingPressure => "Excessive grazing pressure",
            Diagnosis::HighWoodyPlantDensity => "High woody plant density",
            Diagnosis::VeryLowBiomass => "Very low biomass",
            Diagnosis::PoorCondition => "Poor condition, needs intervention",
            Diagnosis::ModeratelySuitable => "Moderately suitable",
            Diagnosis::HighlySuitable => "Highly suitable",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.label() == label.trim())
    }
}

impl fmt::Display for Diagnosis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Inputs a diagnosis depends on. Pressure values are the normalised
/// (pre-inversion) ones.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiagnosisInputs {
    pub gss: f64,
    pub shrub: f64,
    pub grazing: f64,
    pub woody: f64,
}

pub struct DiagnosisRule {
    pub name: &'static str,
    pub applies: fn(&DiagnosisInputs) -> bool,
    pub diagnosis: Diagnosis,
}

pub static RULES: [DiagnosisRule; 7] = [
    DiagnosisRule {
        name: "low_gss_shrub",
        applies: |i| i.gss < LOW_GSS && i.shrub > CAUSE_THRESHOLD,
        diagnosis: Diagnosis::TooMuchShrubCover,
    },
    DiagnosisRule {
        name: "low_gss_grazing",
        applies: |i| i.gss < LOW_GSS && i.grazing > CAUSE_THRESHOLD,
        diagnosis: Diagnosis::ExcessiveGrazingPressure,
    },
    DiagnosisRule {
        name: "low_gss_woody",
        applies: |i| i.gss < LOW_GSS && i.woody > CAUSE_THRESHOLD,
        diagnosis: Diagnosis::HighWoodyPlantDensity,
    },
    DiagnosisRule {
        name: "low_gss",
        applies: |i| i.gss < LOW_GSS,
        diagnosis: Diagnosis::VeryLowBiomass,
    },
    DiagnosisRule {
        name: "poor",
        applies: |i| (LOW_GSS..POOR_GSS).contains(&i.gss),
        diagnosis: Diagnosis::PoorCondition,
    },
    DiagnosisRule {
        name: "moderate",
        applies: |i| (POOR_GSS..HIGH_GSS).contains(&i.gss),
        diagnosis: Diagnosis::ModeratelySuitable,
    },
    DiagnosisRule {
        name: "high",
        applies: |i| i.gss >= HIGH_GSS,
        diagnosis: Diagnosis::HighlySuitable,
    },
];

/// First rule whose predicate holds. `None` only for a NaN GSS.
pub fn matching_rule(inputs: &DiagnosisInputs) -> Option<&'static DiagnosisRule> {
    RULES.iter().find(|rule| (rule.applies)(inputs))
}

/// Diagnose a plot from its GSS and normalised pressure features.
///
/// `gss` is expected to be finite. A NaN score matches no bracket and is
/// reported as `VeryLowBiomass`, so an unscorable plot is never presented
/// as suitable.
pub fn diagnose(gss: f64, normalized_shrub: f64, normalized_grazing: f64, normalized_woody: f64) -> Diagnosis {
    let inputs = DiagnosisInputs {
        gss,
        shrub: normalized_shrub,
        grazing: normalized_grazing,
        woody: normalized_woody,
    };
    matching_rule(&inputs)
        .map(|rule| rule.diagnosis)
        .unwrap_or(Diagnosis::VeryLowBiomass)
}

pub fn diagnose_normalized(gss: f64, normed: &NormalizedFeatures) -> Diagnosis {
    diagnose(gss, normed.shrub, normed.grazing, normed.woody)
}
