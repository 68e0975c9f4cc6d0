//! Configuration loading for Kiwo.
//! Reads kiwo.toml from the current directory or the path in KIWO_CONFIG.

use serde::{Deserialize, Serialize};
use std::path::Path;

use kiwo_advisor::Language;
use kiwo_ingestion::{ExportProjection, DEFAULT_EXPORT_FILE};
use kiwo_ranker::WeightConfig;

pub const DEFAULT_CONFIG_FILE: &str = "kiwo.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// GSS weights: biomass, shrub, grazing, woody.
    #[serde(default)]
    pub scoring: WeightConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub advice: AdviceConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub projection: ExportProjection,
    #[serde(default = "default_file_name")]
    pub file_name: String,
    /// Plots listed in the best/worst summaries.
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

fn default_file_name() -> String { DEFAULT_EXPORT_FILE.to_string() }
fn default_top_n()     -> usize  { 5 }

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            projection: ExportProjection::default(),
            file_name: default_file_name(),
            top_n: default_top_n(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdviceConfig {
    #[serde(default)]
    pub language: Language,
}


impl Config {
    /// Load configuration from `path`, or from KIWO_CONFIG / kiwo.toml.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => std::env::var("KIWO_CONFIG")
                .unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string())
                .into(),
        };

        if !path.exists() {
            anyhow::bail!(
                "Config file not found: {}\n\
                 Create kiwo.toml or point KIWO_CONFIG at one.",
                path.display()
            );
        }

        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject weights the scorer cannot sensibly use. A sum other than 1.0
    /// is allowed; the pipeline warns about it.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.scoring.validate()?;
        Ok(())
    }
}
