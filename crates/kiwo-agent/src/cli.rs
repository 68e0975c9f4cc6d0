//! Command-line interface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use kiwo_advisor::Language;
use kiwo_ranker::WeightConfig;

#[derive(Debug, Parser)]
#[command(name = "kiwo", version, about = "Grazing Suitability Score calculator")]
pub struct Cli {
    /// Path to kiwo.toml
    #[arg(long, global = true, env = "KIWO_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Score every plot in a survey CSV and export the results
    Score(ScoreArgs),
    /// Print the grazing advice for a single GSS value
    Advise(AdviseArgs),
}

#[derive(Debug, Args)]
pub struct ScoreArgs {
    /// Survey file (.csv)
    pub input: PathBuf,

    /// Where to write results (defaults to the configured file name)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Export only Plot Name and GSS
    #[arg(long)]
    pub minimal: bool,

    /// Skip writing the export file
    #[arg(long, conflicts_with_all = ["output", "minimal"])]
    pub no_export: bool,

    /// Weights as biomass,shrub,grazing,woody (e.g. 0.4,0.2,0.2,0.2)
    #[arg(long, value_parser = parse_weights)]
    pub weights: Option<WeightConfig>,

    /// Advice language: english|en|hausa|ha
    #[arg(short, long)]
    pub language: Option<Language>,

    /// Plot to give advice for (defaults to the first plot)
    #[arg(long)]
    pub plot: Option<String>,

    /// Number of best/worst plots to list
    #[arg(long)]
    pub top: Option<usize>,

    /// Print the scored dataset as JSON instead of a summary
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct AdviseArgs {
    /// Grazing Suitability Score
    #[arg(long)]
    pub gss: f64,

    #[arg(short, long)]
    pub language: Option<Language>,
}

pub fn parse_weights(s: &str) -> Result<WeightConfig, String> {
    let parts: Vec<f64> = s
        .split(',')
        .map(|p| p.trim().parse::<f64>().map_err(|e| format!("'{}': {e}", p.trim())))
        .collect::<Result<_, _>>()?;

    let &[biomass, shrub, grazing, woody] = parts.as_slice() else {
        return Err(format!("expected 4 comma-separated weights, got {}", parts.len()));
    };

    let weights = WeightConfig::new(biomass, shrub, grazing, woody);
    weights.validate().map_err(|e| e.to_string())?;
    Ok(weights)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_weights() {
        assert_eq!(parse_weights("1, 0, 0, 0"), Ok(WeightConfig::new(1.0, 0.0, 0.0, 0.0)));
        assert!(parse_weights("0.5,0.5").unwrap_err().contains("expected 4"));
        assert!(parse_weights("0.5,x,0,0").is_err());
        assert!(parse_weights("0.5,-0.1,0.3,0.3").unwrap_err().contains("shrub"));
    }

    #[test]
    fn test_score_arguments() {
        let cli = Cli::try_parse_from([
            "kiwo", "score", "plots.csv", "--minimal", "--language", "ha", "--weights", "0.25,0.25,0.25,0.25",
        ])
        .unwrap();
        let Command::Score(args) = cli.command else {
            panic!("expected score subcommand");
        };
        assert_eq!(args.input, PathBuf::from("plots.csv"));
        assert!(args.minimal);
        assert_eq!(args.language, Some(Language::Hausa));
        assert_eq!(args.weights, Some(WeightConfig::new(0.25, 0.25, 0.25, 0.25)));
    }

    #[test]
    fn test_no_export_conflicts_with_output() {
        assert!(Cli::try_parse_from(["kiwo", "score", "a.csv", "--no-export", "-o", "b.csv"]).is_err());
    }
}
