//! Kiwo: Grazing Suitability Score calculator.
//! Entry point for the `kiwo` binary.

mod cli;
mod config;
mod report;

use anyhow::{bail, Context};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use kiwo_advisor::recommend;
use kiwo_ingestion::{export_to_file, load_table, ExportProjection};
use kiwo_ranker::score_table;

use cli::{AdviseArgs, Cli, Command, ScoreArgs};
use config::Config;
use report::{render_summary, ReportOptions};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("kiwo=debug,info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    info!("Kiwo {}", env!("CARGO_PKG_VERSION"));

    let config = match Config::load(cli.config.as_deref()) {
        Ok(c) => {
            info!(weights = ?c.scoring, language = %c.advice.language, "Configuration loaded");
            c
        }
        Err(e) if cli.config.is_some() => {
            return Err(e.context("Could not load the requested configuration"));
        }
        Err(e) => {
            warn!("Could not load kiwo.toml: {e}");
            warn!("Running with default weights and output settings.");
            Config::default()
        }
    };

    match cli.command {
        Command::Score(args) => run_score(args, &config).await,
        Command::Advise(args) => run_advise(args, &config),
    }
}

async fn run_score(args: ScoreArgs, config: &Config) -> anyhow::Result<()> {
    let weights = args.weights.unwrap_or(config.scoring);
    let language = args.language.unwrap_or(config.advice.language);
    let top_n = args.top.unwrap_or(config.output.top_n);

    let table = load_table(&args.input)
        .await
        .with_context(|| format!("Failed to read {}", args.input.display()))?;

    // Validation errors print verbatim; a failed run was already logged with its run id.
    let scored = score_table(&table, &weights)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&scored)?);
    } else {
        let opts = ReportOptions {
            top_n,
            language,
            plot: args.plot.as_deref(),
        };
        print!("{}", render_summary(&scored, &opts));
    }

    if args.no_export {
        return Ok(());
    }
    let projection = if args.minimal {
        ExportProjection::Minimal
    } else {
        config.output.projection
    };
    let output = args
        .output
        .unwrap_or_else(|| config.output.file_name.clone().into());
    export_to_file(&scored, projection, &output)
        .await
        .with_context(|| format!("Failed to write {}", output.display()))?;
    info!(run_id = %scored.run_id, "Results written to {}", output.display());

    Ok(())
}

fn run_advise(args: AdviseArgs, config: &Config) -> anyhow::Result<()> {
    if !args.gss.is_finite() {
        bail!("GSS must be a finite number");
    }
    let language = args.language.unwrap_or(config.advice.language);
    println!("{}", recommend(args.gss, language));
    Ok(())
}
