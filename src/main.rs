//! Dataset Dashboard CLI.
//!
//! Submits one dataset to the analysis service, prints the resulting views,
//! and optionally simulates and exports a scenario.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use thiserror::Error;

use dataset_dashboard::adapters::{HttpAnalysisService, UniformRandomSource};
use dataset_dashboard::application::AnalysisSession;
use dataset_dashboard::config::{AppConfig, ConfigError};
use dataset_dashboard::domain::foundation::{format2, ValidationError};
use dataset_dashboard::domain::session::SessionError;
use dataset_dashboard::ports::{AnalysisError, DatasetFile, RandomSource};

#[derive(Parser)]
#[command(
    name = "dataset-dashboard",
    version,
    about = "Analyze a tabular dataset and project a stochastic scenario",
    long_about = "Upload a dataset to the analysis service, print the train/test split,\n\
                  base statistics and the first column's distribution.\n\n\
                  With --simulate, project every column mean by a random fraction of\n\
                  its standard deviation. With --export-dir, also write the scenario\n\
                  as simulacion_proyectada.csv."
)]
struct Cli {
    /// Dataset file to analyze (CSV or ARFF).
    #[arg(value_name = "DATASET")]
    file: PathBuf,

    /// Fraction of rows held out for testing (0.1 to 0.5).
    #[arg(long = "test-size", default_value_t = 0.3)]
    test_size: f64,

    /// Generate a scenario after the analysis.
    #[arg(long = "simulate")]
    simulate: bool,

    /// Write the scenario CSV into this directory (implies --simulate).
    #[arg(long = "export-dir", value_name = "DIR")]
    export_dir: Option<PathBuf>,

    /// Seed the scenario generator for reproducible output.
    #[arg(long = "seed")]
    seed: Option<u64>,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid dataset: {0}")]
    Dataset(#[from] ValidationError),

    #[error("failed to create analysis client: {0}")]
    Client(#[from] AnalysisError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = AppConfig::load()?;
    config.validate().map_err(ConfigError::from)?;
    config.logging.init()?;

    let bytes = tokio::fs::read(&cli.file)
        .await
        .map_err(|source| CliError::Read {
            path: cli.file.clone(),
            source,
        })?;
    let file_name = cli
        .file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file = DatasetFile::new(file_name, bytes)?;

    let service = HttpAnalysisService::new(config.analysis.to_http_config())?;
    let random: Box<dyn RandomSource> = match cli.seed {
        Some(seed) => Box::new(UniformRandomSource::seeded(seed)),
        None => Box::new(UniformRandomSource::new()),
    };
    let mut session = AnalysisSession::new(Arc::new(service), random);

    session.submit_dataset(Some(file), cli.test_size).await?;
    print_views(&session);

    if !cli.simulate && cli.export_dir.is_none() {
        return Ok(());
    }

    let scenario = session.generate_scenario()?;
    println!();
    println!("Projected scenario");
    for entry in scenario.entries() {
        println!("  {:<24} {:>12}", entry.variable_name, entry.display_value());
    }

    if let Some(dir) = &cli.export_dir {
        let artifact = session.export_scenario()?;
        let path = artifact.write_to_dir(dir).map_err(SessionError::from)?;
        println!();
        println!("Exported {}", path.display());
    }

    Ok(())
}

fn print_views(session: &AnalysisSession) {
    if let Some(split) = session.split_view() {
        println!(
            "{}: {}  {}: {}  ({}% test)",
            split.train_label,
            split.train_value,
            split.test_label,
            split.test_value,
            format2(split.test_share() * 100.0)
        );
    }

    if let Some(overview) = session.dataset_overview() {
        println!(
            "Rows: {}  Columns ({}): {}",
            overview.total_rows,
            overview.column_count(),
            overview.columns.join(", ")
        );
    }

    if let Some(health) = session.health_view() {
        println!("Health: {} ({} nulls)", health.status, health.null_count);
        if !health.critical_columns.is_empty() {
            println!("  critical: {}", health.critical_columns.join(", "));
        }
    }

    let table = session.statistics_table();
    if !table.is_empty() {
        println!();
        println!("{:<24} {:>12} {:>12}", "column", "mean", "std");
        for row in &table {
            println!("{:<24} {:>12} {:>12}", row.name, row.mean_display, row.std_display);
        }
    }

    let bars = session.histogram_view();
    if !bars.is_empty() {
        println!();
        println!("Distribution");
        for bar in &bars {
            println!("  {:>10} | {}", bar.label, bar.frequency);
        }
    }
}
