//! Detent CLI
//!
//! Runs headless sheet scenarios and inspects sheet configuration.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use detent_cli::{run_loaded_scenario, RunConfig, SheetScenario};
use detent_sheet::SheetConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Headless driver for the detent bottom sheet
#[derive(Parser, Debug)]
#[command(name = "detent")]
#[command(about = "Headless driver for the detent bottom sheet")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a JSON scenario and print its report
    Run {
        /// Scenario file
        scenario: PathBuf,

        /// Also write the report to this (relative) path
        #[arg(short, long)]
        report: Option<PathBuf>,

        /// Sheet config (TOML) overriding the scenario's own config
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Logical milliseconds per frame
        #[arg(long, default_value = "16")]
        tick_ms: u64,
    },

    /// Validate a sheet config and print the effective values
    Config {
        /// Sheet config (TOML); defaults are printed when omitted
        path: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Run {
            scenario,
            report,
            config,
            tick_ms,
        } => cmd_run(scenario, report, config, tick_ms),
        Commands::Config { path } => cmd_config(path),
    }
}

fn cmd_run(
    scenario_path: PathBuf,
    report_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
    tick_ms: u64,
) -> Result<()> {
    let mut scenario = SheetScenario::from_path(&scenario_path)?;
    if let Some(path) = config_path {
        scenario.config = SheetConfig::from_path(&path)
            .with_context(|| format!("failed to load {}", path.display()))?;
    }

    info!(
        "Running {} ({} steps)",
        scenario_path.display(),
        scenario.steps.len()
    );

    let cfg = RunConfig {
        tick_ms,
        ..RunConfig::default()
    };
    let outcome = run_loaded_scenario(&scenario, cfg)?;
    let report = outcome.report();

    report.write_to_writer(&mut std::io::stdout().lock())?;
    if let Some(path) = report_path {
        report.write_to_path(&path)?;
        info!("Report written to {}", path.display());
    }

    if outcome.is_failed() {
        bail!(
            "scenario failed at step {}: {}",
            report.failed_step_index.unwrap_or_default(),
            report.message.as_deref().unwrap_or("assertion failed")
        );
    }

    info!("Scenario passed in {} frames", report.elapsed_frames);
    Ok(())
}

fn cmd_config(path: Option<PathBuf>) -> Result<()> {
    let config = match path {
        Some(path) => SheetConfig::from_path(&path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => SheetConfig::default(),
    };
    print!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}
