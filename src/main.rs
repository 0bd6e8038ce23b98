//! Debt Timeline - Main Entry Point
//!
//! This is the main entry point for the debt-timeline command line tool.
//! The actual implementation is in the `debt_timeline` library.

use anyhow::Result;
use clap::{CommandFactory, Parser};
use debt_timeline::{PipelineConfig, SvgRenderer, run};
use tracing_subscriber::EnvFilter;

/// Debt Timeline - align Brazil's external-debt and GDP series with
/// presidential terms and render the debt/GDP charts
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the run configuration (TOML)
    config: String,
}

fn main() -> Result<()> {
    // Check if no arguments were provided (except the program name)
    if std::env::args().len() == 1 {
        // No arguments provided, show help and exit with error code
        let mut cmd = Args::command();
        cmd.print_help().ok();
        println!(); // Add a newline after help
        std::process::exit(2);
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = PipelineConfig::load(&args.config)?;
    let summary = run(&config, &SvgRenderer)?;
    tracing::info!(
        years = summary.series.len(),
        terms = summary.timeline.len(),
        charts = config.charts.len(),
        "pipeline finished"
    );
    Ok(())
}
