//! Debt Timeline Library
//!
//! Aligns two independently-sourced annual economic series (Brazil's gross
//! external debt and GDP) against the catalog of presidential terms, and
//! renders the derived debt/GDP ratio as a time-series chart with one
//! shaded band per administration.
//!
//! # Architecture
//!
//! Four stages, data flowing strictly left to right:
//! - **`locale`**: free-text Portuguese date tokens → canonical dates
//! - **`terms`**: raw table rows → deduplicated administration terms
//! - **`series`**: raw debt/GDP tables → the merged ratio series
//! - **`timeline`**: terms × series window → the relevant, ordered terms
//!
//! `ingest` materializes the raw tables from CSV, `config` describes one
//! run, and `chart` is the rendering collaborator consuming the pipeline's
//! output by explicit parameter passing.
//!
//! # Example
//!
//! ```no_run
//! use debt_timeline::{PipelineConfig, SvgRenderer, run};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let config = PipelineConfig::load("run.toml")?;
//!     let summary = run(&config, &SvgRenderer)?;
//!     println!("{} aligned years", summary.series.len());
//!     Ok(())
//! }
//! ```

pub mod chart;
pub mod config;
pub mod error;
pub mod ingest;
pub mod locale;
pub mod series;
pub mod terms;
pub mod timeline;

use anyhow::Result;

// Re-export commonly used types
pub use chart::{ChartRenderer, ChartSpec, SeriesKey, SvgRenderer};
pub use config::PipelineConfig;
pub use error::PipelineError;
pub use locale::Normalizer;
pub use series::EconomicObservation;
pub use terms::AdministrationTerm;

/// The pipeline's output: the merged economic series and the relevant
/// term timeline, both read-only once built.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub series: Vec<EconomicObservation>,
    pub timeline: Vec<AdministrationTerm>,
}

/// Execute one full pipeline run: ingest the three tables, build and
/// filter the administration terms, align the economic series, and render
/// every configured chart through the given backend.
///
/// # Arguments
/// * `config` - Input table paths and chart jobs
/// * `renderer` - Rendering backend for the chart artifacts
///
/// # Returns
/// The aligned series and filtered timeline, after all charts are written.
pub fn run(config: &PipelineConfig, renderer: &dyn ChartRenderer) -> Result<RunSummary> {
    let raw_rows = ingest::read_term_rows(&config.terms_table)?;
    let debt = ingest::read_series_table(&config.debt_table)?;
    let gdp = ingest::read_series_table(&config.gdp_table)?;

    let normalizer = Normalizer::new();
    let all_terms = terms::build_terms(&raw_rows, &normalizer)?;
    for violation in terms::validate(&all_terms) {
        tracing::warn!(
            name = %violation.name,
            start = %violation.start,
            end = %violation.end,
            "term interval is inverted"
        );
    }

    let series = series::align(&debt, &gdp)?;
    if let Some(peak) = series::max_ratio(&series) {
        tracing::info!(
            year = peak.year,
            ratio_percent = peak.ratio_percent,
            "peak debt/GDP ratio"
        );
    }

    let timeline = timeline::filter_relevant(&all_terms, &series);

    for spec in &config.charts {
        renderer.render(spec, &series, &timeline)?;
    }

    Ok(RunSummary { series, timeline })
}
