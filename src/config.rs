//! Run configuration.
//!
//! A TOML file names the three input tables and the chart artifacts to
//! produce, so invocations carry no hard-coded paths or titles.
//!
//! ```toml
//! terms_table = "data/presidents.csv"
//! debt_table = "data/debt.csv"
//! gdp_table = "data/gdp.csv"
//!
//! [[charts]]
//! title = "Dívida externa bruta / PIB"
//! y_axis_label = "%"
//! series_key = "ratio_percent"
//! output_path = "relative-debt.svg"
//!
//! [[charts]]
//! title = "Dívida externa bruta brasileira"
//! y_axis_label = "US$ (bilhões)"
//! series_key = "debt_billions"
//! log_scale = true
//! output_path = "absolute-debt.svg"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::chart::ChartSpec;

/// Full configuration for one pipeline run.
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// CSV with the administration list (duration_text, name).
    pub terms_table: PathBuf,
    /// CSV with the annual external-debt series (year, US$ billions).
    pub debt_table: PathBuf,
    /// CSV with the annual GDP series (year, US$ millions).
    pub gdp_table: PathBuf,
    /// Chart artifacts to render, in order.
    #[serde(default)]
    pub charts: Vec<ChartSpec>,
}

impl PipelineConfig {
    /// Load the configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: PipelineConfig = toml::from_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::SeriesKey;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn loads_full_config() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
terms_table = "presidents.csv"
debt_table = "debt.csv"
gdp_table = "gdp.csv"

[[charts]]
title = "Ratio"
y_axis_label = "%"
series_key = "ratio_percent"
output_path = "ratio.svg"

[[charts]]
title = "Debt"
y_axis_label = "US$ (bilhões)"
series_key = "debt_billions"
log_scale = true
output_path = "debt.svg"
"#
        )
        .unwrap();

        let config = PipelineConfig::load(file.path()).unwrap();
        assert_eq!(config.terms_table, PathBuf::from("presidents.csv"));
        assert_eq!(config.charts.len(), 2);
        assert_eq!(config.charts[0].series_key, SeriesKey::RatioPercent);
        assert!(!config.charts[0].log_scale);
        assert!(config.charts[1].log_scale);
    }

    #[test]
    fn charts_default_to_empty() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            "terms_table = \"a.csv\"\ndebt_table = \"b.csv\"\ngdp_table = \"c.csv\"\n"
        )
        .unwrap();
        let config = PipelineConfig::load(file.path()).unwrap();
        assert!(config.charts.is_empty());
    }

    #[test]
    fn missing_field_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "terms_table = \"a.csv\"\n").unwrap();
        assert!(PipelineConfig::load(file.path()).is_err());
    }
}
