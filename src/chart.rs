//! Chart rendering collaborator.
//!
//! The pipeline core hands the renderer two read-only slices (the aligned
//! series and the chronological term timeline) together with a `ChartSpec`
//! describing one output artifact. `SvgRenderer` is the built-in backend:
//! it plots the selected column as a line, shades one region per
//! administration term with a cyclic palette, and writes the chart as an
//! SVG file.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use serde::Deserialize;

use crate::series::EconomicObservation;
use crate::terms::AdministrationTerm;

/// Which derived column of the merged series to plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKey {
    /// Debt/GDP as a percentage.
    RatioPercent,
    /// Absolute external debt in US$ billions.
    DebtBillions,
}

impl SeriesKey {
    fn value_of(self, observation: &EconomicObservation) -> f64 {
        match self {
            SeriesKey::RatioPercent => observation.ratio_percent,
            SeriesKey::DebtBillions => observation.debt_billions_usd,
        }
    }
}

/// Configuration for one chart artifact, passed in by the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct ChartSpec {
    /// Chart heading.
    pub title: String,
    /// Y-axis caption.
    pub y_axis_label: String,
    /// Which derived column to plot.
    pub series_key: SeriesKey,
    /// Plot the y-axis on a log10 scale.
    #[serde(default)]
    pub log_scale: bool,
    /// Destination for the rendered artifact.
    pub output_path: PathBuf,
}

/// A rendering backend for one chart artifact.
pub trait ChartRenderer {
    fn render(
        &self,
        spec: &ChartSpec,
        series: &[EconomicObservation],
        timeline: &[AdministrationTerm],
    ) -> Result<()>;
}

/// Cyclic 20-color palette for term shading, assigned in iteration order.
const PALETTE: [&str; 20] = [
    "#393b79", "#5254a3", "#6b6ecf", "#9c9ede", "#637939", "#8ca252", "#b5cf6b",
    "#cedb9c", "#8c6d31", "#bd9e39", "#e7ba52", "#e7cb94", "#843c39", "#ad494a",
    "#d6616b", "#e7969c", "#7b4173", "#a55194", "#ce6dbd", "#de9ed6",
];

const PLOT_LEFT: f64 = 70.0;
const PLOT_TOP: f64 = 50.0;
const PLOT_WIDTH: f64 = 640.0;
const PLOT_HEIGHT: f64 = 420.0;
const LEGEND_LEFT: f64 = 730.0;
const CANVAS_WIDTH: f64 = 980.0;
const CANVAS_HEIGHT: f64 = 540.0;

/// Built-in SVG backend.
#[derive(Debug, Default)]
pub struct SvgRenderer;

impl ChartRenderer for SvgRenderer {
    /// Render the spec'd column over the term overlay and write the SVG to
    /// `spec.output_path`.
    fn render(
        &self,
        spec: &ChartSpec,
        series: &[EconomicObservation],
        timeline: &[AdministrationTerm],
    ) -> Result<()> {
        let svg = self.draw(spec, series, timeline);
        fs::write(&spec.output_path, svg)
            .with_context(|| format!("failed to write chart to {}", spec.output_path.display()))?;
        tracing::info!(path = %spec.output_path.display(), title = %spec.title, "wrote chart");
        Ok(())
    }
}

impl SvgRenderer {
    fn draw(
        &self,
        spec: &ChartSpec,
        series: &[EconomicObservation],
        timeline: &[AdministrationTerm],
    ) -> String {
        let scale_y = |v: f64| {
            if spec.log_scale {
                v.max(f64::MIN_POSITIVE).log10()
            } else {
                v
            }
        };

        let values: Vec<f64> = series
            .iter()
            .map(|o| scale_y(spec.series_key.value_of(o)))
            .collect();
        let (y_min, y_max) = bounds(&values);
        let x_min = series.iter().map(|o| o.year).min().unwrap_or(0) as f64;
        let x_max = series.iter().map(|o| o.year).max().unwrap_or(1) as f64;

        let x_of = |x: f64| {
            let span = (x_max - x_min).max(1.0);
            PLOT_LEFT + (x - x_min) / span * PLOT_WIDTH
        };
        let y_of = |v: f64| {
            let span = (y_max - y_min).max(f64::EPSILON);
            PLOT_TOP + PLOT_HEIGHT - (v - y_min) / span * PLOT_HEIGHT
        };

        let mut out = String::new();
        out.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{CANVAS_WIDTH}\" height=\"{CANVAS_HEIGHT}\" viewBox=\"0 0 {CANVAS_WIDTH} {CANVAS_HEIGHT}\">\n"
        ));
        out.push_str(&format!(
            "<rect x=\"{PLOT_LEFT}\" y=\"{PLOT_TOP}\" width=\"{PLOT_WIDTH}\" height=\"{PLOT_HEIGHT}\" fill=\"#f5f5f5\"/>\n"
        ));

        // One shaded band per term, clamped to the plotted x-range, with the
        // palette cycling in timeline order (same color for band and legend).
        for (index, term) in timeline.iter().enumerate() {
            let color = PALETTE[index % PALETTE.len()];
            let band_start = x_of(fractional_year(term.start).max(x_min)).min(PLOT_LEFT + PLOT_WIDTH);
            let band_end = x_of(fractional_year(term.end).min(x_max)).max(PLOT_LEFT);
            if band_end > band_start {
                out.push_str(&format!(
                    "<rect x=\"{:.2}\" y=\"{PLOT_TOP}\" width=\"{:.2}\" height=\"{PLOT_HEIGHT}\" fill=\"{color}\"/>\n",
                    band_start,
                    band_end - band_start,
                ));
            }
            let swatch_y = 60.0 + index as f64 * 22.0;
            out.push_str(&format!(
                "<rect x=\"{LEGEND_LEFT}\" y=\"{:.2}\" width=\"14\" height=\"14\" fill=\"{color}\"/>\n",
                swatch_y
            ));
            out.push_str(&format!(
                "<text x=\"{:.2}\" y=\"{:.2}\" font-size=\"12\">{}</text>\n",
                LEGEND_LEFT + 20.0,
                swatch_y + 11.0,
                escape(&term.name)
            ));
        }

        // The series line is drawn in white over the opaque bands.
        let points: Vec<String> = series
            .iter()
            .zip(&values)
            .map(|(o, v)| format!("{:.2},{:.2}", x_of(o.year as f64), y_of(*v)))
            .collect();
        if points.len() > 1 {
            out.push_str(&format!(
                "<polyline points=\"{}\" fill=\"none\" stroke=\"white\" stroke-width=\"2\"/>\n",
                points.join(" ")
            ));
        }

        out.push_str(&format!(
            "<text x=\"{:.2}\" y=\"30\" font-size=\"16\" text-anchor=\"middle\">{}</text>\n",
            PLOT_LEFT + PLOT_WIDTH / 2.0,
            escape(&spec.title)
        ));
        out.push_str(&format!(
            "<text x=\"20\" y=\"{:.2}\" font-size=\"12\" transform=\"rotate(-90 20 {:.2})\" text-anchor=\"middle\">{}</text>\n",
            PLOT_TOP + PLOT_HEIGHT / 2.0,
            PLOT_TOP + PLOT_HEIGHT / 2.0,
            escape(&spec.y_axis_label)
        ));

        // Min/max x tick labels keep the axis readable without a full grid.
        out.push_str(&format!(
            "<text x=\"{PLOT_LEFT}\" y=\"{:.2}\" font-size=\"12\">{}</text>\n",
            PLOT_TOP + PLOT_HEIGHT + 18.0,
            x_min as i32
        ));
        out.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" font-size=\"12\" text-anchor=\"end\">{}</text>\n",
            PLOT_LEFT + PLOT_WIDTH,
            PLOT_TOP + PLOT_HEIGHT + 18.0,
            x_max as i32
        ));

        out.push_str("</svg>\n");
        out
    }
}

/// A calendar date as a fractional year, for x-axis placement.
fn fractional_year(date: NaiveDate) -> f64 {
    let days_in_year = if NaiveDate::from_ymd_opt(date.year(), 12, 31)
        .map(|d| d.ordinal() == 366)
        .unwrap_or(false)
    {
        366.0
    } else {
        365.0
    };
    date.year() as f64 + (date.ordinal0() as f64) / days_in_year
}

fn bounds(values: &[f64]) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values {
        min = min.min(*v);
        max = max.max(*v);
    }
    if min > max {
        (0.0, 1.0)
    } else {
        (min, max)
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(key: SeriesKey, log_scale: bool) -> ChartSpec {
        ChartSpec {
            title: "Test & chart".to_string(),
            y_axis_label: "%".to_string(),
            series_key: key,
            log_scale,
            output_path: PathBuf::from("unused.svg"),
        }
    }

    fn observation(year: i32, debt: f64, ratio: f64) -> EconomicObservation {
        EconomicObservation {
            year,
            debt_billions_usd: debt,
            gdp_millions_usd: 1.0,
            ratio_percent: ratio,
        }
    }

    fn term(start_year: i32, end_year: i32, name: &str) -> AdministrationTerm {
        AdministrationTerm {
            start: NaiveDate::from_ymd_opt(start_year, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(end_year, 1, 1).unwrap(),
            name: name.to_string(),
        }
    }

    #[test]
    fn draws_polyline_band_and_legend() {
        let series = vec![observation(1995, 100.0, 30.0), observation(2000, 200.0, 40.0)];
        let timeline = vec![term(1995, 2000, "FHC")];
        let svg = SvgRenderer.draw(&spec(SeriesKey::RatioPercent, false), &series, &timeline);
        assert!(svg.contains("<polyline"));
        assert!(svg.contains("FHC"));
        assert!(svg.contains(PALETTE[0]));
    }

    #[test]
    fn escapes_markup_in_labels() {
        let series = vec![observation(1995, 100.0, 30.0), observation(2000, 200.0, 40.0)];
        let svg = SvgRenderer.draw(&spec(SeriesKey::RatioPercent, false), &series, &[]);
        assert!(svg.contains("Test &amp; chart"));
        assert!(!svg.contains("Test & chart<"));
    }

    #[test]
    fn palette_cycles_past_twenty_terms() {
        let series = vec![observation(1900, 1.0, 1.0), observation(2000, 2.0, 2.0)];
        let timeline: Vec<AdministrationTerm> = (0..21)
            .map(|i| term(1900 + i, 1901 + i, &format!("Term {i}")))
            .collect();
        let svg = SvgRenderer.draw(&spec(SeriesKey::DebtBillions, false), &series, &timeline);
        // 21st term reuses the first palette entry: three occurrences in
        // total (two bands + two swatches share two colors... just count).
        let first_color_uses = svg.matches(PALETTE[0]).count();
        assert!(first_color_uses >= 3, "expected palette to wrap, got {first_color_uses}");
    }

    #[test]
    fn log_scale_orders_values_like_linear() {
        let series = vec![observation(1995, 10.0, 1.0), observation(2000, 1000.0, 2.0)];
        let linear = SvgRenderer.draw(&spec(SeriesKey::DebtBillions, false), &series, &[]);
        let log = SvgRenderer.draw(&spec(SeriesKey::DebtBillions, true), &series, &[]);
        assert!(linear.contains("<polyline"));
        assert!(log.contains("<polyline"));
        assert_ne!(linear, log);
    }

    #[test]
    fn renders_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.svg");
        let mut chart_spec = spec(SeriesKey::RatioPercent, false);
        chart_spec.output_path = path.clone();
        let series = vec![observation(1995, 100.0, 30.0), observation(2000, 200.0, 40.0)];
        SvgRenderer.render(&chart_spec, &series, &[]).unwrap();
        let written = fs::read_to_string(path).unwrap();
        assert!(written.starts_with("<svg"));
    }
}
