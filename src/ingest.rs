//! CSV materialization of the source tables.
//!
//! The pipeline consumes already-materialized tables; retrieval from the
//! upstream sites is a separate concern. This module reads the local CSV
//! snapshots: the administration list (duration text, name) and the two
//! annual series (year, locale-formatted value).

use std::path::Path;

use anyhow::{Context, Result};

use crate::series::RawSeriesTable;
use crate::terms::RawTermRow;

/// Read the administration-list table.
///
/// Expects a headered CSV with `duration_text` and `name` columns, one row
/// per table entry, duration text in the source's free-text format.
pub fn read_term_rows(path: impl AsRef<Path>) -> Result<Vec<RawTermRow>> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open term table {}", path.display()))?;

    let mut rows = Vec::new();
    for record in reader.deserialize() {
        let row: RawTermRow =
            record.with_context(|| format!("bad row in term table {}", path.display()))?;
        rows.push(row);
    }
    tracing::debug!(path = %path.display(), rows = rows.len(), "read term table");
    Ok(rows)
}

/// Read one annual economic series table.
///
/// The CSV is read verbatim, header row included: the aligner owns the
/// header-drop step, mirroring the shape raw table extraction produces.
pub fn read_series_table(path: impl AsRef<Path>) -> Result<RawSeriesTable> {
    let path = path.as_ref();
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("failed to open series table {}", path.display()))?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record =
            record.with_context(|| format!("bad row in series table {}", path.display()))?;
        let year = record.get(0).unwrap_or_default().to_string();
        let value = record.get(1).unwrap_or_default().to_string();
        rows.push((year, value));
    }
    tracing::debug!(path = %path.display(), rows = rows.len(), "read series table");
    Ok(RawSeriesTable { rows })
}
