//! Administration term building.
//!
//! Turns raw table rows of `{duration text, name}` into deduplicated
//! `AdministrationTerm` records with canonical start/end dates. Rows that
//! are table artifacts rather than actual administrations (collective-body
//! placeholders, "Eleito" footnote rows) are dropped here so they never
//! show up as overlay regions.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::PipelineError;
use crate::locale::Normalizer;

/// Name markers for table rows that do not describe one elected person
/// (e.g. "Junta Governativa Provisória", "Presidência da República").
const NON_PERSON_MARKERS: [&str; 2] = ["República", "Junta"];

/// Duration-text marker for election-footnote rows.
const ELECTED_MARKER: &str = "Eleito";

/// One raw row from the administration-list table.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTermRow {
    /// Free-text duration, e.g.
    /// "15 de novembro de 1889 – 25 de fevereiro de 1891 (eleito em ...)".
    pub duration_text: String,
    /// The administration's name as printed in the table.
    pub name: String,
}

/// A normalized administration interval. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdministrationTerm {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub name: String,
}

/// Build deduplicated administration terms from raw table rows.
///
/// Per row: drops any parenthesized trailing annotation, splits on the
/// en/em dash into two boundary tokens, normalizes each boundary, and
/// skips rows whose name or duration matches a non-person marker.
/// Exact-duplicate rows (a common footnote-repetition artifact) collapse
/// to one term. Insertion order is preserved; callers needing
/// chronological order sort explicitly.
///
/// # Arguments
/// * `rows` - Raw rows in source-table order
/// * `normalizer` - Date normalizer supplying the "atualidade" date
///
/// # Returns
/// The term list, or the first `DateParse`/`MalformedInterval` error hit.
pub fn build_terms(
    rows: &[RawTermRow],
    normalizer: &Normalizer,
) -> Result<Vec<AdministrationTerm>, PipelineError> {
    let mut terms: Vec<AdministrationTerm> = Vec::new();

    for row in rows {
        if !is_administration_row(row) {
            tracing::debug!(name = %row.name, "skipping non-administration row");
            continue;
        }

        // "15 de ... – atualidade (eleito em 2022)" -> keep the prefix.
        let duration = match row.duration_text.split_once('(') {
            Some((prefix, _)) => prefix,
            None => row.duration_text.as_str(),
        };

        let (start_token, end_token) = split_interval(duration)?;
        let term = AdministrationTerm {
            start: normalizer.normalize(start_token)?,
            end: normalizer.normalize(end_token)?,
            name: row.name.trim().to_string(),
        };

        if !terms.contains(&term) {
            terms.push(term);
        }
    }

    tracing::debug!(count = terms.len(), "built administration terms");
    Ok(terms)
}

/// Return the terms whose start is after their end.
///
/// Source text can be malformed, so building does not hard-fail on an
/// inverted interval; this pass makes violations visible to the caller.
pub fn validate(terms: &[AdministrationTerm]) -> Vec<&AdministrationTerm> {
    terms.iter().filter(|t| t.start > t.end).collect()
}

/// True when the row describes an actual administration rather than a
/// collective-body placeholder or an election footnote.
fn is_administration_row(row: &RawTermRow) -> bool {
    if row.duration_text.contains(ELECTED_MARKER) {
        return false;
    }
    !NON_PERSON_MARKERS.iter().any(|m| row.name.contains(m))
}

/// Split a duration string on its en/em dash into two non-empty boundary
/// tokens.
fn split_interval(duration: &str) -> Result<(&str, &str), PipelineError> {
    let split = duration
        .split_once('–')
        .or_else(|| duration.split_once('—'));

    match split {
        Some((start, end)) if !start.trim().is_empty() && !end.trim().is_empty() => {
            Ok((start, end))
        }
        _ => Err(PipelineError::MalformedInterval {
            text: duration.trim().to_string(),
        }),
    }
}
