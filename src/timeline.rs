//! Term relevance filtering.
//!
//! Selects the administration terms that matter for the economic series
//! under analysis: the one governing when the series begins, plus every
//! later one. Terms that ended strictly before the series starts carry no
//! overlay information and are dropped.

use chrono::NaiveDate;

use crate::series::EconomicObservation;
use crate::terms::AdministrationTerm;

/// Filter terms to those temporally relevant to the series, sorted by
/// start date.
///
/// Let `first_date` be January 1 of the series' earliest year. A term is
/// kept iff it spans `first_date` (start <= first_date <= end) or begins
/// at or after it. Boundaries are inclusive on both sides.
///
/// # Arguments
/// * `terms` - Built administration terms, any order
/// * `series` - Aligned economic series; its minimum year anchors the
///   window (callers pass `align`'s output, which is never empty)
pub fn filter_relevant(
    terms: &[AdministrationTerm],
    series: &[EconomicObservation],
) -> Vec<AdministrationTerm> {
    let Some(first_year) = series.iter().map(|o| o.year).min() else {
        return Vec::new();
    };
    // align() output always has valid years; Jan 1 exists for any year.
    let first_date = NaiveDate::from_ymd_opt(first_year, 1, 1)
        .unwrap_or(NaiveDate::MIN);

    let mut relevant: Vec<AdministrationTerm> = terms
        .iter()
        .filter(|t| (t.start <= first_date && t.end >= first_date) || t.start >= first_date)
        .cloned()
        .collect();
    relevant.sort_by_key(|t| t.start);

    tracing::debug!(
        first_year,
        kept = relevant.len(),
        total = terms.len(),
        "filtered timeline"
    );
    relevant
}
