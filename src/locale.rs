//! Portuguese date normalization.
//!
//! The source table writes term boundaries as free text like
//! "15 de novembro de 1889", sometimes with an ordinal glyph on the day
//! ("1º de janeiro de 1995") and uses the literal "atualidade" for a term
//! that is still running. This module converts one such token into a
//! locale-independent `NaiveDate`.

use chrono::{Local, NaiveDate};

use crate::error::PipelineError;

/// Literal marking a term that has not ended yet.
pub const ONGOING_SENTINEL: &str = "atualidade";

/// The twelve Portuguese month names and their two-digit codes.
///
/// No name is a substring of another, so substitution order does not
/// matter; `tests::month_names_are_not_substrings_of_each_other` pins
/// that invariant instead of relying on it silently.
pub const MONTHS: [(&str, &str); 12] = [
    ("janeiro", "01"),
    ("fevereiro", "02"),
    ("março", "03"),
    ("abril", "04"),
    ("maio", "05"),
    ("junho", "06"),
    ("julho", "07"),
    ("agosto", "08"),
    ("setembro", "09"),
    ("outubro", "10"),
    ("novembro", "11"),
    ("dezembro", "12"),
];

/// Converts free-text Portuguese date tokens into canonical dates.
///
/// Holds the date used for the "atualidade" sentinel so that callers
/// (and tests) control the clock instead of reading it ambiently.
#[derive(Debug, Clone)]
pub struct Normalizer {
    today: NaiveDate,
}

impl Normalizer {
    /// Create a normalizer whose "atualidade" resolves to the current
    /// local date.
    pub fn new() -> Self {
        Self {
            today: Local::now().date_naive(),
        }
    }

    /// Create a normalizer with a fixed "today", for deterministic runs.
    pub fn with_today(today: NaiveDate) -> Self {
        Self { today }
    }

    /// Normalize one boundary token to a calendar date.
    ///
    /// # Arguments
    /// * `token` - Raw boundary text, e.g. "15 de novembro de 1889",
    ///   "1º de janeiro de 1995", "atualidade", or an already-numeric
    ///   "15/11/1889"
    ///
    /// # Returns
    /// The canonical date, or `PipelineError::DateParse` carrying the
    /// original token when the text does not resolve to a valid
    /// day/month/year date.
    pub fn normalize(&self, token: &str) -> Result<NaiveDate, PipelineError> {
        let trimmed = token.trim();

        if trimmed == ONGOING_SENTINEL {
            return Ok(self.today);
        }

        let mut text = trimmed.replace(" de ", "/");
        for (name, code) in MONTHS {
            if text.contains(name) {
                text = text.replace(name, code);
            }
        }
        // Ordinal glyphs attach to the day digits: "1º/01/1995" -> "1/01/1995".
        let text = text.replace('º', "").replace('°', "");

        NaiveDate::parse_from_str(&text, "%d/%m/%Y").map_err(|_| PipelineError::DateParse {
            token: trimmed.to_string(),
        })
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}
