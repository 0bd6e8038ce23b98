//! Error taxonomy for the alignment pipeline.
//!
//! Every failure mode indicates malformed or mismatched upstream data that
//! needs human attention, so none of these are caught inside the pipeline
//! itself. Callers surface them as fatal run failures. The pipeline never
//! substitutes a default value for a failed parse or coercion.

use thiserror::Error;

/// Error type for date normalization, interval building, and series
/// alignment failures.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A boundary token could not be normalized to a calendar date after
    /// locale substitution.
    #[error("could not parse '{token}' as a day/month/year date")]
    DateParse { token: String },

    /// A duration string did not split into exactly two boundary tokens.
    #[error("malformed term interval '{text}': expected '<start> – <end>'")]
    MalformedInterval { text: String },

    /// An economic value cell could not be coerced to a float.
    #[error("could not coerce cell '{cell}' to a number")]
    NumericCoercion { cell: String },

    /// The year-keyed join between debt and GDP produced no rows.
    #[error("debt and GDP tables share no common year")]
    EmptySeries,

    /// GDP is zero for a joined year, making the debt/GDP ratio undefined.
    #[error("GDP is zero for year {year}, debt/GDP ratio is undefined")]
    UndefinedRatio { year: i32 },
}
