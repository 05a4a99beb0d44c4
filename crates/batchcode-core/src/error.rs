//! Error types for date construction and pattern decoding.

use thiserror::Error;

/// A calendar value could not be built from decoded fields.
///
/// These are expected, per-candidate outcomes: decoders drop the candidate
/// and carry on with the others.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("day of year {day} is invalid for year {year}")]
    InvalidDayOfYear { year: i32, day: u32 },

    #[error("two-digit year must be between 0 and 99, got {0}")]
    InvalidTwoDigitYear(u32),

    #[error("{year:04}-{month:02}-{day:02} is not a calendar date")]
    InvalidDate { year: i32, month: u32, day: u32 },
}

/// A decoder failed for a reason unrelated to the code being decoded.
///
/// The orchestrator logs these and drops the decoder's contribution.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("pattern '{key}' is not registered")]
    MissingPattern { key: String },

    #[error("capture group {index} missing from pattern '{key}'")]
    MissingGroup { key: String, index: usize },

    #[error("field '{field}' has non-numeric value '{value}'")]
    InvalidField { field: &'static str, value: String },

    #[error("{0}")]
    Other(String),
}
