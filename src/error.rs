use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("Invalid date \"{input}\" (expected YYYY-MM-DD, YYYYMMDD or DD-MM-YYYY)")]
    InvalidDate { input: String },

    #[error("{0}")]
    Load(#[from] LoadError),

    #[error("{0}")]
    Summary(#[from] SummaryError),
}

/// Malformed timestamp or duration string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum ParseError {
    #[error("Invalid loginTime format \"{input}\" (expected DD-MM-YYYY HH:MM:SS)")]
    LoginTimeFormat { input: String },

    #[error("Invalid calendar date or time in loginTime \"{input}\" (expected DD-MM-YYYY HH:MM:SS)")]
    LoginTimeRange { input: String },

    #[error("Invalid sessionTime format \"{input}\" (expected HH:MM:SS)")]
    DurationFormat { input: String },

    #[error("Minutes and seconds out of range in sessionTime \"{input}\" (expected HH:MM:SS with MM and SS in 00-59)")]
    DurationRange { input: String },
}

/// Input that is not shaped like a list of session records
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum ShapeError {
    #[error("Session data must be a JSON array")]
    NotArray,

    #[error("Item {index} must be a JSON object")]
    NotObject { index: usize },

    #[error("Item {index}: missing field \"{field}\"")]
    MissingField { index: usize, field: &'static str },

    #[error("Item {index}: field \"{field}\" must be {expected}")]
    WrongType {
        index: usize,
        field: &'static str,
        expected: &'static str,
    },

    #[error("Item {index}: field \"{field}\" must be a non-negative number")]
    Negative { index: usize, field: &'static str },
}

/// One problem found while validating a single record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum RecordIssue {
    #[error("{0}")]
    Shape(ShapeError),

    #[error("Item {index}: field \"{field}\": {source}")]
    Parse {
        index: usize,
        field: &'static str,
        source: ParseError,
    },
}

/// Every issue found in a batch; a non-empty list rejects the whole batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct InvalidRecords(pub(crate) Vec<RecordIssue>);

impl fmt::Display for InvalidRecords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.0.len();
        write!(
            f,
            "{count} invalid session record{}",
            if count == 1 { "" } else { "s" }
        )?;
        for issue in &self.0 {
            write!(f, "\n  - {issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for InvalidRecords {}

#[derive(Debug, Error)]
pub(crate) enum LoadError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Session data is not valid JSON: {0}")]
    Syntax(#[from] serde_json::Error),

    #[error("{0}")]
    Shape(ShapeError),

    #[error("{0}")]
    Invalid(InvalidRecords),
}

#[derive(Debug, Error)]
pub(crate) enum SummaryError {
    #[error("Summary request failed: {0}")]
    Request(#[from] ureq::Error),

    #[error("Summary response could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}
