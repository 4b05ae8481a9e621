use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Pipeline errors
// ---------------------------------------------------------------------------

/// Fatal errors that abort a level build.
#[derive(Debug, Error)]
pub enum LevelError {
    /// Source file missing or unreadable.  Raised before any output exists.
    #[error("cannot read source file {}: {source}", .path.display())]
    InputAccess {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("cannot fit curve: {0}")]
    Fit(#[from] FitError),

    /// Output CSV or JSON could not be created or written.
    /// Whatever was already written stays on disk.
    #[error("cannot write {}: {source}", .path.display())]
    OutputAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid ticker {0:?}: use ASCII letters, digits and . - _ ^ = only")]
    InvalidTicker(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl LevelError {
    pub fn output(path: impl Into<PathBuf>, source: impl Into<std::io::Error>) -> Self {
        LevelError::OutputAccess {
            path: path.into(),
            source: source.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Curve fitting errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FitError {
    #[error("need at least {required} samples, found {found}")]
    TooFewSamples { found: usize, required: usize },

    /// Two samples share an index, or indices go backwards.
    #[error("sample indices must be strictly increasing (position {position})")]
    NonIncreasingIndex { position: usize },

    #[error("sample {position} has a non-finite value")]
    NonFiniteValue { position: usize },

    #[error("x = {x} is outside the fitted domain [{min}, {max}]")]
    OutOfDomain { x: f64, min: f64, max: f64 },

    #[error("interpolation system is singular")]
    Singular,
}

// ---------------------------------------------------------------------------
// Recoverable row errors
// ---------------------------------------------------------------------------

/// A data row whose value field could not be read.  The loader logs these
/// and moves on.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RowParseError {
    #[error("row {row}: missing value field {field}")]
    MissingField { row: usize, field: usize },

    #[error("row {row}: {raw:?} is not a valid number")]
    NotANumber { row: usize, raw: String },

    #[error("row {row}: {raw:?} is not finite")]
    NonFinite { row: usize, raw: String },

    #[error("row {row}: {message}")]
    Malformed { row: usize, message: String },
}
