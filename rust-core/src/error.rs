//! Error taxonomy for the signal engine
//!
//! `ParameterError` is the recoverable, show-a-message class. `ComputationError`
//! covers numeric routines failing on inputs that passed validation.
//! `LoadError` belongs to the tabular loader only.

use thiserror::Error;

/// Invalid numeric parameter passed to an engine operation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    #[error("Signal is empty")]
    EmptySignal,

    #[error("Filter window must be at least 1 (got {0})")]
    WindowTooSmall(usize),

    #[error("Filter window {window} exceeds signal length {len}")]
    WindowExceedsSignal { window: usize, len: usize },

    #[error("Savitzky-Golay window must be odd (got {0})")]
    EvenWindow(usize),

    #[error("Savitzky-Golay window {window} must be greater than polynomial order {order}")]
    WindowNotAboveOrder { window: usize, order: usize },

    #[error("Sampling rate must be a positive finite number (got {0})")]
    InvalidSamplingRate(f64),

    #[error("Zero padding must be non-negative (got {0})")]
    NegativeZeroPadding(i64),

    #[error("Wavelength sweep must be positive and finite (got {start} m .. {end} m)")]
    InvalidSweep { start: f64, end: f64 },

    #[error("Peak threshold must be finite (got {0})")]
    InvalidThreshold(f64),

    #[error("No table loaded")]
    NoTable,

    #[error("Channel {index} out of range (table has {count} channels)")]
    ChannelOutOfRange { index: usize, count: usize },
}

/// Unexpected failure inside a numeric routine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComputationError {
    #[error("FFT of length {len} failed: {reason}")]
    Fft { len: usize, reason: String },

    #[error("Least-squares fit over {points} points is singular")]
    SingularFit { points: usize },

    #[error("Padded length overflows: {len} samples + {padding} zeros")]
    LengthOverflow { len: usize, padding: usize },
}

/// Any failure raised by a propagating engine stage
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error(transparent)]
    Parameter(#[from] ParameterError),

    #[error(transparent)]
    Computation(#[from] ComputationError),
}

/// Failure reading a tabular signal file
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed delimited data: {0}")]
    Csv(#[from] csv::Error),

    #[error("File is empty")]
    Empty,

    #[error("Non-numeric data detected in column '{column}' at row {row}: '{value}'")]
    NonNumeric {
        column: String,
        row: usize,
        value: String,
    },

    #[error("Row {row} has {found} values, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Unreadable workbook: {0}")]
    Spreadsheet(#[from] calamine::Error),
}
