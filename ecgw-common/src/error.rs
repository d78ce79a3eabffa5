//! Common error types for ECGW

use thiserror::Error;

/// Common result type for ECGW operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across ECGW crates
#[derive(Error, Debug)]
pub enum Error {
    /// Segment input rejected before any classifier ran
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Configuration loading or validation error
    ///
    /// Also raised when an alert level table has duplicate or
    /// non-monotonic priorities.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Input validation failures for a single segment analysis
///
/// Any of these aborts the whole analysis call. No partial
/// [`SegmentAnalysis`](crate::analysis::SegmentAnalysis) is produced.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Heart rate is NaN or infinite
    #[error("heart rate must be finite, got {0}")]
    NonFiniteHeartRate(f64),

    /// Heart rate is zero or negative
    #[error("heart rate must be positive, got {0} BPM")]
    NonPositiveHeartRate(f64),

    /// Beat label outside the N/V/S/F/Q enumeration
    #[error("unknown beat label '{label}' at position {position}")]
    UnknownBeatLabel { position: usize, label: String },

    /// RR interval is zero or negative
    #[error("RR interval {index} must be positive, got {value}s")]
    NonPositiveRrInterval { index: usize, value: f64 },

    /// RR interval is NaN or infinite
    #[error("RR interval {index} must be finite")]
    NonFiniteRrInterval { index: usize },

    /// Sampling rate used for index-to-interval conversion is unusable
    #[error("sampling rate must be finite and positive, got {0} Hz")]
    InvalidSamplingRate(f64),

    /// Beat sample indices are not strictly ascending
    #[error("beat index {index} is not after the preceding beat")]
    UnorderedBeatIndices { index: usize },
}
