// src/error.rs

use thiserror::Error;

/// Failures surfaced by the analysis core.
///
/// The only non-error fallbacks in the crate are the `PeakResult` "no peak
/// found" sentinel and the zero-variance divisor guards in SNV /
/// standardization; everything else is reported through this enum.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("insufficient data: need at least {needed} samples, got {got}")]
    InsufficientData { needed: usize, got: usize },

    #[error("malformed trace: {0}")]
    MalformedTrace(String),

    #[error("empty batch: no scans supplied for batch analysis")]
    EmptyBatch,

    #[error("shape mismatch: scan '{scan}' has {got} samples, batch expects {expected}")]
    ShapeMismatch {
        expected: usize,
        got: usize,
        scan: String,
    },

    #[error("invalid component count: requested {requested}, matrix supports at most {max}")]
    InvalidComponentCount { requested: usize, max: usize },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
