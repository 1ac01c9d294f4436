use thiserror::Error;

/// Per-series analysis failures
///
/// These never abort a pass: the orchestrator logs them and moves on to the
/// next series.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("Timestamps not strictly increasing at observation {index}")]
    UnorderedTimestamps { index: usize },

    #[error("Non-finite value at observation {index}")]
    NonFiniteValue { index: usize },

    #[error("Numerical failure: {0}")]
    Numerical(String),
}

pub type AnalysisResult<T> = std::result::Result<T, AnalysisError>;

/// Errors raised by series fetchers
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Failed to read '{path}': {error}")]
    Io { path: String, error: String },

    #[error("Malformed snapshot: {0}")]
    Parse(String),

    #[error("Source unavailable: {0}")]
    Unavailable(String),
}

pub type SourceResult<T> = std::result::Result<T, SourceError>;

/// Errors raised by breakout sinks
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("Sink disabled")]
    Disabled,

    #[error("Delivery failed: {0}")]
    Delivery(String),
}

pub type SinkResult<T> = std::result::Result<T, SinkError>;
