use thiserror::Error;

/// Numerical failures while fitting a trend
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegressionError {
    #[error("Non-finite value at position {0}")]
    NonFinite(usize),

    #[error("Distribution error: {0}")]
    Distribution(String),
}

pub type FitResult<T> = std::result::Result<T, RegressionError>;
