//! Breakwatch Regression Engine
//!
//! Fits an ordinary least-squares line `y = slope * t + intercept` over the
//! ordinal index of a series' most recent window and derives residual-based
//! sigma boundaries around it.
//!
//! ## Boundaries
//!
//! ```text
//!   upper[t] = predicted[t] + k * residual_std
//!   lower[t] = predicted[t] - k * residual_std
//! ```
//!
//! `k` is a [`SigmaThreshold`] (clamped to [1.0, 5.0]); `residual_std` uses
//! `n - 1` in the denominator. The band slides with the trend line, its width
//! is constant across the window.
//!
//! Fewer than `min_data_points` values is not an error: [`TrendEstimator::fit`]
//! returns `Ok(None)` and the caller treats the series as "no signal".

mod band;
mod error;
mod estimator;
mod threshold;

pub use band::SigmaBand;
pub use error::{FitResult, RegressionError};
pub use estimator::{
    DEFAULT_MIN_DATA_POINTS, RegressionDiagnostics, RegressionResult, TrendEstimator,
};
pub use threshold::SigmaThreshold;
