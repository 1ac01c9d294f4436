//! Ordinary least-squares trend estimation
//!
//! The time index is the ordinal position 0..n-1 of each clean value; actual
//! timestamp spacing is ignored.

use crate::{FitResult, RegressionError, SigmaBand, SigmaThreshold};
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, StudentsT};

/// Default minimum number of clean points for a fit (two days of hourly data)
pub const DEFAULT_MIN_DATA_POINTS: usize = 48;

/// Smallest window with a defined slope p-value (n - 2 degrees of freedom)
const MIN_FIT_POINTS: usize = 3;

/// Means below this magnitude do not normalize the RMSE
const NEAR_ZERO_MEAN: f64 = 1e-10;

/// Guards the t statistic against r = ±1
const TINY: f64 = 1e-20;

/// Fits trend lines with a fixed threshold and minimum window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendEstimator {
    threshold: SigmaThreshold,
    min_data_points: usize,
}

impl Default for TrendEstimator {
    fn default() -> Self {
        Self::new(SigmaThreshold::DEFAULT, DEFAULT_MIN_DATA_POINTS)
    }
}

impl TrendEstimator {
    pub fn new(threshold: SigmaThreshold, min_data_points: usize) -> Self {
        Self {
            threshold,
            min_data_points: min_data_points.max(MIN_FIT_POINTS),
        }
    }

    pub fn threshold(&self) -> SigmaThreshold {
        self.threshold
    }

    pub fn min_data_points(&self) -> usize {
        self.min_data_points
    }

    /// Fit `values` (missing entries already removed)
    ///
    /// Returns `Ok(None)` when there are fewer than `min_data_points` values.
    pub fn fit(&self, values: &[f64]) -> FitResult<Option<RegressionResult>> {
        let n = values.len();
        if n < self.min_data_points {
            return Ok(None);
        }
        if let Some(pos) = values.iter().position(|v| !v.is_finite()) {
            return Err(RegressionError::NonFinite(pos));
        }

        let nf = n as f64;
        let x_mean = (nf - 1.0) / 2.0;
        let y_mean = values.iter().sum::<f64>() / nf;

        let mut sxx = 0.0;
        let mut sxy = 0.0;
        let mut syy = 0.0;
        for (i, &y) in values.iter().enumerate() {
            let dx = i as f64 - x_mean;
            let dy = y - y_mean;
            sxx += dx * dx;
            sxy += dx * dy;
            syy += dy * dy;
        }

        let slope = sxy / sxx;
        let intercept = y_mean - slope * x_mean;

        let r_value = if syy == 0.0 {
            0.0
        } else {
            (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0)
        };

        let df = nf - 2.0;
        let p_value = Self::slope_p_value(r_value, df)?;
        let std_err = ((1.0 - r_value * r_value).max(0.0) * syy / sxx / df).sqrt();

        let predicted: Vec<f64> = (0..n).map(|i| slope * i as f64 + intercept).collect();
        let residuals: Vec<f64> = values
            .iter()
            .zip(&predicted)
            .map(|(y, p)| y - p)
            .collect();

        let rmse = (residuals.iter().map(|r| r * r).sum::<f64>() / nf).sqrt();
        let normalized_rmse = if y_mean.abs() < NEAR_ZERO_MEAN {
            rmse
        } else {
            rmse / y_mean.abs()
        };

        let residual_mean = residuals.iter().sum::<f64>() / nf;
        let residual_std = (residuals
            .iter()
            .map(|r| (r - residual_mean).powi(2))
            .sum::<f64>()
            / (nf - 1.0))
            .sqrt();

        // Residual std within accumulated rounding error of the values is zero
        let scale = values.iter().map(|v| v.abs()).sum::<f64>() / nf;
        let degenerate = residual_std <= f64::EPSILON * nf * scale.max(1.0);

        let half_width = self.threshold.value() * residual_std;
        let lower = predicted.iter().map(|p| p - half_width).collect();
        let upper = predicted.iter().map(|p| p + half_width).collect();

        Ok(Some(RegressionResult {
            slope,
            intercept,
            r_value,
            p_value,
            std_err,
            residual_std,
            rmse,
            normalized_rmse,
            residuals,
            lower,
            upper,
            threshold: self.threshold,
            degenerate,
        }))
    }

    /// Two-sided p-value for H0: slope = 0
    fn slope_p_value(r: f64, df: f64) -> FitResult<f64> {
        if r == 0.0 {
            return Ok(1.0);
        }
        let t = r * (df / ((1.0 - r + TINY) * (1.0 + r + TINY))).sqrt();
        if !t.is_finite() {
            return Ok(0.0);
        }
        let dist = StudentsT::new(0.0, 1.0, df)
            .map_err(|e| RegressionError::Distribution(e.to_string()))?;
        Ok((2.0 * dist.sf(t.abs())).clamp(0.0, 1.0))
    }
}

/// Fitted trend line with residual statistics and sigma boundaries
#[derive(Debug, Clone, PartialEq)]
pub struct RegressionResult {
    pub slope: f64,
    pub intercept: f64,
    /// Pearson correlation between time index and value
    pub r_value: f64,
    /// Two-sided significance of the slope
    pub p_value: f64,
    /// Standard error of the slope
    pub std_err: f64,
    /// Residual standard deviation (n - 1 denominator)
    pub residual_std: f64,
    pub rmse: f64,
    /// RMSE / |mean|, or RMSE itself for near-zero means
    pub normalized_rmse: f64,
    pub residuals: Vec<f64>,
    lower: Vec<f64>,
    upper: Vec<f64>,
    threshold: SigmaThreshold,
    degenerate: bool,
}

impl RegressionResult {
    /// Number of points in the fit
    pub fn len(&self) -> usize {
        self.residuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residuals.is_empty()
    }

    pub fn r_squared(&self) -> f64 {
        self.r_value * self.r_value
    }

    pub fn threshold(&self) -> SigmaThreshold {
        self.threshold
    }

    /// Residual std is numerically zero (constant series or perfect fit)
    pub fn is_degenerate(&self) -> bool {
        self.degenerate
    }

    /// Trend value at an ordinal position (may extrapolate)
    pub fn predicted(&self, index: usize) -> f64 {
        self.slope * index as f64 + self.intercept
    }

    /// Band at an ordinal position; the width is constant across positions
    pub fn band_at(&self, index: usize) -> SigmaBand {
        SigmaBand::new(
            self.predicted(index),
            self.threshold.value() * self.residual_std,
        )
    }

    /// Per-timestep (lower, upper) boundaries, one entry per fitted point
    pub fn boundaries(&self) -> (&[f64], &[f64]) {
        (&self.lower, &self.upper)
    }

    /// Distance from the trend in residual standard deviations (0 for degenerate fits)
    pub fn sigma_level(&self, value: f64, index: usize) -> f64 {
        if self.degenerate {
            return 0.0;
        }
        (value - self.predicted(index)).abs() / self.residual_std
    }

    /// `|r| * 100 * (1 - p)`, capped at 100
    ///
    /// A heuristic blend of fit strength and slope significance, not a
    /// calibrated probability.
    pub fn confidence(&self) -> f64 {
        (self.r_value.abs() * 100.0 * (1.0 - self.p_value)).clamp(0.0, 100.0)
    }

    pub fn diagnostics(&self) -> RegressionDiagnostics {
        RegressionDiagnostics {
            slope: self.slope,
            intercept: self.intercept,
            r_squared: self.r_squared(),
            p_value: self.p_value,
            rmse: self.rmse,
            normalized_rmse: self.normalized_rmse,
            sigma_threshold: self.threshold.value(),
            data_points: self.len(),
        }
    }
}

/// Summary of a fit for dashboards and logs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionDiagnostics {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
    pub p_value: f64,
    pub rmse: f64,
    pub normalized_rmse: f64,
    pub sigma_threshold: f64,
    pub data_points: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn estimator(k: f64, min_points: usize) -> TrendEstimator {
        TrendEstimator::new(SigmaThreshold::new(k), min_points)
    }

    #[test]
    fn test_insufficient_data() {
        let values: Vec<f64> = (0..47).map(f64::from).collect();
        assert!(TrendEstimator::default().fit(&values).unwrap().is_none());

        let values: Vec<f64> = (0..48).map(f64::from).collect();
        assert!(TrendEstimator::default().fit(&values).unwrap().is_some());
    }

    #[test]
    fn test_min_points_floor() {
        assert_eq!(estimator(2.0, 0).min_data_points(), 3);
        assert!(estimator(2.0, 0).fit(&[1.0, 2.0]).unwrap().is_none());
    }

    #[test]
    fn test_hand_computed_fit() {
        // x = 0..3, y = [0, 1, 0, 1]
        let fit = estimator(2.0, 3).fit(&[0.0, 1.0, 0.0, 1.0]).unwrap().unwrap();

        assert_abs_diff_eq!(fit.slope, 0.2, epsilon = 1e-12);
        assert_abs_diff_eq!(fit.intercept, 0.2, epsilon = 1e-12);
        assert_abs_diff_eq!(fit.r_value, 1.0 / 5f64.sqrt(), epsilon = 1e-12);
        assert_abs_diff_eq!(fit.rmse, 0.2f64.sqrt(), epsilon = 1e-12);
        // sum of squared residuals 0.8 over n - 1 = 3
        assert_abs_diff_eq!(fit.residual_std, (0.8f64 / 3.0).sqrt(), epsilon = 1e-12);
        assert_abs_diff_eq!(fit.normalized_rmse, 0.2f64.sqrt() / 0.5, epsilon = 1e-12);
        assert!(fit.p_value > 0.05 && fit.p_value < 1.0);
        assert!(!fit.is_degenerate());

        let band = fit.band_at(3);
        assert_abs_diff_eq!(band.expected, 0.8, epsilon = 1e-12);
        assert_abs_diff_eq!(band.upper - band.expected, 2.0 * fit.residual_std, epsilon = 1e-12);
    }

    #[test]
    fn test_perfect_line_is_degenerate() {
        let values: Vec<f64> = (0..168).map(|i| 100.0 + i as f64 * 100.0 / 167.0).collect();
        let fit = TrendEstimator::default().fit(&values).unwrap().unwrap();

        assert_abs_diff_eq!(fit.slope, 100.0 / 167.0, epsilon = 1e-9);
        assert_abs_diff_eq!(fit.intercept, 100.0, epsilon = 1e-9);
        assert_abs_diff_eq!(fit.r_squared(), 1.0, epsilon = 1e-9);
        assert!(fit.p_value < 1e-9);
        assert!(fit.residual_std < 1e-9);
        assert!(fit.is_degenerate());
        assert_eq!(fit.sigma_level(400.0, 167), 0.0);
    }

    #[test]
    fn test_constant_series() {
        let fit = estimator(2.0, 10).fit(&[50.0; 60]).unwrap().unwrap();

        assert_eq!(fit.slope, 0.0);
        assert_eq!(fit.r_value, 0.0);
        assert_eq!(fit.p_value, 1.0);
        assert_eq!(fit.residual_std, 0.0);
        assert!(fit.is_degenerate());
        assert_eq!(fit.sigma_level(55.0, 59), 0.0);
        assert_eq!(fit.confidence(), 0.0);
    }

    #[test]
    fn test_small_noise_on_large_level_is_not_degenerate() {
        let values: Vec<f64> = (0..169)
            .map(|i| match i {
                168 => 1e12 + 1000.0,
                _ if i % 2 == 0 => 1e12 + 10.0,
                _ => 1e12 - 10.0,
            })
            .collect();
        let fit = TrendEstimator::default().fit(&values).unwrap().unwrap();

        assert!(!fit.is_degenerate());
        assert!(fit.residual_std > 50.0 && fit.residual_std < 100.0);
        assert!(fit.sigma_level(values[168], 168) > 10.0);
        assert!(fit.sigma_level(values[167], 167) < 2.0);
    }

    #[test]
    fn test_boundaries_match_fitted_length() {
        let values: Vec<f64> = (0..60).map(|i| (i as f64 * 0.7).sin() * 3.0 + i as f64).collect();
        let fit = estimator(3.0, 48).fit(&values).unwrap().unwrap();
        let (lower, upper) = fit.boundaries();

        assert_eq!(lower.len(), values.len());
        assert_eq!(upper.len(), values.len());
        for i in 0..values.len() {
            assert_abs_diff_eq!(upper[i] - lower[i], 6.0 * fit.residual_std, epsilon = 1e-9);
            assert_abs_diff_eq!(upper[i], fit.band_at(i).upper, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_strong_trend_is_significant() {
        let values: Vec<f64> = (0..100)
            .map(|i| 10.0 + 0.5 * i as f64 + if i % 2 == 0 { 1.0 } else { -1.0 })
            .collect();
        let fit = TrendEstimator::default().fit(&values).unwrap().unwrap();

        assert!(fit.r_value > 0.99);
        assert!(fit.p_value < 1e-6);
        assert!(fit.std_err > 0.0);
        assert!(fit.confidence() > 98.0 && fit.confidence() <= 100.0);
    }

    #[test]
    fn test_normalized_rmse_near_zero_mean() {
        let values: Vec<f64> = (0..50).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect();
        let fit = TrendEstimator::default().fit(&values).unwrap().unwrap();
        assert_eq!(fit.normalized_rmse, fit.rmse);
    }

    #[test]
    fn test_non_finite_rejected() {
        let mut values: Vec<f64> = (0..50).map(f64::from).collect();
        values[10] = f64::INFINITY;
        assert_eq!(
            TrendEstimator::default().fit(&values),
            Err(RegressionError::NonFinite(10))
        );
    }

    #[test]
    fn test_diagnostics() {
        let values: Vec<f64> = (0..48).map(|i| i as f64 + (i % 3) as f64).collect();
        let diag = TrendEstimator::default().fit(&values).unwrap().unwrap().diagnostics();

        assert_eq!(diag.data_points, 48);
        assert_eq!(diag.sigma_threshold, 2.0);
        assert!(diag.r_squared > 0.9);
    }
}
