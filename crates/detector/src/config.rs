//! Analyzer configuration
//!
//! Immutable per analyzer instance: build a new analyzer to change settings.

use breakwatch_regression::{DEFAULT_MIN_DATA_POINTS, SigmaThreshold, TrendEstimator};
use serde::{Deserialize, Serialize};

/// Configuration shared by every series in a pass
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Boundary width in residual std units (clamped to [1.0, 5.0])
    #[serde(default)]
    pub sigma_threshold: SigmaThreshold,

    /// Minimum clean points required for a fit
    #[serde(default = "default_min_data_points")]
    pub min_data_points: usize,

    /// When false, passes return immediately with no events
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Prior state for a series untouched for this many passes is evicted
    #[serde(default = "default_state_idle_passes")]
    pub state_idle_passes: u64,

    /// Event count at which a pass counts as a compound event
    #[serde(default = "default_compound_threshold")]
    pub compound_threshold: usize,
}

fn default_min_data_points() -> usize {
    DEFAULT_MIN_DATA_POINTS
}

fn default_enabled() -> bool {
    true
}

fn default_state_idle_passes() -> u64 {
    24
}

fn default_compound_threshold() -> usize {
    3
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            sigma_threshold: SigmaThreshold::DEFAULT,
            min_data_points: default_min_data_points(),
            enabled: default_enabled(),
            state_idle_passes: default_state_idle_passes(),
            compound_threshold: default_compound_threshold(),
        }
    }
}

impl AnalyzerConfig {
    /// Default configuration with analysis switched off
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    /// Set the threshold (clamped)
    pub fn with_sigma_threshold(mut self, k: f64) -> Self {
        self.sigma_threshold = SigmaThreshold::new(k);
        self
    }

    pub fn with_min_data_points(mut self, n: usize) -> Self {
        self.min_data_points = n;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub(crate) fn estimator(&self) -> TrendEstimator {
        TrendEstimator::new(self.sigma_threshold, self.min_data_points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.sigma_threshold.value(), 2.0);
        assert_eq!(config.min_data_points, 48);
        assert!(config.enabled);
        assert_eq!(config.compound_threshold, 3);
        assert!(!AnalyzerConfig::disabled().enabled);
    }

    #[test]
    fn test_threshold_clamped() {
        assert_eq!(AnalyzerConfig::default().with_sigma_threshold(0.1).sigma_threshold.value(), 1.0);
        assert_eq!(AnalyzerConfig::default().with_sigma_threshold(7.5).sigma_threshold.value(), 5.0);
    }

    #[test]
    fn test_partial_json() {
        let config: AnalyzerConfig =
            serde_json::from_str(r#"{"sigma_threshold": 0.5, "enabled": false}"#).unwrap();
        assert_eq!(config.sigma_threshold.value(), 1.0);
        assert!(!config.enabled);
        assert_eq!(config.min_data_points, 48);
        assert_eq!(config.state_idle_passes, 24);
    }
}
