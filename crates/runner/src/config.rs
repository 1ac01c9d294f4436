//! Runner configuration
//!
//! Loaded from a JSON file; every field has a default so a partial file (or
//! none at all) is valid. A few common knobs can be overridden from the
//! environment:
//!
//! ```text
//!   BREAKWATCH_SIGMA_THRESHOLD   analyzer.sigma_threshold (clamped to [1, 5])
//!   BREAKWATCH_MIN_POINTS        analyzer.min_data_points
//!   BREAKWATCH_ENABLED           analyzer.enabled (true/false/1/0)
//!   BREAKWATCH_INTERVAL_SECS     interval_secs
//! ```

use crate::synthetic::SyntheticConfig;
use breakwatch_detector::AnalyzerConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

pub const ENV_SIGMA_THRESHOLD: &str = "BREAKWATCH_SIGMA_THRESHOLD";
pub const ENV_MIN_POINTS: &str = "BREAKWATCH_MIN_POINTS";
pub const ENV_ENABLED: &str = "BREAKWATCH_ENABLED";
pub const ENV_INTERVAL_SECS: &str = "BREAKWATCH_INTERVAL_SECS";

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {error}")]
    Io { path: String, error: String },

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid value '{value}' for {var}")]
    InvalidEnv { var: String, value: String },
}

/// Root configuration for the monitor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Detection settings
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Seconds between passes
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    /// Number of most recent observations analyzed per series
    #[serde(default = "default_window")]
    pub window: usize,

    /// Stop after this many passes (runs until interrupted when absent)
    #[serde(default)]
    pub max_passes: Option<u64>,

    /// JSON snapshot re-read every cycle
    #[serde(default)]
    pub snapshot_path: Option<String>,

    /// Generator used when no snapshot is configured
    #[serde(default)]
    pub synthetic: SyntheticConfig,
}

fn default_interval_secs() -> u64 {
    60
}

fn default_window() -> usize {
    168 // 7 days of hourly points
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            analyzer: AnalyzerConfig::default(),
            interval_secs: default_interval_secs(),
            window: default_window(),
            max_passes: None,
            snapshot_path: None,
            synthetic: SyntheticConfig::default(),
        }
    }
}

impl RunnerConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        Self::from_json(&content)
    }

    /// Parse configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply overrides from the process environment
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|var| std::env::var(var).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_SIGMA_THRESHOLD) {
            let k: f64 = parse_var(ENV_SIGMA_THRESHOLD, &raw)?;
            self.analyzer = self.analyzer.with_sigma_threshold(k);
        }
        if let Some(raw) = lookup(ENV_MIN_POINTS) {
            let n: usize = parse_var(ENV_MIN_POINTS, &raw)?;
            self.analyzer = self.analyzer.with_min_data_points(n);
        }
        if let Some(raw) = lookup(ENV_ENABLED) {
            let enabled = match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => return Err(invalid(ENV_ENABLED, &raw)),
            };
            self.analyzer = self.analyzer.with_enabled(enabled);
        }
        if let Some(raw) = lookup(ENV_INTERVAL_SECS) {
            self.interval_secs = parse_var(ENV_INTERVAL_SECS, &raw)?;
        }
        Ok(())
    }

    /// Pass interval, never shorter than one second
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs.max(1))
    }
}

fn parse_var<T: std::str::FromStr>(var: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| invalid(var, raw))
}

fn invalid(var: &str, raw: &str) -> ConfigError {
    ConfigError::InvalidEnv {
        var: var.to_string(),
        value: raw.to_string(),
    }
}
