//! Breakout Detector
//!
//! Classifies the most recent transition of a series against its sigma band:
//!
//! ```text
//!   previous point   current point    result
//!   ─────────────    ─────────────    ──────────────────
//!   inside band      outside band     BreakoutEvent
//!   inside band      inside band      nothing
//!   outside band     outside band     nothing (already fired at the crossing)
//!   outside band     inside band      nothing
//! ```
//!
//! Both points are judged against the same fit of the current window, so the
//! decision is self-contained per cycle.

use crate::config::AnalyzerConfig;
use crate::state::{PriorState, PriorStateStore};
use breakwatch_core::{BreakoutEvent, ChartType, Direction, Series, SeriesKey};
use breakwatch_ports::{AnalysisError, AnalysisResult};
use breakwatch_regression::{RegressionResult, TrendEstimator};

/// Outcome of analyzing one series in one cycle
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesOutcome {
    /// Fewer clean points than the configured minimum
    InsufficientData,
    /// Residual std is zero: the band has no width, no event is raised
    Degenerate,
    /// Fitted, no inside → outside transition
    NoBreakout,
    Breakout(BreakoutEvent),
}

impl SeriesOutcome {
    pub fn into_event(self) -> Option<BreakoutEvent> {
        match self {
            SeriesOutcome::Breakout(event) => Some(event),
            _ => None,
        }
    }
}

/// Edge-triggered sigma-breakout detector
pub struct BreakoutDetector {
    estimator: TrendEstimator,
    states: PriorStateStore,
}

impl BreakoutDetector {
    pub fn new(config: &AnalyzerConfig) -> Self {
        Self::with_store(config, PriorStateStore::new())
    }

    /// Use an existing (possibly shared) state store
    pub fn with_store(config: &AnalyzerConfig, states: PriorStateStore) -> Self {
        Self {
            estimator: config.estimator(),
            states,
        }
    }

    pub fn estimator(&self) -> &TrendEstimator {
        &self.estimator
    }

    pub fn states(&self) -> &PriorStateStore {
        &self.states
    }

    /// Detect a breakout at the latest point of `series`
    pub fn detect_breakout(
        &self,
        series: &Series,
        name: &str,
        chart_type: ChartType,
    ) -> AnalysisResult<Option<BreakoutEvent>> {
        let key = SeriesKey::new(name, chart_type);
        Ok(self.analyze(series, &key)?.into_event())
    }

    /// Full per-series analysis, including the reason no event was raised
    pub fn analyze(&self, series: &Series, key: &SeriesKey) -> AnalysisResult<SeriesOutcome> {
        if let Some(index) = series.first_unordered() {
            return Err(AnalysisError::UnorderedTimestamps { index });
        }
        if let Some(index) = series.first_infinite() {
            return Err(AnalysisError::NonFiniteValue { index });
        }

        let clean = series.cleaned();
        let Some(fit) = self.fit(&clean.values)? else {
            return Ok(SeriesOutcome::InsufficientData);
        };

        let (Some(previous), Some(current)) = (clean.previous(), clean.last()) else {
            return Ok(SeriesOutcome::InsufficientData);
        };
        let (prev_index, _, prev_value) = previous;
        let (cur_index, cur_timestamp, cur_value) = current;

        let prev_band = fit.band_at(prev_index);
        let cur_band = fit.band_at(cur_index);

        let degenerate = fit.is_degenerate();
        let within_now = degenerate || cur_band.contains(cur_value);
        self.states.record(
            key,
            PriorState {
                timestamp: cur_timestamp,
                value: cur_value,
                expected: cur_band.expected,
                within_boundaries: within_now,
            },
        );

        if degenerate {
            log::debug!("{}: degenerate fit (residual std ~ 0)", key);
            return Ok(SeriesOutcome::Degenerate);
        }

        let previous_within = prev_band.contains(prev_value);
        let direction = if cur_band.is_above(cur_value) {
            Some(Direction::Above)
        } else if cur_band.is_below(cur_value) {
            Some(Direction::Below)
        } else {
            None
        };

        match direction {
            Some(direction) if previous_within => {
                let event = BreakoutEvent {
                    series_name: key.name.clone(),
                    chart_type: key.chart_type,
                    timestamp: cur_timestamp,
                    current_value: cur_value,
                    expected_value: cur_band.expected,
                    sigma_level: fit.sigma_level(cur_value, cur_index),
                    direction,
                    confidence: fit.confidence(),
                };
                log::debug!(
                    "{}: breakout {} at {:.4} (expected {:.4}, {:.2}σ)",
                    key,
                    direction,
                    cur_value,
                    cur_band.expected,
                    event.sigma_level
                );
                Ok(SeriesOutcome::Breakout(event))
            }
            _ => Ok(SeriesOutcome::NoBreakout),
        }
    }

    /// Fit the clean values of a series; `None` means insufficient data
    pub fn fit(&self, values: &[f64]) -> AnalysisResult<Option<RegressionResult>> {
        self.estimator
            .fit(values)
            .map_err(|e| AnalysisError::Numerical(e.to_string()))
    }
}
