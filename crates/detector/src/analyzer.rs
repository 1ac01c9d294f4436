//! Multi-Series Orchestrator
//!
//! Runs the breakout detector over every series of a batch, one pass per
//! refresh cycle. Series are independent: a failure in one is logged and
//! recorded in the report, the rest of the pass continues.

use crate::config::AnalyzerConfig;
use crate::detector::{BreakoutDetector, SeriesOutcome};
use crate::report::{PassReport, SeriesFailure};
use crate::state::PriorState;
use breakwatch_core::{BreakoutEvent, Series, SeriesBatch, SeriesKey};
use breakwatch_regression::RegressionDiagnostics;

/// Sigma-breakout analyzer with immutable configuration
pub struct BreakoutAnalyzer {
    config: AnalyzerConfig,
    detector: BreakoutDetector,
}

impl BreakoutAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        let detector = BreakoutDetector::new(&config);
        Self { config, detector }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    pub fn detector(&self) -> &BreakoutDetector {
        &self.detector
    }

    /// Run one pass and return the flat list of events
    pub fn analyze_all_series(&self, batch: &SeriesBatch) -> Vec<BreakoutEvent> {
        self.run_pass(batch).into_events()
    }

    /// Run one pass with per-series bookkeeping
    pub fn run_pass(&self, batch: &SeriesBatch) -> PassReport {
        let mut report = PassReport::new(self.config.compound_threshold);
        if !self.config.enabled {
            return report;
        }
        report.ran = true;

        let states = self.detector.states();
        let pass = states.begin_pass();

        for (key, series) in batch.iter() {
            match self.detector.analyze(series, &key) {
                Ok(SeriesOutcome::Breakout(event)) => {
                    report.analyzed += 1;
                    report.events.push(event);
                }
                Ok(SeriesOutcome::NoBreakout) => report.analyzed += 1,
                Ok(SeriesOutcome::Degenerate) => {
                    report.analyzed += 1;
                    report.degenerate += 1;
                }
                Ok(SeriesOutcome::InsufficientData) => report.insufficient += 1,
                Err(error) => {
                    log::warn!("Error analyzing {} for {}: {}", key.chart_type, key.name, error);
                    report.failures.push(SeriesFailure { key, error });
                }
            }
        }

        let evicted = states.evict_idle(self.config.state_idle_passes);
        if evicted > 0 {
            log::debug!("Pass {}: evicted {} idle series states", pass, evicted);
        }

        log::info!(
            "Pass {} ({}): {} series, {} analyzed, {} insufficient, {} failed, {} breakouts",
            pass,
            report.pass_id,
            batch.series_count(),
            report.analyzed,
            report.insufficient,
            report.failures.len(),
            report.events.len()
        );

        report
    }

    /// Regression summary for a single series, `None` if it cannot be fitted
    pub fn diagnostics(&self, series: &Series) -> Option<RegressionDiagnostics> {
        let clean = series.cleaned();
        match self.detector.fit(&clean.values) {
            Ok(fit) => fit.map(|f| f.diagnostics()),
            Err(e) => {
                log::warn!("Diagnostics unavailable: {}", e);
                None
            }
        }
    }

    pub fn prior_state(&self, key: &SeriesKey) -> Option<PriorState> {
        self.detector.states().get(key)
    }

    pub fn state_len(&self) -> usize {
        self.detector.states().len()
    }

    /// Forget all prior states
    pub fn clear_state(&self) {
        self.detector.states().clear();
    }
}

impl Default for BreakoutAnalyzer {
    fn default() -> Self {
        Self::new(AnalyzerConfig::default())
    }
}
