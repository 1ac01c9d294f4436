//! Monitor - periodic breakout passes
//!
//! One cycle:
//!
//! ```text
//!   SeriesSource::fetch ──► window(n) ──► BreakoutAnalyzer::run_pass
//!                                                │
//!                     ┌──────────────────────────┤
//!                     ▼                          ▼
//!         sink.publish(event)         sink.publish_compound(events)
//!         (every event)               (compound passes only)
//! ```
//!
//! Fetch and sink failures are logged; the loop keeps going.

use crate::config::RunnerConfig;
use breakwatch_core::BreakoutEvent;
use breakwatch_detector::{BreakoutAnalyzer, PassReport};
use breakwatch_ports::{BreakoutSink, SeriesSource, SinkError, SourceResult};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;

/// Totals across a monitor run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonitorSummary {
    /// Passes that ran (fetch succeeded)
    pub passes: u64,
    pub failed_fetches: u64,
    pub events: u64,
    pub compound_passes: u64,
    pub series_failures: u64,
    pub sink_errors: u64,
}

/// Drives a source, the analyzer and a set of sinks
pub struct Monitor {
    analyzer: BreakoutAnalyzer,
    source: Box<dyn SeriesSource>,
    sinks: Vec<Arc<dyn BreakoutSink>>,
    window: usize,
    interval: Duration,
    max_passes: Option<u64>,
    summary: MonitorSummary,
}

impl Monitor {
    pub fn new(config: &RunnerConfig, source: Box<dyn SeriesSource>) -> Self {
        Self {
            analyzer: BreakoutAnalyzer::new(config.analyzer),
            source,
            sinks: Vec::new(),
            window: config.window,
            interval: config.interval(),
            max_passes: config.max_passes,
            summary: MonitorSummary::default(),
        }
    }

    /// Register a sink; events are delivered to sinks in registration order
    pub fn add_sink(&mut self, sink: Arc<dyn BreakoutSink>) {
        log::debug!("Registered sink {}", sink.name());
        self.sinks.push(sink);
    }

    pub fn with_sink(mut self, sink: Arc<dyn BreakoutSink>) -> Self {
        self.add_sink(sink);
        self
    }

    pub fn analyzer(&self) -> &BreakoutAnalyzer {
        &self.analyzer
    }

    pub fn summary(&self) -> &MonitorSummary {
        &self.summary
    }

    /// Fetch once, analyze, deliver
    pub async fn run_once(&mut self) -> SourceResult<PassReport> {
        let batch = match self.source.fetch().await {
            Ok(batch) => batch,
            Err(e) => {
                self.summary.failed_fetches += 1;
                log::warn!("{} fetch failed: {}", self.source.name(), e);
                return Err(e);
            }
        };

        let batch = if self.window > 0 {
            batch.window(self.window)
        } else {
            batch
        };
        let report = self.analyzer.run_pass(&batch);

        self.summary.passes += 1;
        self.summary.events += report.event_count() as u64;
        self.summary.series_failures += report.failures.len() as u64;

        for event in &report.events {
            self.deliver(event);
        }
        if report.is_compound() {
            self.summary.compound_passes += 1;
            log::warn!(
                "Compound pass: {} simultaneous breakouts across {:?}",
                report.event_count(),
                report.chart_types()
            );
            self.deliver_compound(&report.events);
        }

        Ok(report)
    }

    /// Run passes on the configured interval until `max_passes` is reached
    pub async fn run(&mut self) -> MonitorSummary {
        self.run_until(std::future::pending::<()>()).await
    }

    /// Like `run`, but also stops when `shutdown` completes
    pub async fn run_until<F>(&mut self, shutdown: F) -> MonitorSummary
    where
        F: Future<Output = ()>,
    {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        let mut attempts: u64 = 0;
        loop {
            if let Some(max) = self.max_passes
                && attempts >= max
            {
                break;
            }

            tokio::select! {
                _ = &mut shutdown => {
                    log::info!("Shutdown requested");
                    break;
                }
                _ = ticker.tick() => {
                    attempts += 1;
                    // Errors are already counted and logged
                    let _ = self.run_once().await;
                }
            }
        }

        log::info!(
            "Monitor stopped after {} passes: {} events, {} compound, {} failed fetches",
            self.summary.passes,
            self.summary.events,
            self.summary.compound_passes,
            self.summary.failed_fetches
        );
        self.summary.clone()
    }

    fn deliver(&mut self, event: &BreakoutEvent) {
        for sink in &self.sinks {
            if let Err(e) = sink.publish(event) {
                record_sink_error(&mut self.summary, sink.name(), e);
            }
        }
    }

    fn deliver_compound(&mut self, events: &[BreakoutEvent]) {
        for sink in &self.sinks {
            if let Err(e) = sink.publish_compound(events) {
                record_sink_error(&mut self.summary, sink.name(), e);
            }
        }
    }
}

fn record_sink_error(summary: &mut MonitorSummary, sink: &str, error: SinkError) {
    summary.sink_errors += 1;
    match error {
        SinkError::Disabled => log::debug!("{} is disabled, notice dropped", sink),
        other => log::warn!("{} delivery failed: {}", sink, other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use breakwatch_core::SeriesBatch;
    use breakwatch_ports::{SinkResult, SourceError};
    use std::sync::Mutex;

    struct FailingSource;

    #[async_trait]
    impl SeriesSource for FailingSource {
        async fn fetch(&mut self) -> SourceResult<SeriesBatch> {
            Err(SourceError::Unavailable("offline".to_string()))
        }
    }

    struct EmptySource;

    #[async_trait]
    impl SeriesSource for EmptySource {
        async fn fetch(&mut self) -> SourceResult<SeriesBatch> {
            Ok(SeriesBatch::new())
        }
    }

    #[derive(Default)]
    struct CountingSink {
        published: Mutex<usize>,
    }

    impl BreakoutSink for CountingSink {
        fn publish(&self, _event: &BreakoutEvent) -> SinkResult<()> {
            *self.published.lock().unwrap() += 1;
            Ok(())
        }
    }

    fn config(max_passes: u64) -> RunnerConfig {
        RunnerConfig {
            interval_secs: 1,
            max_passes: Some(max_passes),
            ..Default::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_fetches_do_not_stop_loop() {
        let mut monitor = Monitor::new(&config(3), Box::new(FailingSource));
        let summary = monitor.run().await;

        assert_eq!(summary.passes, 0);
        assert_eq!(summary.failed_fetches, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_batches() {
        let sink = Arc::new(CountingSink::default());
        let mut monitor =
            Monitor::new(&config(2), Box::new(EmptySource)).with_sink(sink.clone());
        let summary = monitor.run().await;

        assert_eq!(summary.passes, 2);
        assert_eq!(summary.events, 0);
        assert_eq!(*sink.published.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_shutdown_stops_unbounded_run() {
        let config = RunnerConfig {
            interval_secs: 3600,
            ..Default::default()
        };
        let mut monitor = Monitor::new(&config, Box::new(EmptySource));

        // First tick fires immediately, then the shutdown future wins
        let summary = monitor
            .run_until(tokio::time::sleep(Duration::from_millis(20)))
            .await;
        assert_eq!(summary.passes, 1);
    }
}
