//! Monitor Integration Test
//!
//! Full fetch → pass → notify cycles with:
//! - Scripted batches (ramp, then jump)
//! - JSON snapshots on disk
//! - Seeded synthetic series with an injected shift

use async_trait::async_trait;
use breakwatch_alerts::{ChannelSink, NoticeKind};
use breakwatch_core::{ChartType, Series, SeriesBatch, Timestamp};
use breakwatch_ports::{SeriesSource, SourceError, SourceResult};
use breakwatch_runner::{
    BreakoutInjection, JsonSnapshotSource, Monitor, RunnerConfig, SyntheticConfig,
    SyntheticSeries, SyntheticSource,
};
use chrono::{TimeZone, Utc};
use std::collections::VecDeque;
use std::sync::Arc;

fn start() -> Timestamp {
    Utc.with_ymd_and_hms(2025, 4, 1, 0, 0, 0).unwrap()
}

fn ramp(extra: &[f64]) -> Series {
    let mut values: Vec<f64> = (0..168).map(|i| 100.0 + i as f64 * 100.0 / 167.0).collect();
    values.extend_from_slice(extra);
    Series::hourly(start(), values)
}

/// Replays prepared batches, then reports itself unavailable
struct ScriptedSource {
    batches: VecDeque<SeriesBatch>,
}

impl ScriptedSource {
    fn new(batches: Vec<SeriesBatch>) -> Self {
        Self {
            batches: batches.into(),
        }
    }
}

#[async_trait]
impl SeriesSource for ScriptedSource {
    async fn fetch(&mut self) -> SourceResult<SeriesBatch> {
        self.batches
            .pop_front()
            .ok_or_else(|| SourceError::Unavailable("script exhausted".to_string()))
    }
}

fn quick_config(passes: u64) -> RunnerConfig {
    RunnerConfig {
        interval_secs: 1,
        max_passes: Some(passes),
        ..Default::default()
    }
}

#[tokio::test(start_paused = true)]
async fn test_breakout_notified_once_across_cycles() {
    let _ = env_logger::try_init();

    let batches = vec![
        SeriesBatch::new().with(ChartType::Prices, "BTC-USD", ramp(&[])),
        SeriesBatch::new().with(ChartType::Prices, "BTC-USD", ramp(&[400.0])),
        SeriesBatch::new().with(ChartType::Prices, "BTC-USD", ramp(&[400.0, 400.0])),
        SeriesBatch::new().with(ChartType::Prices, "BTC-USD", ramp(&[400.0, 400.0, 400.0])),
    ];
    let sink = Arc::new(ChannelSink::new());
    let mut rx = sink.subscribe();

    let mut monitor =
        Monitor::new(&quick_config(5), Box::new(ScriptedSource::new(batches))).with_sink(sink.clone());
    let summary = monitor.run().await;

    assert_eq!(summary.passes, 4);
    assert_eq!(summary.failed_fetches, 1);
    assert_eq!(summary.events, 1);
    assert_eq!(summary.compound_passes, 0);

    let notice = rx.try_recv().unwrap();
    assert_eq!(notice.kind, NoticeKind::Breakout);
    assert_eq!(notice.tag, "statistical_prices_btc_usd");
    assert!(notice.title.contains("📈"));
    assert!(rx.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn test_compound_pass_sends_summary() {
    let batch = SeriesBatch::new()
        .with(ChartType::Trends, "Bitcoin", ramp(&[400.0]))
        .with(ChartType::Prices, "BTC-USD", ramp(&[-100.0]))
        .with(ChartType::Volume, "BTC", ramp(&[400.0]))
        .with(ChartType::Volume, "ETH", ramp(&[]));
    let sink = Arc::new(ChannelSink::new());
    let mut rx = sink.subscribe();

    let mut monitor =
        Monitor::new(&quick_config(1), Box::new(ScriptedSource::new(vec![batch]))).with_sink(sink.clone());
    let summary = monitor.run().await;

    assert_eq!(summary.events, 3);
    assert_eq!(summary.compound_passes, 1);

    let kinds: Vec<NoticeKind> = std::iter::from_fn(|| rx.try_recv().ok())
        .map(|n| n.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            NoticeKind::Breakout,
            NoticeKind::Breakout,
            NoticeKind::Breakout,
            NoticeKind::MultipleBreakouts
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_disabled_sink_counts_errors() {
    let batch = SeriesBatch::new().with(ChartType::Trends, "Bitcoin", ramp(&[400.0]));
    let sink = Arc::new(ChannelSink::new());
    sink.disable();

    let mut monitor =
        Monitor::new(&quick_config(1), Box::new(ScriptedSource::new(vec![batch]))).with_sink(sink);
    let summary = monitor.run().await;

    assert_eq!(summary.events, 1);
    assert_eq!(summary.sink_errors, 1);
}

#[tokio::test]
async fn test_snapshot_source_and_config_files() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot_path = dir.path().join("series.json");
    let config_path = dir.path().join("breakwatch.json");

    let batch = SeriesBatch::new()
        .with(ChartType::Volume, "BTC", ramp(&[400.0]))
        .with(ChartType::Trends, "Cardano", Series::hourly(start(), [1.0, 2.0]));
    std::fs::write(&snapshot_path, serde_json::to_string(&batch).unwrap()).unwrap();
    std::fs::write(
        &config_path,
        format!(
            r#"{{ "snapshot_path": {:?}, "max_passes": 1, "analyzer": {{ "sigma_threshold": 3.0 }} }}"#,
            snapshot_path.display().to_string()
        ),
    )
    .unwrap();

    let config = RunnerConfig::from_file(&config_path).unwrap();
    assert_eq!(config.analyzer.sigma_threshold.value(), 3.0);

    let path = config.snapshot_path.clone().unwrap();
    let mut monitor = Monitor::new(&config, Box::new(JsonSnapshotSource::new(path)));
    let report = monitor.run_once().await.unwrap();

    assert_eq!(report.event_count(), 1);
    assert_eq!(report.insufficient, 1);
    assert_eq!(report.events[0].series_name, "BTC");
}

#[tokio::test(start_paused = true)]
async fn test_synthetic_shift_detected() {
    let config = SyntheticConfig {
        seed: Some(2024),
        breakout: Some(BreakoutInjection {
            at_point: 168,
            magnitude: 12.0,
        }),
        ..Default::default()
    };
    let series_count = config.series.len();
    let source = SyntheticSource::starting_at(config, start());

    let mut monitor = Monitor::new(&quick_config(2), Box::new(source));
    let first = monitor.run_once().await.unwrap();
    let second = monitor.run_once().await.unwrap();

    assert_eq!(first.analyzed, series_count);
    // Every series jumps by 12 noise stds on the second pass
    assert!(
        second.event_count() >= series_count - 1,
        "only {} of {} series fired",
        second.event_count(),
        series_count
    );
    assert!(second.is_compound());
}

#[test]
fn test_custom_synthetic_series_from_json() {
    let json = r#"{
        "synthetic": {
            "series": [ { "name": "SOL", "chart_type": "prices", "base": 150.0 } ],
            "history": 72,
            "seed": 5
        }
    }"#;
    let config = RunnerConfig::from_json(json).unwrap();

    assert_eq!(
        config.synthetic.series,
        vec![SyntheticSeries {
            base: 150.0,
            ..SyntheticSeries::new("SOL", ChartType::Prices)
        }]
    );
    assert_eq!(config.synthetic.history, 72);
    assert_eq!(config.synthetic.seed, Some(5));
}
