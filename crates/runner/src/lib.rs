//! Breakwatch Runner - Breakout Monitor
//!
//! Drives the detection engine on a fixed interval:
//!
//! - **Config**: JSON file plus environment overrides
//! - **Sources**: JSON snapshot re-read every cycle, or a seeded synthetic
//!   generator
//! - **Monitor**: fetch → pass → notify loop
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────┐      ┌──────────────────────┐
//!   │ JsonSnapshotSource   │  or  │ SyntheticSource      │
//!   └──────────┬───────────┘      └──────────┬───────────┘
//!              └──────────────┬──────────────┘
//!                             │ SeriesBatch
//!                             ▼
//!               ┌───────────────────────────┐
//!               │  Monitor (tokio interval) │
//!               │    BreakoutAnalyzer       │
//!               └─────────────┬─────────────┘
//!                             │ BreakoutEvent
//!                             ▼
//!               ┌───────────────────────────┐
//!               │  LogSink / ChannelSink    │
//!               └───────────────────────────┘
//! ```

pub mod config;
pub mod monitor;
pub mod snapshot;
pub mod synthetic;

// Re-export main types
pub use config::{ConfigError, RunnerConfig};
pub use monitor::{Monitor, MonitorSummary};
pub use snapshot::JsonSnapshotSource;
pub use synthetic::{BreakoutInjection, SyntheticConfig, SyntheticSeries, SyntheticSource};
