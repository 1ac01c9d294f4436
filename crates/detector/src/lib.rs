//! Breakwatch Detector
//!
//! Edge-triggered sigma-breakout detection over hourly series:
//!
//! - **Breakout Detector**: fits the current window, judges the last two points
//!   against the sigma band, fires on an inside → outside crossing
//! - **Prior State**: last analyzed point per series, for diagnostics
//! - **Analyzer**: one pass over every tracked series, failures isolated per
//!   series
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     BreakoutAnalyzer                         │
//! │                                                             │
//! │  SeriesBatch ──► per series ──► TrendEstimator (OLS + σ)    │
//! │                        │                                    │
//! │                        ▼                                    │
//! │                 BreakoutDetector ──► PriorStateStore        │
//! │                        │                                    │
//! │                        ▼                                    │
//! │                   PassReport (events, counters, failures)   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//!                        BreakoutSink
//! ```
//!
//! The analyzer is synchronous: one pass at a time, driven by an external
//! scheduler.

pub mod analyzer;
pub mod config;
pub mod detector;
pub mod report;
pub mod state;

// Re-export main types
pub use analyzer::BreakoutAnalyzer;
pub use config::AnalyzerConfig;
pub use detector::{BreakoutDetector, SeriesOutcome};
pub use report::{PassReport, SeriesFailure};
pub use state::{PriorState, PriorStateStore};
