//! Breakwatch Alerts
//!
//! Rendering and delivery of breakout notices:
//!
//! - **AlertFormatter**: chart-aware titles, bodies and tags for single
//!   breakouts, multi-breakout summaries and regression anomalies
//! - **Sinks**: `BreakoutSink` implementations for logs and broadcast
//!   subscribers
//!
//! ```text
//! BreakoutEvent ──► AlertFormatter ──► Notice ──┬──► LogSink (log facade)
//!                                               └──► ChannelSink ──► subscribers
//! ```

pub mod formatter;
pub mod notice;
pub mod sink;

pub use formatter::{AlertFormatter, ValueStyle, chart_label};
pub use notice::{Notice, NoticeKind};
pub use sink::{ChannelSink, LogSink};
