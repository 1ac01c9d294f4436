//! Breakwatch Ports
//!
//! Port definitions (traits) for the Breakwatch detection engine.
//! These define the boundaries between detection logic and the collaborators
//! that feed it series and consume its events.

mod error;
mod sink;
mod source;

pub use error::{AnalysisError, AnalysisResult, SinkError, SinkResult, SourceError, SourceResult};
pub use sink::BreakoutSink;
pub use source::SeriesSource;
