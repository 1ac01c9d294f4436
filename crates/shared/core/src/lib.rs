//! Breakwatch Core Domain
//!
//! Pure domain types for sigma-breakout detection.
//! This crate contains no async, no I/O, and is 100% unit testable.

pub mod entities;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{
    BreakoutEvent, ChartType, CleanSeries, Direction, Observation, Series, SeriesBatch, SeriesKey,
};
pub use values::{SeriesName, Timestamp};
