use super::ChartType;
use crate::values::{SeriesName, Timestamp};
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a tracked series: the same name may appear under several chart types
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SeriesKey {
    pub chart_type: ChartType,
    pub name: SeriesName,
}

impl SeriesKey {
    pub fn new(name: impl Into<SeriesName>, chart_type: ChartType) -> Self {
        Self {
            chart_type,
            name: name.into(),
        }
    }
}

impl fmt::Display for SeriesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.chart_type, self.name)
    }
}

/// A single reading; `None` (or NaN) marks a missing value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub timestamp: Timestamp,
    pub value: Option<f64>,
}

impl Observation {
    pub fn new(timestamp: Timestamp, value: f64) -> Self {
        Self {
            timestamp,
            value: Some(value),
        }
    }

    pub fn missing(timestamp: Timestamp) -> Self {
        Self {
            timestamp,
            value: None,
        }
    }

    /// Value if present and not NaN
    pub fn valid_value(&self) -> Option<f64> {
        self.value.filter(|v| !v.is_nan())
    }
}

/// Time-ordered sequence of observations supplied fresh every cycle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Series {
    observations: Vec<Observation>,
}

impl Series {
    pub fn new(observations: Vec<Observation>) -> Self {
        Self { observations }
    }

    /// Build an equally spaced series; NaN entries become missing values
    pub fn from_values(
        start: Timestamp,
        step: Duration,
        values: impl IntoIterator<Item = f64>,
    ) -> Self {
        let observations = values
            .into_iter()
            .enumerate()
            .map(|(i, v)| Observation {
                timestamp: start + step * i as i32,
                value: (!v.is_nan()).then_some(v),
            })
            .collect();
        Self { observations }
    }

    /// Hourly series starting at `start`
    pub fn hourly(start: Timestamp, values: impl IntoIterator<Item = f64>) -> Self {
        Self::from_values(start, Duration::hours(1), values)
    }

    pub fn push(&mut self, timestamp: Timestamp, value: Option<f64>) {
        self.observations.push(Observation { timestamp, value });
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Most recent `n` observations (the whole series if shorter)
    pub fn tail(&self, n: usize) -> Series {
        let start = self.observations.len().saturating_sub(n);
        Series::new(self.observations[start..].to_vec())
    }

    /// Index of the first observation whose timestamp does not strictly increase
    pub fn first_unordered(&self) -> Option<usize> {
        self.observations
            .windows(2)
            .position(|w| w[1].timestamp <= w[0].timestamp)
            .map(|i| i + 1)
    }

    /// Index of the first infinite value
    pub fn first_infinite(&self) -> Option<usize> {
        self.observations
            .iter()
            .position(|o| o.value.is_some_and(f64::is_infinite))
    }

    /// Drop missing entries, keeping timestamps aligned with values
    pub fn cleaned(&self) -> CleanSeries {
        let (timestamps, values) = self
            .observations
            .iter()
            .filter_map(|o| o.valid_value().map(|v| (o.timestamp, v)))
            .unzip();
        CleanSeries { timestamps, values }
    }
}

impl FromIterator<Observation> for Series {
    fn from_iter<I: IntoIterator<Item = Observation>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Series with missing entries removed; ordinal position is the regression time index
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleanSeries {
    pub timestamps: Vec<Timestamp>,
    pub values: Vec<f64>,
}

impl CleanSeries {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Last valid point as (ordinal index, timestamp, value)
    pub fn last(&self) -> Option<(usize, Timestamp, f64)> {
        self.point(self.len().checked_sub(1)?)
    }

    /// Second-to-last valid point
    pub fn previous(&self) -> Option<(usize, Timestamp, f64)> {
        self.point(self.len().checked_sub(2)?)
    }

    fn point(&self, index: usize) -> Option<(usize, Timestamp, f64)> {
        Some((index, *self.timestamps.get(index)?, *self.values.get(index)?))
    }
}
