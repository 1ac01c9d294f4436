use super::{ChartType, SeriesKey};
use crate::values::{SeriesName, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Side of the sigma boundary a breakout crossed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Above,
    Below,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Above => "above",
            Direction::Below => "below",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A detected inside → outside crossing of a series' sigma boundary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakoutEvent {
    pub series_name: SeriesName,
    pub chart_type: ChartType,
    /// Timestamp of the breakout point
    pub timestamp: Timestamp,
    pub current_value: f64,
    /// Regression-predicted value at the breakout point
    pub expected_value: f64,
    /// Distance from the expectation in residual standard deviations (>= 0)
    pub sigma_level: f64,
    pub direction: Direction,
    /// Heuristic 0-100 blend of fit strength and significance
    pub confidence: f64,
}

impl BreakoutEvent {
    pub fn key(&self) -> SeriesKey {
        SeriesKey::new(self.series_name.clone(), self.chart_type)
    }

    /// Signed deviation from the expected value
    pub fn deviation(&self) -> f64 {
        self.current_value - self.expected_value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_event_serializes_wire_names() {
        let event = BreakoutEvent {
            series_name: "ETH Dec 2025".to_string(),
            chart_type: ChartType::FuturesPremiums,
            timestamp: Utc::now(),
            current_value: 2.5,
            expected_value: 1.0,
            sigma_level: 3.2,
            direction: Direction::Above,
            confidence: 87.0,
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["chart_type"], "futures_premiums");
        assert_eq!(json["direction"], "above");
        assert_eq!(event.deviation(), 1.5);
        assert_eq!(event.key().to_string(), "futures_premiums_ETH Dec 2025");
    }
}
