use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a tracked series
///
/// The declaration order is the processing order of an analysis pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartType {
    /// Search-interest indices (0-100 scale)
    Trends,
    /// Spot prices and price-derived indices
    Prices,
    /// Futures premium over spot, in percent
    FuturesPremiums,
    /// Trading volume
    Volume,
    /// Intra-hour (high-frequency) volatility
    HfVolatility,
}

impl ChartType {
    /// All chart types in processing order
    pub const ALL: [ChartType; 5] = [
        ChartType::Trends,
        ChartType::Prices,
        ChartType::FuturesPremiums,
        ChartType::Volume,
        ChartType::HfVolatility,
    ];

    /// Wire identifier (matches the serde representation)
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartType::Trends => "trends",
            ChartType::Prices => "prices",
            ChartType::FuturesPremiums => "futures_premiums",
            ChartType::Volume => "volume",
            ChartType::HfVolatility => "hf_volatility",
        }
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
