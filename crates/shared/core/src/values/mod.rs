use chrono::{DateTime, Utc};

/// Timestamp in UTC
pub type Timestamp = DateTime<Utc>;

/// Name of a tracked series (keyword, symbol, contract display name...)
pub type SeriesName = String;
