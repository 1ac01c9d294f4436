mod batch;
mod breakout;
mod chart_type;
mod series;

pub use batch::SeriesBatch;
pub use breakout::{BreakoutEvent, Direction};
pub use chart_type::ChartType;
pub use series::{CleanSeries, Observation, Series, SeriesKey};
