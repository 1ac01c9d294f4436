use crate::SourceResult;
use async_trait::async_trait;
use breakwatch_core::SeriesBatch;

/// Port for series fetchers
///
/// A source supplies a fresh batch of series on every cycle:
/// - Snapshot files written by an external collector
/// - Live API fetchers (trends, spot and futures prices)
/// - Synthetic generators for testing
#[async_trait]
pub trait SeriesSource: Send {
    /// Fetch the current batch of series
    async fn fetch(&mut self) -> SourceResult<SeriesBatch>;

    /// Get the source's name/identifier for debugging
    fn name(&self) -> &str {
        "SeriesSource"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use breakwatch_core::{ChartType, Series};
    use chrono::Utc;

    struct FixedSource(SeriesBatch);

    #[async_trait]
    impl SeriesSource for FixedSource {
        async fn fetch(&mut self) -> SourceResult<SeriesBatch> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn test_trait_object() {
        let batch =
            SeriesBatch::new().with(ChartType::Trends, "Bitcoin", Series::hourly(Utc::now(), [1.0]));
        let mut source: Box<dyn SeriesSource> = Box::new(FixedSource(batch.clone()));

        assert_eq!(source.fetch().await.unwrap(), batch);
        assert_eq!(source.name(), "SeriesSource");
    }
}
