use async_trait::async_trait;
use breakwatch_core::SeriesBatch;
use breakwatch_ports::{SeriesSource, SourceError, SourceResult};
use std::path::{Path, PathBuf};

/// Reads a `SeriesBatch` JSON snapshot on every fetch
///
/// The file is expected to be rewritten by an external collector between
/// cycles. Format:
///
/// ```json
/// { "prices": { "BTC-USD": [ { "timestamp": "2025-01-01T00:00:00Z", "value": 43250.0 } ] } }
/// ```
pub struct JsonSnapshotSource {
    path: PathBuf,
}

impl JsonSnapshotSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse a snapshot document
    pub fn parse(json: &str) -> SourceResult<SeriesBatch> {
        serde_json::from_str(json).map_err(|e| SourceError::Parse(e.to_string()))
    }
}

#[async_trait]
impl SeriesSource for JsonSnapshotSource {
    async fn fetch(&mut self) -> SourceResult<SeriesBatch> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| SourceError::Io {
                path: self.path.display().to_string(),
                error: e.to_string(),
            })?;

        let batch = Self::parse(&content)?;
        log::debug!(
            "Loaded {} series from {}",
            batch.series_count(),
            self.path.display()
        );
        Ok(batch)
    }

    fn name(&self) -> &str {
        "JsonSnapshotSource"
    }
}
