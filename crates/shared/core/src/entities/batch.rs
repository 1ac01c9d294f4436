use super::{ChartType, Series, SeriesKey};
use crate::values::SeriesName;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// All series supplied for one analysis pass, grouped by chart type
///
/// Ordered maps keep iteration deterministic: chart types in declaration
/// order, then series names lexicographically.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeriesBatch {
    groups: BTreeMap<ChartType, BTreeMap<SeriesName, Series>>,
}

impl SeriesBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or replace) a series
    pub fn insert(&mut self, chart_type: ChartType, name: impl Into<SeriesName>, series: Series) {
        self.groups
            .entry(chart_type)
            .or_default()
            .insert(name.into(), series);
    }

    /// Builder-style insert
    pub fn with(mut self, chart_type: ChartType, name: impl Into<SeriesName>, series: Series) -> Self {
        self.insert(chart_type, name, series);
        self
    }

    pub fn get(&self, key: &SeriesKey) -> Option<&Series> {
        self.groups.get(&key.chart_type)?.get(&key.name)
    }

    /// Series of one chart type
    pub fn group(&self, chart_type: ChartType) -> Option<&BTreeMap<SeriesName, Series>> {
        self.groups.get(&chart_type)
    }

    /// Every series in processing order
    pub fn iter(&self) -> impl Iterator<Item = (SeriesKey, &Series)> + '_ {
        self.groups.iter().flat_map(|(chart_type, group)| {
            group
                .iter()
                .map(move |(name, series)| (SeriesKey::new(name.clone(), *chart_type), series))
        })
    }

    pub fn series_count(&self) -> usize {
        self.groups.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.series_count() == 0
    }

    /// Keep only the most recent `n` observations of every series
    pub fn window(&self, n: usize) -> SeriesBatch {
        let groups = self
            .groups
            .iter()
            .map(|(chart_type, group)| {
                let group = group
                    .iter()
                    .map(|(name, series)| (name.clone(), series.tail(n)))
                    .collect();
                (*chart_type, group)
            })
            .collect();
        SeriesBatch { groups }
    }
}
