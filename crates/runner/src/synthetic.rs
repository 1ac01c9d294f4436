//! Synthetic series source
//!
//! Generates hourly series as linear trend + gaussian noise, advancing one
//! hour per fetch. An optional level shift of `magnitude` noise stds can be
//! injected from a given point onwards to exercise the detector end to end.
//!
//! ```text
//!   value(i) = base + trend · i + N(0, noise)  [+ ± magnitude · noise  if i ≥ at_point]
//! ```

use async_trait::async_trait;
use breakwatch_core::{ChartType, Observation, Series, SeriesBatch, SeriesName, Timestamp};
use breakwatch_ports::{SeriesSource, SourceError, SourceResult};
use chrono::{Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// One generated series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyntheticSeries {
    pub name: SeriesName,
    pub chart_type: ChartType,
    #[serde(default = "default_base")]
    pub base: f64,
    /// Increment per hour
    #[serde(default = "default_trend")]
    pub trend: f64,
    /// Noise standard deviation
    #[serde(default = "default_noise")]
    pub noise: f64,
}

fn default_base() -> f64 {
    50.0
}

fn default_trend() -> f64 {
    0.5
}

fn default_noise() -> f64 {
    1.0
}

impl SyntheticSeries {
    pub fn new(name: impl Into<SeriesName>, chart_type: ChartType) -> Self {
        Self {
            name: name.into(),
            chart_type,
            base: default_base(),
            trend: default_trend(),
            noise: default_noise(),
        }
    }
}

/// Level shift applied to every series from `at_point` onwards
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BreakoutInjection {
    /// Index of the first shifted point (0 = first generated point)
    pub at_point: usize,
    /// Shift in noise standard deviations
    #[serde(default = "default_magnitude")]
    pub magnitude: f64,
}

fn default_magnitude() -> f64 {
    3.0
}

/// Generator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyntheticConfig {
    #[serde(default = "default_series")]
    pub series: Vec<SyntheticSeries>,

    /// Points returned by the first fetch; later fetches keep this length
    #[serde(default = "default_history")]
    pub history: usize,

    /// Fixed seed for reproducible runs
    #[serde(default)]
    pub seed: Option<u64>,

    #[serde(default)]
    pub breakout: Option<BreakoutInjection>,
}

fn default_series() -> Vec<SyntheticSeries> {
    vec![
        SyntheticSeries::new("Bitcoin", ChartType::Trends),
        SyntheticSeries {
            base: 43_000.0,
            trend: 12.0,
            noise: 150.0,
            ..SyntheticSeries::new("BTC-USD", ChartType::Prices)
        },
        SyntheticSeries {
            base: 1.2,
            trend: 0.002,
            noise: 0.05,
            ..SyntheticSeries::new("BTC Mar 2026", ChartType::FuturesPremiums)
        },
        SyntheticSeries::new("BTC", ChartType::Volume),
        SyntheticSeries {
            base: 30.0,
            trend: 0.0,
            noise: 2.0,
            ..SyntheticSeries::new("BTC", ChartType::HfVolatility)
        },
    ]
}

fn default_history() -> usize {
    168
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            series: default_series(),
            history: default_history(),
            seed: None,
            breakout: None,
        }
    }
}

struct GeneratedSeries {
    params: SyntheticSeries,
    observations: VecDeque<Observation>,
    /// Sign of the injected shift, drawn once per series
    shift_sign: f64,
}

/// `SeriesSource` producing trend + noise series
pub struct SyntheticSource {
    config: SyntheticConfig,
    rng: StdRng,
    series: Vec<GeneratedSeries>,
    start: Timestamp,
    next_point: usize,
}

impl SyntheticSource {
    /// Create a generator whose first fetch ends at the current hour
    pub fn new(config: SyntheticConfig) -> Self {
        let start = Utc::now() - Duration::hours(config.history as i64);
        Self::starting_at(config, start)
    }

    /// Create a generator whose first point is at `start`
    pub fn starting_at(config: SyntheticConfig, start: Timestamp) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let series = config
            .series
            .iter()
            .map(|params| GeneratedSeries {
                params: params.clone(),
                observations: VecDeque::with_capacity(config.history.max(1) + 1),
                shift_sign: if rng.r#gen::<bool>() { 1.0 } else { -1.0 },
            })
            .collect();

        Self {
            config,
            rng,
            series,
            start,
            next_point: 0,
        }
    }

    /// Index of the next point to be generated
    pub fn next_point(&self) -> usize {
        self.next_point
    }

    fn generate_point(&mut self, series_idx: usize, i: usize) -> SourceResult<Observation> {
        let params = &self.series[series_idx].params;
        let noise = Normal::new(0.0, params.noise.abs())
            .map_err(|e| SourceError::Unavailable(format!("{}: {}", params.name, e)))?;

        let mut value = params.base + params.trend * i as f64 + noise.sample(&mut self.rng);
        if let Some(injection) = self.config.breakout
            && i >= injection.at_point
        {
            value += self.series[series_idx].shift_sign * injection.magnitude * params.noise.abs();
        }

        let timestamp = self.start + Duration::hours(i as i64);
        Ok(Observation::new(timestamp, value))
    }

    fn advance(&mut self) -> SourceResult<()> {
        let count = if self.next_point == 0 {
            self.config.history.max(1)
        } else {
            1
        };
        let history = self.config.history.max(1);

        for _ in 0..count {
            let i = self.next_point;
            for idx in 0..self.series.len() {
                let obs = self.generate_point(idx, i)?;
                let observations = &mut self.series[idx].observations;
                observations.push_back(obs);
                if observations.len() > history {
                    observations.pop_front();
                }
            }
            self.next_point += 1;
        }
        Ok(())
    }
}

#[async_trait]
impl SeriesSource for SyntheticSource {
    async fn fetch(&mut self) -> SourceResult<SeriesBatch> {
        self.advance()?;

        let mut batch = SeriesBatch::new();
        for generated in &self.series {
            batch.insert(
                generated.params.chart_type,
                generated.params.name.clone(),
                Series::new(generated.observations.iter().copied().collect()),
            );
        }
        Ok(batch)
    }

    fn name(&self) -> &str {
        "SyntheticSource"
    }
}
