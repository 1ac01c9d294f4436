use breakwatch_core::{BreakoutEvent, ChartType, SeriesKey};
use breakwatch_ports::AnalysisError;
use uuid::Uuid;

/// A series excluded from a pass because its analysis failed
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesFailure {
    pub key: SeriesKey,
    pub error: AnalysisError,
}

/// Result of one analysis pass over a batch
#[derive(Debug, Clone)]
pub struct PassReport {
    /// Identifier for log correlation
    pub pass_id: Uuid,
    /// Events in processing order (chart type, then series name)
    pub events: Vec<BreakoutEvent>,
    /// Series that produced a fit (with or without an event)
    pub analyzed: usize,
    /// Series skipped for having too few clean points
    pub insufficient: usize,
    /// Series whose fit had zero residual spread
    pub degenerate: usize,
    pub failures: Vec<SeriesFailure>,
    /// False when the analyzer is disabled and nothing ran
    pub ran: bool,
    compound_threshold: usize,
}

impl PassReport {
    pub(crate) fn new(compound_threshold: usize) -> Self {
        Self {
            pass_id: Uuid::new_v4(),
            events: Vec::new(),
            analyzed: 0,
            insufficient: 0,
            degenerate: 0,
            failures: Vec::new(),
            ran: false,
            compound_threshold,
        }
    }

    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    /// Enough simultaneous breakouts to be surfaced as one compound event
    pub fn is_compound(&self) -> bool {
        self.compound_threshold > 0 && self.events.len() >= self.compound_threshold
    }

    /// Distinct chart types with at least one event, in processing order
    pub fn chart_types(&self) -> Vec<ChartType> {
        let mut types: Vec<ChartType> = self.events.iter().map(|e| e.chart_type).collect();
        types.sort();
        types.dedup();
        types
    }

    pub fn into_events(self) -> Vec<BreakoutEvent> {
        self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use breakwatch_core::Direction;
    use chrono::Utc;

    fn event(name: &str, chart_type: ChartType) -> BreakoutEvent {
        BreakoutEvent {
            series_name: name.to_string(),
            chart_type,
            timestamp: Utc::now(),
            current_value: 1.0,
            expected_value: 0.0,
            sigma_level: 2.5,
            direction: Direction::Above,
            confidence: 50.0,
        }
    }

    #[test]
    fn test_compound_threshold() {
        let mut report = PassReport::new(3);
        report.events.push(event("BTC", ChartType::Volume));
        report.events.push(event("ETH", ChartType::Prices));
        assert!(!report.is_compound());

        report.events.push(event("BTC", ChartType::Prices));
        assert!(report.is_compound());
        assert_eq!(report.event_count(), 3);
        assert_eq!(report.chart_types(), vec![ChartType::Prices, ChartType::Volume]);
    }

    #[test]
    fn test_new_report_is_empty() {
        let report = PassReport::new(3);
        assert!(!report.ran);
        assert!(report.into_events().is_empty());
    }
}
