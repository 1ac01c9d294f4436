use crate::SinkResult;
use breakwatch_core::BreakoutEvent;

/// Port for breakout consumers (notifiers, dashboards, loggers)
///
/// The detection core makes no assumption about delivery success or latency;
/// callers log failures and continue.
pub trait BreakoutSink: Send + Sync {
    /// Deliver a single breakout event
    fn publish(&self, event: &BreakoutEvent) -> SinkResult<()>;

    /// Deliver a summary for a pass with several simultaneous breakouts
    fn publish_compound(&self, events: &[BreakoutEvent]) -> SinkResult<()> {
        let _ = events;
        Ok(())
    }

    /// Get the sink's name/identifier for debugging
    fn name(&self) -> &str {
        "BreakoutSink"
    }
}
