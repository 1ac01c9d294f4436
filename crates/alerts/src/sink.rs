//! Breakout sinks
//!
//! - `LogSink` writes rendered notices through the `log` facade
//! - `ChannelSink` broadcasts notices to any number of subscribers
//!
//! Both render with `AlertFormatter`; neither blocks on delivery.

use crate::formatter::AlertFormatter;
use crate::notice::Notice;
use breakwatch_core::BreakoutEvent;
use breakwatch_ports::{BreakoutSink, SinkError, SinkResult};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::broadcast;

/// Default broadcast buffer (notices kept for slow subscribers)
pub const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Sink that logs each notice at `info` (summaries at `warn`)
#[derive(Debug, Default)]
pub struct LogSink {
    formatter: AlertFormatter,
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BreakoutSink for LogSink {
    fn publish(&self, event: &BreakoutEvent) -> SinkResult<()> {
        let notice = self.formatter.breakout(event);
        log::info!("[{}] {} | {}", notice.tag, notice.title, notice.body.replace('\n', " | "));
        Ok(())
    }

    fn publish_compound(&self, events: &[BreakoutEvent]) -> SinkResult<()> {
        if let Some(notice) = self.formatter.multiple_breakouts(events) {
            log::warn!("{} | {}", notice.title, notice.body.replace('\n', " | "));
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "LogSink"
    }
}

/// Sink that fans notices out over a tokio broadcast channel
///
/// Publishing with no subscribers is not an error. A disabled sink rejects
/// everything with `SinkError::Disabled`.
pub struct ChannelSink {
    formatter: AlertFormatter,
    tx: broadcast::Sender<Notice>,
    enabled: AtomicBool,
}

impl ChannelSink {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self {
            formatter: AlertFormatter::new(),
            tx,
            enabled: AtomicBool::new(true),
        }
    }

    /// Subscribe to notices published from now on
    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    pub fn enable(&self) {
        self.enabled.store(true, Ordering::SeqCst);
    }

    pub fn disable(&self) {
        self.enabled.store(false, Ordering::SeqCst);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    /// Broadcast an already rendered notice
    pub fn send(&self, notice: Notice) -> SinkResult<()> {
        if !self.is_enabled() {
            return Err(SinkError::Disabled);
        }
        // Ignore send error (no subscribers is ok)
        let _ = self.tx.send(notice);
        Ok(())
    }
}

impl Default for ChannelSink {
    fn default() -> Self {
        Self::new()
    }
}

impl BreakoutSink for ChannelSink {
    fn publish(&self, event: &BreakoutEvent) -> SinkResult<()> {
        self.send(self.formatter.breakout(event))
    }

    fn publish_compound(&self, events: &[BreakoutEvent]) -> SinkResult<()> {
        match self.formatter.multiple_breakouts(events) {
            Some(notice) => self.send(notice),
            None => Ok(()),
        }
    }

    fn name(&self) -> &str {
        "ChannelSink"
    }
}
