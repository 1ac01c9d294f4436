use serde::{Deserialize, Serialize};

/// Display duration for a single breakout notice
pub const BREAKOUT_DURATION_MS: u64 = 8_000;

/// Display duration for the multiple-breakout summary
pub const SUMMARY_DURATION_MS: u64 = 10_000;

/// Display duration for everything else
pub const DEFAULT_DURATION_MS: u64 = 5_000;

/// What produced a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Breakout,
    MultipleBreakouts,
    RegressionAnomaly,
}

/// A rendered, ready-to-deliver notification
///
/// Notices with the same `tag` replace each other on the receiving side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub body: String,
    pub tag: String,
    pub duration_ms: u64,
}

impl Notice {
    /// Body lines, in order
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.body.lines()
    }
}

/// Tag fragment for a series name: lowercase, spaces and dashes as underscores
pub fn tag_fragment(name: &str) -> String {
    name.to_lowercase().replace([' ', '-'], "_")
}
