//! Alert Formatter
//!
//! Turns breakout events and regression diagnostics into notices. Everything
//! chart-specific (label, icon, value rendering) is decided by a single match
//! on `ChartType`:
//!
//! ```text
//!   chart type         label                 value style
//!   ────────────────   ───────────────────   ─────────────
//!   trends             📊 Search Trends      12.3
//!   prices             💰 Prices             $43,250.00
//!   futures_premiums   📈 Futures Premium    +1.25%
//!   volume             📦 Volume             12.3
//!   hf_volatility      ⚡ HF Volatility      12.3
//! ```

use crate::notice::{
    BREAKOUT_DURATION_MS, DEFAULT_DURATION_MS, Notice, NoticeKind, SUMMARY_DURATION_MS,
    tag_fragment,
};
use breakwatch_core::{BreakoutEvent, ChartType, Direction};
use breakwatch_regression::RegressionDiagnostics;

/// How values of a chart type are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueStyle {
    /// `$1,234.56`
    Currency,
    /// `+1.25%`
    SignedPercent,
    /// `12.3`
    Plain,
}

impl ValueStyle {
    pub fn for_chart(chart_type: ChartType) -> Self {
        match chart_type {
            ChartType::Prices => ValueStyle::Currency,
            ChartType::FuturesPremiums => ValueStyle::SignedPercent,
            ChartType::Trends | ChartType::Volume | ChartType::HfVolatility => ValueStyle::Plain,
        }
    }

    pub fn format(&self, value: f64) -> String {
        match self {
            ValueStyle::Currency => format!("${}", group_thousands(value, 2)),
            ValueStyle::SignedPercent => format!("{:+.2}%", value),
            ValueStyle::Plain => format!("{:.1}", value),
        }
    }
}

/// Chart icon used in titles
pub fn chart_icon(chart_type: ChartType) -> &'static str {
    match chart_type {
        ChartType::Trends => "📊",
        ChartType::Prices => "💰",
        ChartType::FuturesPremiums => "📈",
        ChartType::Volume => "📦",
        ChartType::HfVolatility => "⚡",
    }
}

/// Full display label with icon
pub fn chart_label(chart_type: ChartType) -> &'static str {
    match chart_type {
        ChartType::Trends => "📊 Search Trends",
        ChartType::Prices => "💰 Prices",
        ChartType::FuturesPremiums => "📈 Futures Premium",
        ChartType::Volume => "📦 Volume",
        ChartType::HfVolatility => "⚡ HF Volatility",
    }
}

/// Short name used in summaries
pub fn chart_short_name(chart_type: ChartType) -> &'static str {
    match chart_type {
        ChartType::Trends => "Trends",
        ChartType::Prices => "Prices",
        ChartType::FuturesPremiums => "Futures",
        ChartType::Volume => "Volume",
        ChartType::HfVolatility => "Volatility",
    }
}

/// Fixed-point rendering with `,` thousands separators, e.g. `-1,234.50`
pub fn group_thousands(value: f64, decimals: usize) -> String {
    let raw = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match raw.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (raw.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value.is_sign_negative() && raw.chars().any(|c| c != '0' && c != '.') {
        "-"
    } else {
        ""
    };
    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}

/// Stateless notice builder
#[derive(Debug, Clone, Copy, Default)]
pub struct AlertFormatter;

impl AlertFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Notice for a single breakout
    pub fn breakout(&self, event: &BreakoutEvent) -> Notice {
        let arrow = match event.direction {
            Direction::Above => "📈",
            Direction::Below => "📉",
        };
        let style = ValueStyle::for_chart(event.chart_type);

        let body = format!(
            "{}: {}\n{:.1}σ {} trend ({:.0}% confidence)\nActual: {} | Expected: {}",
            chart_label(event.chart_type),
            event.series_name,
            event.sigma_level,
            event.direction,
            event.confidence,
            style.format(event.current_value),
            style.format(event.expected_value),
        );

        Notice {
            kind: NoticeKind::Breakout,
            title: format!("🚨 {} Statistical Breakout", arrow),
            body,
            tag: format!(
                "statistical_{}_{}",
                event.chart_type,
                tag_fragment(&event.series_name)
            ),
            duration_ms: BREAKOUT_DURATION_MS,
        }
    }

    /// Summary notice for simultaneous breakouts, `None` for fewer than two
    pub fn multiple_breakouts(&self, events: &[BreakoutEvent]) -> Option<Notice> {
        if events.len() < 2 {
            return None;
        }

        let mut chart_types: Vec<ChartType> = events.iter().map(|e| e.chart_type).collect();
        chart_types.sort();
        chart_types.dedup();
        let summary = chart_types
            .iter()
            .map(|ct| chart_short_name(*ct))
            .collect::<Vec<_>>()
            .join(", ");

        Some(Notice {
            kind: NoticeKind::MultipleBreakouts,
            title: format!("🚨 Multiple Breakouts Detected ({})", events.len()),
            body: format!(
                "Simultaneous breakouts across: {}\nThis may indicate significant market movement",
                summary
            ),
            tag: "multiple_breakouts".to_string(),
            duration_ms: SUMMARY_DURATION_MS,
        })
    }

    /// Notice for a series whose trend fit has become unreliable
    pub fn regression_anomaly(
        &self,
        series_name: &str,
        chart_type: ChartType,
        diagnostics: &RegressionDiagnostics,
    ) -> Notice {
        Notice {
            kind: NoticeKind::RegressionAnomaly,
            title: format!("⚠️ {} Regression Anomaly", chart_icon(chart_type)),
            body: format!(
                "{} showing unusual pattern\nR² = {:.1}% | RMSE = {:.1}%\nTrend reliability compromised",
                series_name,
                diagnostics.r_squared * 100.0,
                diagnostics.normalized_rmse * 100.0
            ),
            tag: format!("anomaly_{}_{}", chart_type, tag_fragment(series_name)),
            duration_ms: DEFAULT_DURATION_MS,
        }
    }
}
