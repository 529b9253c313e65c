//! Chart-ready reshaping of trend series.
//!
//! Series keep the order the service sent them in. Dates become display
//! labels, parallel series are merged by position, and each chart picks its
//! own window.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::dashboard::{TrendSeries, TrendSet};

/// Axis label format (`3/14/2025`).
pub const DATE_LABEL_FORMAT: &str = "%-m/%-d/%Y";

/// Timestamp format (`3/14/2025, 8:05:00 AM`).
pub const TIMESTAMP_LABEL_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Parse the date shapes the service emits: RFC 3339, naive ISO datetimes
/// (with or without fractional seconds) and bare ISO dates.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Date label for a chart axis. Unparseable input is shown as-is.
pub fn date_label(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(dt) => dt.format(DATE_LABEL_FORMAT).to_string(),
        None => raw.to_string(),
    }
}

/// Date-and-time label for trace headers. Unparseable input is shown as-is.
pub fn timestamp_label(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(dt) => dt.format(TIMESTAMP_LABEL_FORMAT).to_string(),
        None => raw.to_string(),
    }
}

/// Which part of a series a chart shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    Full,
    /// Only the most recent `n` points.
    Tail(usize),
}

impl Window {
    pub fn apply<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        match self {
            Self::Full => items,
            Self::Tail(n) => &items[items.len().saturating_sub(*n)..],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

/// Two series sampled at the same position.
#[derive(Debug, Clone, PartialEq)]
pub struct PairedPoint {
    pub label: String,
    pub primary: f64,
    pub secondary: f64,
}

/// A chart either has points or shows its "no data yet" message.
#[derive(Debug, Clone, PartialEq)]
pub enum Chart<P> {
    NoData(&'static str),
    Ready(Vec<P>),
}

impl<P> Chart<P> {
    pub fn points(&self) -> &[P] {
        match self {
            Self::NoData(_) => &[],
            Self::Ready(points) => points,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::NoData(_))
    }
}

/// A single-series chart on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartSpec {
    pub title: &'static str,
    pub series: &'static str,
    pub window: Window,
    pub empty_message: &'static str,
}

/// A two-series chart, merged by position onto the primary series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairedChartSpec {
    pub title: &'static str,
    pub primary: &'static str,
    pub secondary: &'static str,
    pub window: Window,
    pub empty_message: &'static str,
}

pub const ADHERENCE_CHART: ChartSpec = ChartSpec {
    title: "Adherence Trend",
    series: "adherence",
    window: Window::Full,
    empty_message: "No adherence data available yet. Complete check-ins to see trends.",
};

pub const STRESS_MOTIVATION_CHART: PairedChartSpec = PairedChartSpec {
    title: "Stress & Motivation",
    primary: "stress",
    secondary: "motivation",
    window: Window::Full,
    empty_message: "No quiz data available yet. Take mental health quizzes to see trends.",
};

pub const PROTEIN_CHART: ChartSpec = ChartSpec {
    title: "Protein Intake (Last 7 Days)",
    series: "protein",
    window: Window::Tail(7),
    empty_message:
        "No nutrition data available yet. Submit check-ins with ingredients to see trends.",
};

/// Relabel a series for display, keeping its order.
pub fn labeled(series: &TrendSeries) -> Vec<ChartPoint> {
    series
        .points()
        .iter()
        .map(|point| ChartPoint {
            label: date_label(&point.date),
            value: point.value,
        })
        .collect()
}

/// Merge two series by index. The primary series sets the length and the
/// labels; positions the secondary lacks read as 0.
pub fn merge_by_position(primary: &TrendSeries, secondary: Option<&TrendSeries>) -> Vec<PairedPoint> {
    let secondary = secondary.map(TrendSeries::points).unwrap_or(&[]);
    primary
        .points()
        .iter()
        .enumerate()
        .map(|(i, point)| PairedPoint {
            label: date_label(&point.date),
            primary: point.value,
            secondary: secondary.get(i).map(|p| p.value).unwrap_or(0.0),
        })
        .collect()
}

pub fn line_chart(trends: &TrendSet, spec: &ChartSpec) -> Chart<ChartPoint> {
    match trends.get(spec.series) {
        Some(series) if !series.is_empty() => {
            Chart::Ready(spec.window.apply(&labeled(series)).to_vec())
        }
        _ => Chart::NoData(spec.empty_message),
    }
}

pub fn paired_chart(trends: &TrendSet, spec: &PairedChartSpec) -> Chart<PairedPoint> {
    match trends.get(spec.primary) {
        Some(primary) if !primary.is_empty() => {
            let merged = merge_by_position(primary, trends.get(spec.secondary));
            Chart::Ready(spec.window.apply(&merged).to_vec())
        }
        _ => Chart::NoData(spec.empty_message),
    }
}
