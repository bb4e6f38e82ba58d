//! Chart request types handed to rendering sinks.
//!
//! The analysis produces charts as plain data: a titled sequence of
//! (category-or-month, value) series. How a chart is drawn is entirely the
//! sink's business; the core only guarantees it never hands over a chart
//! with zero points.

use crate::error::Result;
use serde::Serialize;

/// How a chart should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    /// Categorical bars
    Bar,
    /// Time series
    Line,
}

/// Named series colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesColor {
    SkyBlue,
    Blue,
    Red,
    Salmon,
}

/// One named series of (key, value) points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    /// Legend name (e.g. "Issues Created")
    pub name: String,
    /// Color the sink should draw this series in
    pub color: SeriesColor,
    /// (category-or-month, value) pairs, already in display order
    pub points: Vec<(String, f64)>,
}

impl Series {
    pub fn new(name: &str, color: SeriesColor, points: Vec<(String, f64)>) -> Self {
        Self {
            name: name.to_string(),
            color,
            points,
        }
    }
}

/// A chart request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub kind: ChartKind,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<Series>,
}

impl Chart {
    /// True when no series has any points.
    pub fn is_empty(&self) -> bool {
        self.series.iter().all(|s| s.points.is_empty())
    }
}

/// Blocking sink for chart requests.
///
/// `render` consumes one chart and returns control synchronously; the caller
/// does not observe how (or whether) the chart was displayed.
pub trait ChartSink {
    fn render(&mut self, chart: &Chart) -> Result<()>;
}
