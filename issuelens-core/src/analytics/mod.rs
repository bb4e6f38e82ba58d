//! Analytics module for issuelens
//!
//! One component, the [`LifecycleAnalyzer`], performs all analytical work:
//! it derives per-issue open durations and folds them into three views:
//! per-label time-to-close means, monthly created/closed trends, and
//! bottleneck counts. Each view becomes a [`Chart`] handed to a
//! [`ChartSink`] the core does not control.

pub mod chart;
pub mod lifecycle;

pub use chart::{Chart, ChartKind, ChartSink, Series, SeriesColor};
pub use lifecycle::{
    BottleneckSummary, LabelCount, LabelMean, LifecycleAnalyzer, LifecycleReport, MonthCount,
    MonthlyTrends,
};
