//! Issue lifecycle analysis.
//!
//! Four ordered passes over an in-memory issue set:
//!
//! 1. Duration derivation: whole days each issue stayed open
//! 2. Per-label time-to-close means (honors the optional label filter)
//! 3. Monthly created/closed trend counts
//! 4. Bottleneck detection: issues slower than the population mean,
//!    counted per label
//!
//! The passes after derivation are independent of each other; they only
//! require that durations have been derived first. [`LifecycleAnalyzer::run`]
//! enforces that ordering and hands each non-empty result to a
//! [`ChartSink`].

use crate::analytics::chart::{Chart, ChartKind, ChartSink, Series, SeriesColor};
use crate::error::{Error, Result};
use crate::format::month_key;
use crate::types::Issue;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

const SECONDS_PER_DAY: i64 = 86_400;

/// Mean open duration for one label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelMean {
    pub label: String,
    pub mean_days: f64,
}

/// Issue count for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthCount {
    /// Year-month key, "2024-03"
    pub month: String,
    pub count: u64,
}

/// Monthly created/closed frequency tables, chronologically ascending.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTrends {
    pub created: Vec<MonthCount>,
    pub closed: Vec<MonthCount>,
}

impl MonthlyTrends {
    pub fn is_empty(&self) -> bool {
        self.created.is_empty() && self.closed.is_empty()
    }
}

/// Bottleneck issue count for one label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelCount {
    pub label: String,
    pub count: u64,
}

/// Population mean plus per-label bottleneck counts, sorted by count
/// descending (ties keep label encounter order).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BottleneckSummary {
    pub mean_days: f64,
    pub counts: Vec<LabelCount>,
}

/// All aggregate outputs of one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LifecycleReport {
    pub label_means: Vec<LabelMean>,
    pub trends: MonthlyTrends,
    pub bottlenecks: BottleneckSummary,
}

/// The lifecycle analyzer.
///
/// Holds the one piece of run-scoped configuration, the optional label
/// filter, passed in explicitly at construction. The filter restricts only
/// the time-to-close means; trends and bottleneck detection always see the
/// full record set.
pub struct LifecycleAnalyzer {
    label_filter: Option<String>,
}

impl LifecycleAnalyzer {
    pub fn new(label_filter: Option<String>) -> Self {
        Self { label_filter }
    }

    /// Pass 1: derive each issue's open duration in whole days.
    ///
    /// Issues missing either timestamp are left with `duration_days = None`;
    /// that is a valid state, not an error. The day difference is signed and
    /// floored, never clamped: an update 36 hours before creation is -2 days.
    pub fn derive_durations(&self, mut issues: Vec<Issue>) -> Vec<Issue> {
        for issue in &mut issues {
            if let (Some(created), Some(updated)) = (issue.created_at, issue.updated_at) {
                let seconds = updated.signed_duration_since(created).num_seconds();
                issue.duration_days = Some(seconds.div_euclid(SECONDS_PER_DAY));
            }
        }
        issues
    }

    /// Pass 2: arithmetic mean open duration per label.
    ///
    /// When the label filter is set, only issues carrying that label
    /// participate. An issue contributes its duration once to every label it
    /// carries. Labels with no qualifying durations do not appear. Output
    /// order is label encounter order.
    pub fn label_duration_means(&self, issues: &[Issue]) -> Vec<LabelMean> {
        let mut order: Vec<String> = Vec::new();
        let mut durations: HashMap<String, Vec<i64>> = HashMap::new();

        for issue in issues {
            if let Some(filter) = &self.label_filter {
                if !issue.has_label(filter) {
                    continue;
                }
            }
            let Some(days) = issue.duration_days else {
                continue;
            };

            for label in &issue.labels {
                if !durations.contains_key(label) {
                    order.push(label.clone());
                }
                durations.entry(label.clone()).or_default().push(days);
            }
        }

        order
            .into_iter()
            .map(|label| {
                let values = &durations[&label];
                let mean_days = values.iter().sum::<i64>() as f64 / values.len() as f64;
                LabelMean { label, mean_days }
            })
            .collect()
    }

    /// Pass 3: count issues per calendar month of creation and of update.
    ///
    /// Each table covers only issues where that timestamp is present. Only
    /// observed months appear; gaps are not densified. Keys ascend
    /// chronologically.
    pub fn monthly_trends(&self, issues: &[Issue]) -> MonthlyTrends {
        let mut created: BTreeMap<String, u64> = BTreeMap::new();
        let mut closed: BTreeMap<String, u64> = BTreeMap::new();

        for issue in issues {
            if let Some(ts) = issue.created_at {
                *created.entry(month_key(&ts)).or_insert(0) += 1;
            }
            if let Some(ts) = issue.updated_at {
                *closed.entry(month_key(&ts)).or_insert(0) += 1;
            }
        }

        let collect = |table: BTreeMap<String, u64>| {
            table
                .into_iter()
                .map(|(month, count)| MonthCount { month, count })
                .collect()
        };

        MonthlyTrends {
            created: collect(created),
            closed: collect(closed),
        }
    }

    /// Pass 4: count, per label, the issues strictly slower than the
    /// population mean.
    ///
    /// The mean is taken over every issue with a derived duration; if no
    /// issue has one, the computation is undefined and fails with
    /// [`Error::EmptyInput`] rather than producing a NaN. A bottleneck issue
    /// increments each of its labels once. Counts are sorted descending,
    /// ties in label encounter order.
    pub fn bottlenecks(&self, issues: &[Issue]) -> Result<BottleneckSummary> {
        let durations: Vec<i64> = issues.iter().filter_map(|i| i.duration_days).collect();
        if durations.is_empty() {
            return Err(Error::EmptyInput(
                "no issue has a derived duration; cannot compute the mean".to_string(),
            ));
        }

        let mean_days = durations.iter().sum::<i64>() as f64 / durations.len() as f64;

        let mut order: Vec<String> = Vec::new();
        let mut counts: HashMap<String, u64> = HashMap::new();

        for issue in issues {
            let is_bottleneck = issue
                .duration_days
                .is_some_and(|days| days as f64 > mean_days);
            if !is_bottleneck {
                continue;
            }

            for label in &issue.labels {
                if !counts.contains_key(label) {
                    order.push(label.clone());
                }
                *counts.entry(label.clone()).or_insert(0) += 1;
            }
        }

        let mut ranked: Vec<LabelCount> = order
            .into_iter()
            .map(|label| LabelCount {
                count: counts[&label],
                label,
            })
            .collect();
        // Stable sort preserves encounter order among equal counts
        ranked.sort_by(|a, b| b.count.cmp(&a.count));

        Ok(BottleneckSummary {
            mean_days,
            counts: ranked,
        })
    }

    /// Run all four passes and hand each non-empty result to the sink.
    ///
    /// Fatal conditions: an empty issue set, or no issue acquiring a
    /// duration (pass 4's precondition). An individual view coming up empty
    /// is not fatal; its chart is skipped and the run continues.
    pub fn run(&self, issues: Vec<Issue>, sink: &mut dyn ChartSink) -> Result<LifecycleReport> {
        if issues.is_empty() {
            return Err(Error::EmptyInput("no issues to analyze".to_string()));
        }

        let issues = self.derive_durations(issues);

        let label_means = self.label_duration_means(&issues);
        if label_means.is_empty() {
            tracing::debug!("no label has a qualifying duration; skipping time-to-close chart");
        } else {
            sink.render(&time_to_close_chart(&label_means))?;
        }

        let trends = self.monthly_trends(&issues);
        if trends.is_empty() {
            tracing::debug!("no issue has a timestamp; skipping trends chart");
        } else {
            sink.render(&monthly_trends_chart(&trends))?;
        }

        let bottlenecks = self.bottlenecks(&issues)?;
        if bottlenecks.counts.is_empty() {
            tracing::debug!(
                mean_days = bottlenecks.mean_days,
                "no issue exceeds the mean duration; skipping bottleneck chart"
            );
        } else {
            sink.render(&bottleneck_chart(&bottlenecks))?;
        }

        Ok(LifecycleReport {
            label_means,
            trends,
            bottlenecks,
        })
    }
}

fn time_to_close_chart(means: &[LabelMean]) -> Chart {
    let points = means
        .iter()
        .map(|m| (m.label.clone(), m.mean_days))
        .collect();

    Chart {
        kind: ChartKind::Bar,
        title: "Average Time-to-Close by Label".to_string(),
        x_label: "Labels".to_string(),
        y_label: "Average Time-to-Close (days)".to_string(),
        series: vec![Series::new("avg days open", SeriesColor::SkyBlue, points)],
    }
}

fn monthly_trends_chart(trends: &MonthlyTrends) -> Chart {
    let to_points = |counts: &[MonthCount]| {
        counts
            .iter()
            .map(|c| (c.month.clone(), c.count as f64))
            .collect()
    };

    Chart {
        kind: ChartKind::Line,
        title: "Monthly Trends of Issues Created and Closed".to_string(),
        x_label: "Month".to_string(),
        y_label: "Number of Issues".to_string(),
        series: vec![
            Series::new("Issues Created", SeriesColor::Blue, to_points(&trends.created)),
            Series::new("Issues Closed", SeriesColor::Red, to_points(&trends.closed)),
        ],
    }
}

fn bottleneck_chart(summary: &BottleneckSummary) -> Chart {
    let points = summary
        .counts
        .iter()
        .map(|c| (c.label.clone(), c.count as f64))
        .collect();

    Chart {
        kind: ChartKind::Bar,
        title: "Bottleneck Issues by Label".to_string(),
        x_label: "Labels".to_string(),
        y_label: "Count of Bottleneck Issues".to_string(),
        series: vec![Series::new("bottleneck issues", SeriesColor::Salmon, points)],
    }
}
