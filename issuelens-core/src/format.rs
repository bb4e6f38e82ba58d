//! Formatting helpers shared across outputs.

use chrono::{DateTime, Utc};

/// Calendar year-month bucket key ("2024-03") for a timestamp.
///
/// Keys sort lexicographically in chronological order.
pub fn month_key(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m").to_string()
}

/// Format a chart value for display: whole numbers without a fraction,
/// everything else with one decimal.
pub fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.1}", value)
    }
}
