//! Core domain types for issuelens
//!
//! | Term | Definition |
//! |------|------------|
//! | **Issue** | One tracked unit of work with creation/update timestamps and zero or more labels |
//! | **Label** | A free-text category tag; an issue may carry several |
//! | **Duration** | Whole-day span between an issue's creation and last update |
//! | **Bottleneck** | An issue whose duration exceeds the population mean duration |

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One tracked unit of work from an issue tracker.
///
/// Both timestamps are optional: trackers export drafts without creation
/// times and open issues without a last-update time. `duration_days` is a
/// derived field: `None` as loaded, populated only by
/// [`crate::analytics::LifecycleAnalyzer::derive_durations`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Tracker-assigned identifier (e.g. "PROJ-1432"); opaque to the analysis
    pub id: String,
    /// When the issue was opened
    pub created_at: Option<DateTime<Utc>>,
    /// Most recent update (close or last activity)
    pub updated_at: Option<DateTime<Utc>>,
    /// Labels attached to the issue
    #[serde(default)]
    pub labels: Vec<String>,
    /// Whole days the issue stayed open; derived, never read from exports
    #[serde(skip)]
    pub duration_days: Option<i64>,
}

impl Issue {
    /// Check whether this issue carries the given label.
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }
}
