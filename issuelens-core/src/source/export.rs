//! JSON tracker export loader
//!
//! Reads issue records from tracker export files: either a `.json` file
//! holding an array of records, or a `.jsonl` file with one record per line.
//!
//! # Error Handling
//!
//! The loader is designed to be resilient:
//!
//! - **Malformed records**: logged as a warning, record skipped, loading
//!   continues.
//! - **Missing fields**: `id` falls back to `"unknown"`; absent or null
//!   timestamps stay `None` (a valid state, not an error); absent label
//!   arrays become empty.
//! - **Label shapes**: labels deserialize from bare strings (`"bug"`) or
//!   from GitHub-style objects (`{"name": "bug"}`).
//!
//! A file that cannot be read or whose top-level structure is invalid is a
//! fatal error.

use crate::error::{Error, Result};
use crate::source::IssueSource;
use crate::types::Issue;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Issue source backed by JSON/JSONL export files.
pub struct JsonExportSource {
    paths: Vec<PathBuf>,
}

impl JsonExportSource {
    /// Create a source for a single export file.
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            paths: vec![path.into()],
        }
    }

    /// Create a source for all export files in a directory.
    ///
    /// Discovers `*.json` and `*.jsonl` files (non-recursive), in path order.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let mut paths = Vec::new();

        for pattern in ["*.json", "*.jsonl"] {
            let full_pattern = dir.join(pattern);
            let pattern_str = full_pattern.to_string_lossy();

            let entries = glob::glob(&pattern_str).map_err(|e| Error::Parse {
                path: dir.display().to_string(),
                message: format!("invalid glob pattern: {}", e),
            })?;
            paths.extend(entries.flatten());
        }

        paths.sort();
        Ok(Self { paths })
    }

    /// Paths this source will read, in load order.
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }
}

impl IssueSource for JsonExportSource {
    fn issues(&self) -> Result<Vec<Issue>> {
        let mut issues = Vec::new();

        for path in &self.paths {
            let is_jsonl = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("jsonl"));

            let loaded = if is_jsonl {
                read_jsonl(path)?
            } else {
                read_json_array(path)?
            };

            tracing::debug!(
                path = %path.display(),
                count = loaded.len(),
                "Loaded export file"
            );
            issues.extend(loaded);
        }

        Ok(issues)
    }
}

// ============================================
// Raw export record types (serde deserialization)
// ============================================

/// A single record as it appears in an export file.
///
/// Uses `#[serde(default)]` liberally so partial records still load.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct RawIssue {
    id: Option<RawId>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
    labels: Vec<RawLabel>,
}

/// Trackers export identifiers as strings or numbers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

/// Labels appear as bare strings or as objects with a `name` field.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawLabel {
    Name(String),
    Tag { name: String },
}

impl RawIssue {
    fn into_issue(self) -> Issue {
        let id = match self.id {
            Some(RawId::Text(s)) => s,
            Some(RawId::Number(n)) => n.to_string(),
            None => "unknown".to_string(),
        };

        let labels = self
            .labels
            .into_iter()
            .map(|label| match label {
                RawLabel::Name(name) | RawLabel::Tag { name } => name,
            })
            .collect();

        Issue {
            id,
            created_at: self.created_at,
            updated_at: self.updated_at,
            labels,
            duration_days: None,
        }
    }
}

fn read_jsonl(path: &Path) -> Result<Vec<Issue>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut issues = Vec::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<RawIssue>(&line) {
            Ok(raw) => issues.push(raw.into_issue()),
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    line = line_no + 1,
                    error = %e,
                    "Skipping malformed export record"
                );
            }
        }
    }

    Ok(issues)
}

fn read_json_array(path: &Path) -> Result<Vec<Issue>> {
    let content = std::fs::read_to_string(path)?;

    let raw: Vec<serde_json::Value> =
        serde_json::from_str(&content).map_err(|e| Error::Parse {
            path: path.display().to_string(),
            message: format!("expected a top-level array of issue records: {}", e),
        })?;

    let mut issues = Vec::new();
    for (idx, value) in raw.into_iter().enumerate() {
        match serde_json::from_value::<RawIssue>(value) {
            Ok(raw) => issues.push(raw.into_issue()),
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    record = idx,
                    error = %e,
                    "Skipping malformed export record"
                );
            }
        }
    }

    Ok(issues)
}
