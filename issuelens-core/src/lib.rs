//! # issuelens-core
//!
//! Core library for issuelens - descriptive statistics over issue-tracker
//! exports.
//!
//! This library provides:
//! - Domain types for issues and chart requests
//! - Export loading (JSON / JSONL tracker exports)
//! - Lifecycle analytics: open durations, per-label time-to-close means,
//!   monthly created/closed trends, bottleneck detection
//! - Configuration management
//! - Logging infrastructure
//!
//! ## Architecture
//!
//! A single batch pipeline: a source loads all issues into memory, the
//! analyzer derives durations and runs three aggregations over them, and
//! each result is handed to a rendering sink as a chart request. Nothing is
//! persisted; every entity lives for one run.
//!
//! ## Example
//!
//! ```rust,no_run
//! use issuelens_core::analytics::LifecycleAnalyzer;
//! use issuelens_core::source::{IssueSource, JsonExportSource};
//!
//! # fn demo(sink: &mut dyn issuelens_core::analytics::ChartSink) -> issuelens_core::Result<()> {
//! let source = JsonExportSource::from_file("export.jsonl");
//! let issues = source.issues()?;
//!
//! let analyzer = LifecycleAnalyzer::new(Some("ui".to_string()));
//! let report = analyzer.run(issues, sink)?;
//! println!("{} labels aggregated", report.label_means.len());
//! # Ok(())
//! # }
//! ```

// Re-export commonly used items at the crate root
pub use config::Config;
pub use error::{Error, Result};
pub use source::{IssueSource, JsonExportSource};
pub use types::*;

// Public modules
pub mod analytics;
pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod source;
pub mod types;
