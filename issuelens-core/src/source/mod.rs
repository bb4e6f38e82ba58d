//! Issue acquisition from tracker exports.
//!
//! The analysis core never talks to a tracker directly: anything that can
//! produce an in-memory sequence of [`Issue`]s implements [`IssueSource`].
//! The shipped implementation reads JSON/JSONL export files.
//!
//! ## Design Principles
//!
//! 1. **Resilience**: parse failures for individual records log warnings but
//!    continue; only file-level failures are fatal
//! 2. **Extensible**: new trackers only require implementing this trait

mod export;

pub use export::JsonExportSource;

use crate::error::Result;
use crate::types::Issue;

/// Trait implemented by all issue sources.
///
/// A source hands over the full record set in one call; the analysis is a
/// batch computation and has no notion of incremental delivery.
pub trait IssueSource {
    /// Load all issues this source can see.
    fn issues(&self) -> Result<Vec<Issue>>;
}
