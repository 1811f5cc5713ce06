//! Export statistics.

use std::path::PathBuf;

/// Outcome of one export run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    /// Posts pulled from the collection.
    pub posts_seen: u64,
    /// Units successfully written.
    pub units: u64,
    /// Units whose fetch returned a non-success status.
    pub failures: u64,
    /// Video entries filtered out in image mode.
    pub skipped: u64,
    /// Files left on disk by the run.
    pub artifacts: Vec<PathBuf>,
}

impl ExportSummary {
    /// Whether the run produced nothing at all.
    pub fn is_empty(&self) -> bool {
        self.units == 0 && self.failures == 0
    }

    pub fn record_written(&mut self) {
        self.units += 1;
    }

    pub fn record_failure(&mut self) {
        self.failures += 1;
    }
}
