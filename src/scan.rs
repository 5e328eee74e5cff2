//! Scan aggregation.
//!
//! Runs detectors group by group (build, quality, integration), keeping each
//! detector's own ordering, and wraps the concatenated issues in a
//! `ScanRecord`.

use crate::detectors::{Detector, ScanContext};
use crate::models::{timestamp, Issue, ScanRecord};

/// Run every detector and build one scan record stamped with the current
/// time. Detectors are ordered by group; within a group the given order is
/// kept.
pub fn run_full_scan(ctx: &ScanContext<'_>, detectors: &[Box<dyn Detector>]) -> ScanRecord {
    let mut ordered: Vec<&dyn Detector> = detectors.iter().map(|d| d.as_ref()).collect();
    ordered.sort_by_key(|d| d.group());

    let mut issues: Vec<Issue> = Vec::new();
    let mut current_group = None;
    for d in ordered {
        if current_group != Some(d.group()) {
            current_group = Some(d.group());
            tracing::info!(group = %d.group(), "running detector group");
        }
        let found = d.detect(ctx);
        tracing::debug!(detector = d.name(), issues = found.len(), "detector finished");
        issues.extend(found);
    }
    let record = ScanRecord::new(timestamp::now(), issues);
    tracing::info!(total = record.total_issues(), "scan complete");
    record
}
