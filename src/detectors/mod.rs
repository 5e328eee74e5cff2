//! Detectors: independent evidence sources that each yield zero or more
//! issues.
//!
//! A detector never fails the scan. Missing files give an empty result,
//! unreadable files are skipped with a warning, and a broken toolchain
//! turns into a single `build_error` issue.

pub mod build;
pub mod heuristics;
pub mod integration;
pub mod markers;

pub use build::BuildDetector;
pub use heuristics::{HardcodedValueDetector, UnboundedGrowthDetector};
pub use integration::IntegrationGapDetector;
pub use markers::MarkerDetector;

use crate::config::Effective;
use crate::models::Issue;
use crate::runner::CommandRunner;
use std::fmt;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
/// Detector families, in the order the aggregator runs them.
pub enum DetectorGroup {
    Build,
    Quality,
    Integration,
}

impl fmt::Display for DetectorGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DetectorGroup::Build => "build",
            DetectorGroup::Quality => "quality",
            DetectorGroup::Integration => "integration",
        })
    }
}

/// Repository state handed to every detector.
pub struct ScanContext<'a> {
    pub root: &'a Path,
    pub runner: &'a dyn CommandRunner,
}

pub trait Detector: Send + Sync {
    fn name(&self) -> &'static str;
    fn group(&self) -> DetectorGroup;
    fn detect(&self, ctx: &ScanContext<'_>) -> Vec<Issue>;
}

/// The standard detector set, configured from `eff`.
pub fn default_detectors(eff: &Effective) -> Vec<Box<dyn Detector>> {
    let mut out: Vec<Box<dyn Detector>> = Vec::new();
    if eff.build.enabled {
        out.push(Box::new(BuildDetector::new(eff.build.clone())));
    }
    out.push(Box::new(MarkerDetector::new(eff.markers.clone())));
    out.push(Box::new(UnboundedGrowthDetector::new(eff.memory.clone())));
    out.push(Box::new(HardcodedValueDetector::new(eff.hardcoded.clone())));
    out.push(Box::new(IntegrationGapDetector::new(eff.integration.clone())));
    out
}

/// Read a fixed-path evidence file relative to `root`.
///
/// Returns `None` when the file does not exist or cannot be read as text.
pub(crate) fn read_evidence(root: &Path, rel: &str) -> Option<String> {
    let path = root.join(rel);
    if !path.is_file() {
        return None;
    }
    match fs::read_to_string(&path) {
        Ok(s) => Some(s),
        Err(e) => {
            tracing::warn!(file = %path.display(), error = %e, "skipping unreadable file");
            None
        }
    }
}
