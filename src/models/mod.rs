//! Shared data models: issues, scan records, and the persisted history.

pub mod breakdown;
pub mod timestamp;
pub mod vocab;

pub use breakdown::{Breakdown, Tally};
pub use vocab::{IssueKind, Severity};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as Json};

/// Number of scans kept in the history file.
pub const MAX_SCANS: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// A single finding from one detector.
///
/// `file` and `line` are omitted entirely for repository-wide findings.
pub struct Issue {
    #[serde(rename = "type")]
    pub kind: IssueKind,
    pub severity: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    pub message: String,
    /// Compiler diagnostic group, e.g. `-Wunused-variable`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(with = "timestamp")]
    pub detected_at: DateTime<Utc>,
}

impl Issue {
    pub fn new(
        kind: impl Into<IssueKind>,
        severity: impl Into<Severity>,
        message: impl Into<String>,
    ) -> Self {
        Issue {
            kind: kind.into(),
            severity: severity.into(),
            file: None,
            line: None,
            message: message.into(),
            category: None,
            detected_at: timestamp::now(),
        }
    }

    pub fn in_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawScanRecord")]
/// Result of one full pipeline run. Counts are derived from `issues` at
/// construction and cannot be edited afterwards.
pub struct ScanRecord {
    #[serde(with = "timestamp")]
    timestamp: DateTime<Utc>,
    total_issues: usize,
    severity_breakdown: Breakdown,
    issues: Vec<Issue>,
}

impl ScanRecord {
    pub fn new(timestamp: DateTime<Utc>, issues: Vec<Issue>) -> Self {
        ScanRecord {
            timestamp,
            total_issues: issues.len(),
            severity_breakdown: Breakdown::from_issues(&issues),
            issues,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn total_issues(&self) -> usize {
        self.total_issues
    }

    pub fn breakdown(&self) -> &Breakdown {
        &self.severity_breakdown
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }
}

#[derive(Deserialize)]
struct RawScanRecord {
    #[serde(with = "timestamp")]
    timestamp: DateTime<Utc>,
    total_issues: usize,
    severity_breakdown: Breakdown,
    issues: Vec<Issue>,
}

impl TryFrom<RawScanRecord> for ScanRecord {
    type Error = String;

    fn try_from(raw: RawScanRecord) -> Result<Self, Self::Error> {
        let n = raw.issues.len();
        if raw.total_issues != n {
            return Err(format!(
                "total_issues is {} but {} issues are recorded",
                raw.total_issues, n
            ));
        }
        let b = &raw.severity_breakdown;
        if b.by_severity.total() != n || b.by_type.total() != n {
            return Err(format!(
                "severity_breakdown does not add up to {} issues",
                n
            ));
        }
        Ok(ScanRecord {
            timestamp: raw.timestamp,
            total_issues: raw.total_issues,
            severity_breakdown: raw.severity_breakdown,
            issues: raw.issues,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
/// Persisted state across runs.
pub struct History {
    #[serde(default)]
    pub scans: Vec<ScanRecord>,
    /// Reserved for resolution tracking; carried through untouched.
    #[serde(default)]
    pub resolved_issues: Vec<Json>,
    /// Keys this version does not know about, kept for the next save.
    #[serde(flatten)]
    pub extra: Map<String, Json>,
}

impl History {
    /// Append `record`, then drop the oldest scans beyond `max_scans`.
    pub fn append_and_trim(&mut self, record: ScanRecord, max_scans: usize) {
        self.scans.push(record);
        let cap = max_scans.max(1);
        if self.scans.len() > cap {
            let excess = self.scans.len() - cap;
            self.scans.drain(..excess);
        }
    }

    pub fn latest(&self) -> Option<&ScanRecord> {
        self.scans.last()
    }
}
