//! Open vocabularies for issue severity and issue type.
//!
//! Both are string-tagged on disk. Known tags map to dedicated variants;
//! anything else is kept verbatim in `Other` so histories written by newer
//! detectors still load and render.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
/// How urgent a finding is.
pub enum Severity {
    Error,
    Warning,
    Info,
    Enhancement,
    Other(String),
}

impl Severity {
    pub fn as_str(&self) -> &str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
            Severity::Enhancement => "enhancement",
            Severity::Other(s) => s.as_str(),
        }
    }

    /// Marker shown next to the severity in reports. Unknown levels get a
    /// generic question mark.
    pub fn marker(&self) -> &'static str {
        match self {
            Severity::Error => "🔴",
            Severity::Warning => "🟡",
            Severity::Info => "ℹ️",
            Severity::Enhancement => "🔧",
            Severity::Other(_) => "❓",
        }
    }
}

impl From<String> for Severity {
    fn from(s: String) -> Self {
        match s.as_str() {
            "error" => Severity::Error,
            "warning" => Severity::Warning,
            "info" => Severity::Info,
            "enhancement" => Severity::Enhancement,
            _ => Severity::Other(s),
        }
    }
}

impl From<&str> for Severity {
    fn from(s: &str) -> Self {
        Severity::from(s.to_string())
    }
}

impl From<Severity> for String {
    fn from(s: Severity) -> Self {
        match s {
            Severity::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
/// Category of a finding, one per detector family.
pub enum IssueKind {
    BuildWarning,
    BuildError,
    TodoMarker,
    MemoryIssue,
    HardcodedValue,
    IntegrationGap,
    Other(String),
}

impl IssueKind {
    pub fn as_str(&self) -> &str {
        match self {
            IssueKind::BuildWarning => "build_warning",
            IssueKind::BuildError => "build_error",
            IssueKind::TodoMarker => "todo_marker",
            IssueKind::MemoryIssue => "memory_issue",
            IssueKind::HardcodedValue => "hardcoded_value",
            IssueKind::IntegrationGap => "integration_gap",
            IssueKind::Other(s) => s.as_str(),
        }
    }
}

impl From<String> for IssueKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "build_warning" => IssueKind::BuildWarning,
            "build_error" => IssueKind::BuildError,
            "todo_marker" => IssueKind::TodoMarker,
            "memory_issue" => IssueKind::MemoryIssue,
            "hardcoded_value" => IssueKind::HardcodedValue,
            "integration_gap" => IssueKind::IntegrationGap,
            _ => IssueKind::Other(s),
        }
    }
}

impl From<&str> for IssueKind {
    fn from(s: &str) -> Self {
        IssueKind::from(s.to_string())
    }
}

impl From<IssueKind> for String {
    fn from(k: IssueKind) -> Self {
        match k {
            IssueKind::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
