//! Whole-file text heuristics.
//!
//! Both checks are substring tests over a single known file. They can be
//! wrong in either direction and only point a reviewer at the file.

use super::{read_evidence, Detector, DetectorGroup, ScanContext};
use crate::config::{HardcodedCfg, MemoryCfg};
use crate::models::{Issue, IssueKind, Severity};

/// Flags containers that are appended to and cleared but never size-checked.
pub struct UnboundedGrowthDetector {
    cfg: MemoryCfg,
}

impl UnboundedGrowthDetector {
    pub fn new(cfg: MemoryCfg) -> Self {
        UnboundedGrowthDetector { cfg }
    }

    pub fn matches(&self, text: &str) -> bool {
        text.contains(&self.cfg.push_pattern)
            && !text.contains(&self.cfg.size_pattern)
            && text.contains(&self.cfg.clear_pattern)
    }
}

impl Detector for UnboundedGrowthDetector {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn group(&self) -> DetectorGroup {
        DetectorGroup::Quality
    }

    fn detect(&self, ctx: &ScanContext<'_>) -> Vec<Issue> {
        match read_evidence(ctx.root, &self.cfg.file) {
            Some(text) if self.matches(&text) => vec![Issue::new(
                IssueKind::MemoryIssue,
                Severity::Warning,
                self.cfg.message.clone(),
            )
            .in_file(self.cfg.file.clone())],
            _ => Vec::new(),
        }
    }
}

/// Flags a specific literal that ought to come from configuration.
pub struct HardcodedValueDetector {
    cfg: HardcodedCfg,
}

impl HardcodedValueDetector {
    pub fn new(cfg: HardcodedCfg) -> Self {
        HardcodedValueDetector { cfg }
    }
}

impl Detector for HardcodedValueDetector {
    fn name(&self) -> &'static str {
        "hardcoded"
    }

    fn group(&self) -> DetectorGroup {
        DetectorGroup::Quality
    }

    fn detect(&self, ctx: &ScanContext<'_>) -> Vec<Issue> {
        match read_evidence(ctx.root, &self.cfg.file) {
            Some(text) if text.contains(&self.cfg.literal) => vec![Issue::new(
                IssueKind::HardcodedValue,
                Severity::Info,
                self.cfg.message.clone(),
            )
            .in_file(self.cfg.file.clone())],
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::SystemRunner;
    use std::fs;
    use std::path::Path;

    fn write(root: &Path, rel: &str, body: &str) {
        let p = root.join(rel);
        fs::create_dir_all(p.parent().unwrap()).unwrap();
        fs::write(p, body).unwrap();
    }

    fn run(d: &dyn Detector, root: &Path) -> Vec<Issue> {
        d.detect(&ScanContext {
            root,
            runner: &SystemRunner,
        })
    }

    #[test]
    fn test_growth_requires_push_and_clear_without_size() {
        let d = UnboundedGrowthDetector::new(MemoryCfg::default());
        assert!(d.matches("v.push_back(x); v.clear();"));
        assert!(!d.matches("v.push_back(x); if (v.size() > 9) v.clear();"));
        assert!(!d.matches("v.push_back(x);"));
        assert!(!d.matches("v.clear();"));
    }

    #[test]
    fn test_growth_issue_shape() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "include/market/market.h",
            "void add(T t) { orders_.push_back(t); }\nvoid reset() { orders_.clear(); }\n",
        );
        let issues = run(&UnboundedGrowthDetector::new(MemoryCfg::default()), dir.path());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, IssueKind::MemoryIssue);
        assert_eq!(issues[0].severity, Severity::Warning);
        assert_eq!(issues[0].file.as_deref(), Some("include/market/market.h"));
        assert_eq!(issues[0].line, None);
    }

    #[test]
    fn test_missing_files_are_silent() {
        let dir = tempfile::tempdir().unwrap();
        assert!(run(&UnboundedGrowthDetector::new(MemoryCfg::default()), dir.path()).is_empty());
        assert!(run(&HardcodedValueDetector::new(HardcodedCfg::default()), dir.path()).is_empty());
    }

    #[test]
    fn test_hardcoded_literal_is_exact() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "src/main.cpp",
            "auto goods = std::vector<std::string>{\"小麦\", \"パン\", \"道具\"};\n",
        );
        let issues = run(&HardcodedValueDetector::new(HardcodedCfg::default()), dir.path());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, IssueKind::HardcodedValue);
        assert_eq!(issues[0].severity, Severity::Info);

        write(
            dir.path(),
            "src/main.cpp",
            "auto goods = {\"小麦\",\"パン\",\"道具\"};\n",
        );
        assert!(run(&HardcodedValueDetector::new(HardcodedCfg::default()), dir.path()).is_empty());
    }
}
