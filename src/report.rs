//! Markdown report for a single scan.

use crate::error::{Result, TrackerError};
use crate::models::{timestamp, Breakdown, ScanRecord, Severity};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, Default)]
pub struct ReportOptions {
    /// List breakdown keys alphabetically instead of first-seen order.
    pub sort_breakdowns: bool,
}

/// Render `record` as Markdown. Pure; never fails.
pub fn render(record: &ScanRecord, opts: ReportOptions) -> String {
    let breakdown: Breakdown = if opts.sort_breakdowns {
        record.breakdown().sorted()
    } else {
        record.breakdown().clone()
    };

    let mut out = String::new();
    let _ = writeln!(out, "# Issue Detection Report");
    let _ = writeln!(out, "Generated: {}", timestamp::format(&record.timestamp()));
    let _ = writeln!(out);
    let _ = writeln!(out, "## Summary");
    let _ = writeln!(out, "- **Total Issues**: {}", record.total_issues());
    let _ = writeln!(out);

    let _ = writeln!(out, "### By Severity");
    for (sev, count) in breakdown.by_severity.iter() {
        let _ = writeln!(
            out,
            "- {} **{}**: {}",
            Severity::from(sev).marker(),
            title_case(sev),
            count
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "### By Type");
    for (kind, count) in breakdown.by_type.iter() {
        let _ = writeln!(out, "- **{}**: {}", title_case(&kind.replace('_', " ")), count);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "## Detailed Issues");
    for (i, issue) in record.issues().iter().enumerate() {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "### {}. {} {}",
            i + 1,
            issue.severity.marker(),
            issue.message
        );
        if let Some(file) = &issue.file {
            let _ = write!(out, "**File**: `{}`", file);
            if let Some(line) = issue.line {
                let _ = write!(out, ":{}", line);
            }
            let _ = writeln!(out);
        }
    }
    out
}

/// Write the rendered report, replacing any previous one.
pub fn write_report(path: &Path, body: &str) -> Result<()> {
    let err = |source| TrackerError::ReportWrite {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(err)?;
    }
    fs::write(path, body).map_err(err)
}

/// Capitalize the first letter of every word and lowercase the rest.
/// A word starts after any non-alphabetic character.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for ch in s.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Issue, IssueKind};

    fn record() -> ScanRecord {
        let ts = timestamp::parse("2024-05-01T10:20:30Z").unwrap();
        ScanRecord::new(
            ts,
            vec![
                Issue::new(IssueKind::BuildWarning, Severity::Warning, "unused variable 'y'")
                    .in_file("src/x.cpp")
                    .at_line(42),
                Issue::new(IssueKind::TodoMarker, Severity::Info, "TODO found: // TODO")
                    .in_file("src/a.cpp")
                    .at_line(1),
                Issue::new(IssueKind::MemoryIssue, Severity::Warning, "growth")
                    .in_file("include/market/market.h"),
                Issue::new(IssueKind::BuildError, Severity::Error, "Build failed: boom"),
                Issue::new("custom_probe", "critical", "odd one"),
            ],
        )
    }

    #[test]
    fn test_render_full_report() {
        let text = render(&record(), ReportOptions::default());
        let expected = "\
# Issue Detection Report
Generated: 2024-05-01T10:20:30Z

## Summary
- **Total Issues**: 5

### By Severity
- 🟡 **Warning**: 2
- ℹ️ **Info**: 1
- 🔴 **Error**: 1
- ❓ **Critical**: 1

### By Type
- **Build Warning**: 1
- **Todo Marker**: 1
- **Memory Issue**: 1
- **Build Error**: 1
- **Custom Probe**: 1

## Detailed Issues

### 1. 🟡 unused variable 'y'
**File**: `src/x.cpp`:42

### 2. ℹ️ TODO found: // TODO
**File**: `src/a.cpp`:1

### 3. 🟡 growth
**File**: `include/market/market.h`

### 4. 🔴 Build failed: boom

### 5. ❓ odd one
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_sorted_breakdowns() {
        let text = render(
            &record(),
            ReportOptions {
                sort_breakdowns: true,
            },
        );
        let crit = text.find("**Critical**").unwrap();
        let err = text.find("**Error**").unwrap();
        let warn = text.find("**Warning**").unwrap();
        assert!(crit < err && err < warn);
    }

    #[test]
    fn test_empty_scan_renders() {
        let rec = ScanRecord::new(timestamp::now(), Vec::new());
        let text = render(&rec, ReportOptions::default());
        assert!(text.contains("- **Total Issues**: 0"));
        assert!(text.trim_end().ends_with("## Detailed Issues"));
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("integration gap"), "Integration Gap");
        assert_eq!(title_case("error"), "Error");
        assert_eq!(title_case("ERROR"), "Error");
    }

    #[test]
    fn test_write_report_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("out/report.md");
        write_report(&p, "first").unwrap();
        write_report(&p, "second").unwrap();
        assert_eq!(fs::read_to_string(&p).unwrap(), "second");
    }
}
