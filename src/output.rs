//! Output rendering for the `scan` and `history` commands.
//!
//! Supports `human` (default) and `json` outputs. The JSON form of a scan is
//! the scan record itself plus where it was persisted.

use crate::models::{History, ScanRecord, Tally};
use crate::utils::use_colors;
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;
use std::path::Path;

/// Print the end-of-scan summary.
pub fn print_scan(record: &ScanRecord, output: &str, history: &Path, report: &Path) {
    match output {
        "json" => println!(
            "{}",
            serde_json::to_string_pretty(&compose_scan_json(record, history, report))
                .unwrap_or_default()
        ),
        _ => {
            let color = use_colors(output);
            let heading = "Scan Results:";
            if color {
                println!("{}", heading.bold());
            } else {
                println!("{}", heading);
            }
            println!("Total issues: {}", record.total_issues());
            println!();
            println!("By severity:");
            print_tally(&record.breakdown().by_severity, color);
            println!();
            println!("By type:");
            print_tally(&record.breakdown().by_type, false);
            println!();
            println!("History saved to: {}", history.display());
            println!("Detailed report saved to: {}", report.display());
        }
    }
}

fn print_tally(tally: &Tally, color: bool) {
    for (key, count) in tally.iter() {
        let label = if color {
            match key {
                "error" => key.red().to_string(),
                "warning" => key.yellow().to_string(),
                "info" => key.blue().to_string(),
                "enhancement" => key.green().to_string(),
                _ => key.to_string(),
            }
        } else {
            key.to_string()
        };
        println!("  {}: {}", label, count);
    }
}

/// Print one line per persisted scan, oldest first.
pub fn print_history(history: &History, output: &str) {
    match output {
        "json" => println!(
            "{}",
            serde_json::to_string_pretty(&compose_history_json(history)).unwrap_or_default()
        ),
        _ => {
            let color = use_colors(output);
            if history.scans.is_empty() {
                println!("no scans recorded");
                return;
            }
            for (i, scan) in history.scans.iter().enumerate() {
                let sev = scan
                    .breakdown()
                    .by_severity
                    .iter()
                    .map(|(k, c)| format!("{}={}", k, c))
                    .collect::<Vec<_>>()
                    .join(" ");
                let ts = crate::models::timestamp::format(&scan.timestamp());
                let ts = if color { ts.bold().to_string() } else { ts };
                println!("{:>2}. {} total={} {}", i + 1, ts, scan.total_issues(), sev);
            }
        }
    }
}

/// Compose scan JSON (pure) for testing.
pub fn compose_scan_json(record: &ScanRecord, history: &Path, report: &Path) -> JsonVal {
    json!({
        "scan": record,
        "history": history.to_string_lossy(),
        "report": report.to_string_lossy(),
    })
}

/// Compose history JSON (pure): per-scan summaries without issue lists.
pub fn compose_history_json(history: &History) -> JsonVal {
    let scans: Vec<_> = history
        .scans
        .iter()
        .map(|s| {
            json!({
                "timestamp": crate::models::timestamp::format(&s.timestamp()),
                "total_issues": s.total_issues(),
                "severity_breakdown": s.breakdown(),
            })
        })
        .collect();
    json!({"scans": scans, "count": history.scans.len()})
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{timestamp, Issue, IssueKind, Severity};

    fn record() -> ScanRecord {
        ScanRecord::new(
            timestamp::now(),
            vec![
                Issue::new(IssueKind::TodoMarker, Severity::Info, "a"),
                Issue::new(IssueKind::BuildWarning, Severity::Warning, "b"),
            ],
        )
    }

    #[test]
    fn test_compose_scan_json_shape() {
        let out = compose_scan_json(&record(), Path::new("h.json"), Path::new("r.md"));
        assert_eq!(out["scan"]["total_issues"], 2);
        assert_eq!(out["scan"]["severity_breakdown"]["by_type"]["todo_marker"], 1);
        assert_eq!(out["history"], "h.json");
        // breakdown keys stay in first-seen order
        let keys: Vec<_> = out["scan"]["severity_breakdown"]["by_severity"]
            .as_object()
            .unwrap()
            .keys()
            .cloned()
            .collect();
        assert_eq!(keys, vec!["info", "warning"]);
    }

    #[test]
    fn test_compose_history_json_omits_issues() {
        let mut h = History::default();
        h.append_and_trim(record(), 10);
        let out = compose_history_json(&h);
        assert_eq!(out["count"], 1);
        assert_eq!(out["scans"][0]["total_issues"], 2);
        assert!(out["scans"][0].get("issues").is_none());
    }
}
