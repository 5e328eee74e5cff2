use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn repowatch(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_repowatch"))
        .args(args)
        .env("NO_COLOR", "1")
        .env_remove("REPOWATCH_LOG")
        .output()
        .unwrap()
}

fn fixture(root: &Path) {
    fs::create_dir_all(root.join(".git")).unwrap();
    fs::create_dir_all(root.join("src")).unwrap();
    fs::write(root.join("src/main.cpp"), "int main() {\n  // TODO wire up\n}\n").unwrap();
}

#[test]
fn test_scan_with_findings_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fixture(root);
    let out = repowatch(&[
        "scan",
        "--skip-build",
        "--output",
        "json",
        "--report",
        "out/report.md",
        "--repo-root",
        root.to_str().unwrap(),
    ]);
    assert_eq!(out.status.code(), Some(0), "{}", String::from_utf8_lossy(&out.stderr));
    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(json["scan"]["total_issues"], 1);
    assert!(root.join("docs/issue_tracking.json").is_file());
    assert!(root.join("out/report.md").is_file());
}

#[test]
fn test_corrupt_history_exits_two() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fixture(root);
    fs::create_dir_all(root.join("docs")).unwrap();
    fs::write(root.join("docs/issue_tracking.json"), "{ nope").unwrap();
    let out = repowatch(&[
        "scan",
        "--skip-build",
        "--report",
        "out/report.md",
        "--repo-root",
        root.to_str().unwrap(),
    ]);
    assert_eq!(out.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("error: history file"), "{}", stderr);
    assert!(!root.join("out/report.md").exists());
}

#[test]
fn test_report_without_history_exits_two() {
    let dir = tempfile::tempdir().unwrap();
    fixture(dir.path());
    let out = repowatch(&["report", "--repo-root", dir.path().to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&out.stderr).contains("error: no scans recorded"));
}
