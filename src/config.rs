//! Configuration discovery and effective settings resolution.
//!
//! repowatch reads `repowatch.toml|yaml|yml` from the repository root (or the
//! closest ancestor) and merges it with CLI flags to produce an `Effective`
//! config. Every detector section has defaults that describe the simulation
//! codebase the tracker was first written for:
//! - `build`: `cmake ..` then `make` inside `build/`, no timeout
//! - `markers`: `*.h`/`*.cpp`, TODO/FIXME/XXX/HACK, skipping `build/` and `.git/`
//! - `memory`: `include/market/market.h`
//! - `hardcoded`: `src/main.cpp`
//! - `integration`: `src/main.cpp` against headers under `include/`
//! - `history.path`: `docs/issue_tracking.json`, `history.max_scans`: 10
//! - `report.path`: `latest_issue_report.md` in the system temp directory
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::error::{Result, TrackerError};
use crate::models::MAX_SCANS;
use serde::Deserialize;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;

const CONFIG_NAMES: [&str; 3] = ["repowatch.toml", "repowatch.yaml", "repowatch.yml"];

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
/// `[build]`: how the project is configured and compiled.
pub struct BuildCfg {
    pub enabled: bool,
    /// Scratch directory, relative to the repository root. Wiped every run.
    pub dir: String,
    pub configure: Vec<String>,
    pub build: Vec<String>,
    pub timeout_secs: Option<u64>,
}

impl Default for BuildCfg {
    fn default() -> Self {
        BuildCfg {
            enabled: true,
            dir: "build".into(),
            configure: vec!["cmake".into(), "..".into()],
            build: vec!["make".into()],
            timeout_secs: None,
        }
    }
}

impl BuildCfg {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// The scratch directory under `root`, or `None` when `dir` is not a
    /// plain relative path below the root (absolute, empty, `.` or `..`).
    pub fn scratch_dir(&self, root: &Path) -> Option<PathBuf> {
        let rel = Path::new(self.dir.trim());
        let mut parts = rel.components().peekable();
        parts.peek()?;
        if parts.all(|c| matches!(c, Component::Normal(_))) {
            Some(root.join(rel))
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
/// `[markers]`: marker comment scan.
pub struct MarkersCfg {
    pub extensions: Vec<String>,
    /// Checked in order; the first marker found on a line wins.
    pub vocabulary: Vec<String>,
    pub exclude_dirs: Vec<String>,
}

impl Default for MarkersCfg {
    fn default() -> Self {
        MarkersCfg {
            extensions: vec!["h".into(), "cpp".into()],
            vocabulary: vec!["TODO".into(), "FIXME".into(), "XXX".into(), "HACK".into()],
            exclude_dirs: vec!["build".into(), ".git".into()],
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
/// `[memory]`: unbounded container growth heuristic.
pub struct MemoryCfg {
    pub file: String,
    pub push_pattern: String,
    pub size_pattern: String,
    pub clear_pattern: String,
    pub message: String,
}

impl Default for MemoryCfg {
    fn default() -> Self {
        MemoryCfg {
            file: "include/market/market.h".into(),
            push_pattern: "push_back".into(),
            size_pattern: "size()".into(),
            clear_pattern: "clear()".into(),
            message: "Unbounded vector growth detected in Market class".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
/// `[hardcoded]`: literal that should live in configuration instead.
pub struct HardcodedCfg {
    pub file: String,
    pub literal: String,
    pub message: String,
}

impl Default for HardcodedCfg {
    fn default() -> Self {
        HardcodedCfg {
            file: "src/main.cpp".into(),
            literal: r#"{"小麦", "パン", "道具"}"#.into(),
            message: "Hardcoded product list found - consider making configurable".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
/// A feature whose header should not be included without being used.
pub struct FeatureCheck {
    pub name: String,
    /// Header path relative to `include_dir`, exactly as written in `#include`.
    pub header: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
/// `[integration]`: included-but-unused features in the entry point.
pub struct IntegrationCfg {
    pub entry_file: String,
    pub include_dir: String,
    pub features: Vec<FeatureCheck>,
}

impl Default for IntegrationCfg {
    fn default() -> Self {
        let feature = |name: &str, header: &str| FeatureCheck {
            name: name.into(),
            header: header.into(),
        };
        IntegrationCfg {
            entry_file: "src/main.cpp".into(),
            include_dir: "include".into(),
            features: vec![
                feature("TradeRoute", "system/trade_route.h"),
                feature("Government", "agent/government.h"),
                feature("LoanProvider", "agent/loan_provider.h"),
            ],
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
/// `[history]`
pub struct HistoryCfg {
    pub path: String,
    pub max_scans: usize,
}

impl Default for HistoryCfg {
    fn default() -> Self {
        HistoryCfg {
            path: "docs/issue_tracking.json".into(),
            max_scans: MAX_SCANS,
        }
    }
}

#[derive(Debug, Default, Clone, Deserialize, PartialEq)]
#[serde(default)]
/// `[report]`
pub struct ReportCfg {
    pub path: Option<String>,
    /// List breakdown keys alphabetically instead of first-seen order.
    pub sort_breakdowns: bool,
}

#[derive(Debug, Default, Clone, Deserialize, PartialEq)]
#[serde(default)]
/// Root configuration loaded from `repowatch.toml|yaml`.
pub struct RepowatchConfig {
    pub output: Option<String>,
    pub build: BuildCfg,
    pub markers: MarkersCfg,
    pub memory: MemoryCfg,
    pub hardcoded: HardcodedCfg,
    pub integration: IntegrationCfg,
    pub history: HistoryCfg,
    pub report: ReportCfg,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub repo_root: PathBuf,
    pub output: String,
    pub build: BuildCfg,
    pub markers: MarkersCfg,
    pub memory: MemoryCfg,
    pub hardcoded: HardcodedCfg,
    pub integration: IntegrationCfg,
    pub history_path: PathBuf,
    pub max_scans: usize,
    pub report_path: PathBuf,
    pub sort_breakdowns: bool,
    /// Config file that was applied, if any.
    pub config_path: Option<PathBuf>,
}

#[derive(Debug, Default, Clone)]
/// CLI-provided overrides. `None` means "not given on the command line".
pub struct Overrides {
    pub repo_root: Option<String>,
    pub config: Option<String>,
    pub output: Option<String>,
    pub skip_build: bool,
    pub report: Option<String>,
}

/// Walk upward from `start` to detect the repository root.
///
/// Stops when a `repowatch.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if CONFIG_NAMES.iter().any(|n| cur.join(n).exists()) || cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Parse a config file; the format follows the extension (`.yaml|.yml` or TOML).
pub fn parse_config_file(path: &Path) -> Result<RepowatchConfig> {
    let s = fs::read_to_string(path).map_err(|e| TrackerError::ConfigParse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    let parsed: std::result::Result<RepowatchConfig, String> = if is_yaml {
        serde_yaml::from_str(&s).map_err(|e| e.to_string())
    } else {
        toml::from_str(&s).map_err(|e| e.to_string())
    };
    parsed.map_err(|reason| TrackerError::ConfigParse {
        path: path.to_path_buf(),
        reason,
    })
}

/// First `repowatch.{toml,yaml,yml}` present in `root`.
pub fn find_config(root: &Path) -> Option<PathBuf> {
    CONFIG_NAMES
        .iter()
        .map(|name| root.join(name))
        .find(|p| p.is_file())
}

/// Absolute directory the root search starts from. Relative `--repo-root`
/// values and the default resolve against the current directory.
fn search_start(repo_root: Option<&str>) -> Result<PathBuf> {
    if let Some(p) = repo_root.map(Path::new).filter(|p| p.is_absolute()) {
        return Ok(p.to_path_buf());
    }
    let cwd = std::env::current_dir().map_err(|e| TrackerError::InvalidConfig {
        reason: format!("cannot determine current directory: {}", e),
    })?;
    Ok(match repo_root {
        Some(p) => {
            let joined = cwd.join(p);
            fs::canonicalize(&joined).unwrap_or(joined)
        }
        None => cwd,
    })
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(cli: &Overrides) -> Result<Effective> {
    let start = search_start(cli.repo_root.as_deref())?;
    let repo_root = detect_repo_root(&start);
    let config_path = match cli.config.as_deref() {
        Some(p) => Some(PathBuf::from(p)),
        None => find_config(&repo_root),
    };
    let cfg = match &config_path {
        Some(p) => parse_config_file(p)?,
        None => RepowatchConfig::default(),
    };
    validate(&cfg)?;

    let output = cli
        .output
        .clone()
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());

    let mut build = cfg.build;
    if cli.skip_build {
        build.enabled = false;
    }

    let report_path = match cli.report.as_deref().or(cfg.report.path.as_deref()) {
        Some(p) => repo_root.join(p),
        None => std::env::temp_dir().join("latest_issue_report.md"),
    };

    Ok(Effective {
        history_path: repo_root.join(&cfg.history.path),
        max_scans: cfg.history.max_scans,
        report_path,
        sort_breakdowns: cfg.report.sort_breakdowns,
        output,
        build,
        markers: cfg.markers,
        memory: cfg.memory,
        hardcoded: cfg.hardcoded,
        integration: cfg.integration,
        config_path,
        repo_root,
    })
}

fn validate(cfg: &RepowatchConfig) -> Result<()> {
    let invalid = |reason: &str| {
        Err(TrackerError::InvalidConfig {
            reason: reason.to_string(),
        })
    };
    if cfg.build.enabled && (cfg.build.configure.is_empty() || cfg.build.build.is_empty()) {
        return invalid("[build] configure and build commands must not be empty");
    }
    if cfg.build.scratch_dir(Path::new("")).is_none() {
        return invalid("[build] dir must be a relative path inside the repository, without `.` or `..`");
    }
    if cfg.history.max_scans == 0 {
        return invalid("[history] max_scans must be at least 1");
    }
    if let Some(out) = cfg.output.as_deref() {
        if out != "human" && out != "json" {
            return invalid("output must be human or json");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn overrides_for(root: &Path) -> Overrides {
        Overrides {
            repo_root: root.to_str().map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults_without_config() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir(root.join(".git")).unwrap();
        let eff = resolve_effective(&overrides_for(root)).unwrap();
        assert_eq!(eff.output, "human");
        assert!(eff.build.enabled);
        assert_eq!(eff.build.configure, vec!["cmake", ".."]);
        assert_eq!(eff.history_path, root.join("docs/issue_tracking.json"));
        assert_eq!(eff.max_scans, 10);
        assert_eq!(eff.integration.features.len(), 3);
        assert!(eff.report_path.ends_with("latest_issue_report.md"));
        assert_eq!(eff.config_path, None);
    }

    #[test]
    fn test_detect_and_load_toml() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let mut f = fs::File::create(root.join("repowatch.toml")).unwrap();
        writeln!(
            f,
            "{}",
            r#"
output = "json"
[build]
timeout_secs = 300
[markers]
extensions = ["rs"]
[history]
path = "state/history.json"
max_scans = 3
[[integration.features]]
name = "Market"
header = "market/market.h"
            "#
        )
        .unwrap();

        let nested = root.join("src/deep");
        fs::create_dir_all(&nested).unwrap();
        let eff = resolve_effective(&Overrides {
            repo_root: nested.to_str().map(String::from),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(eff.repo_root, root);
        assert_eq!(eff.output, "json");
        assert_eq!(eff.build.timeout(), Some(Duration::from_secs(300)));
        assert_eq!(eff.markers.extensions, vec!["rs"]);
        // untouched keys inside a section keep their defaults
        assert_eq!(eff.markers.vocabulary.len(), 4);
        assert_eq!(eff.history_path, root.join("state/history.json"));
        assert_eq!(eff.max_scans, 3);
        assert_eq!(eff.integration.features[0].name, "Market");
        assert_eq!(eff.integration.entry_file, "src/main.cpp");
    }

    #[test]
    fn test_load_yaml() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(
            root.join("repowatch.yaml"),
            "build:\n  enabled: false\nreport:\n  path: out/report.md\n  sort_breakdowns: true\n",
        )
        .unwrap();
        let eff = resolve_effective(&overrides_for(root)).unwrap();
        assert!(!eff.build.enabled);
        assert!(eff.sort_breakdowns);
        assert_eq!(eff.config_path, Some(root.join("repowatch.yaml")));
        assert_eq!(eff.report_path, root.join("out/report.md"));
    }

    #[test]
    fn test_cli_takes_precedence() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(
            root.join("repowatch.toml"),
            "output = \"json\"\n[report]\npath = \"a.md\"\n",
        )
        .unwrap();
        let eff = resolve_effective(&Overrides {
            repo_root: root.to_str().map(String::from),
            output: Some("human".into()),
            skip_build: true,
            report: Some("b.md".into()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(eff.output, "human");
        assert!(!eff.build.enabled);
        assert_eq!(eff.report_path, root.join("b.md"));
    }

    #[test]
    fn test_broken_config_is_an_error() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("repowatch.toml"), "[build\nenabled = ").unwrap();
        let err = resolve_effective(&overrides_for(root)).unwrap_err();
        assert!(matches!(err, TrackerError::ConfigParse { .. }));
    }

    #[test]
    fn test_zero_max_scans_is_rejected() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("repowatch.toml"), "[history]\nmax_scans = 0\n").unwrap();
        let err = resolve_effective(&overrides_for(root)).unwrap_err();
        assert!(matches!(err, TrackerError::InvalidConfig { .. }));
    }

    #[test]
    fn test_build_dir_must_stay_below_root() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        for bad in ["./", ".", "..", "build/..", "/abs/path", ""] {
            fs::write(
                root.join("repowatch.toml"),
                format!("[build]\ndir = {:?}\n", bad),
            )
            .unwrap();
            let err = resolve_effective(&overrides_for(root)).unwrap_err();
            assert!(
                matches!(err, TrackerError::InvalidConfig { .. }),
                "dir {:?} was accepted",
                bad
            );
        }

        fs::write(root.join("repowatch.toml"), "[build]\ndir = \"out/build\"\n").unwrap();
        let eff = resolve_effective(&overrides_for(root)).unwrap();
        assert_eq!(eff.build.scratch_dir(root), Some(root.join("out/build")));
    }
}
