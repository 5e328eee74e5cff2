//! Build warning detector.
//!
//! Recreates the scratch build directory, runs the configure and build
//! steps, and turns every compiler warning on the build's stderr into an
//! issue. Lines that do not look like `file:line:col: warning: msg [group]`
//! are ignored.

use super::{Detector, DetectorGroup, ScanContext};
use crate::config::BuildCfg;
use crate::models::{Issue, IssueKind, Severity};
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

fn warning_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(.+):(\d+):\d+: warning: (.+) \[(.+)\]").expect("valid warning pattern")
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One compiler warning extracted from diagnostic output.
pub struct BuildWarning {
    pub file: String,
    pub line: usize,
    pub message: String,
    pub category: String,
}

/// Parse GCC/Clang style warnings from a diagnostic stream.
pub fn parse_build_warnings(stderr: &str) -> Vec<BuildWarning> {
    stderr
        .lines()
        .filter_map(|line| {
            let caps = warning_re().captures(line)?;
            Some(BuildWarning {
                file: caps[1].to_string(),
                line: caps[2].parse().ok()?,
                message: caps[3].to_string(),
                category: caps[4].to_string(),
            })
        })
        .collect()
}

pub struct BuildDetector {
    cfg: BuildCfg,
}

impl BuildDetector {
    pub fn new(cfg: BuildCfg) -> Self {
        BuildDetector { cfg }
    }

    fn run_build(&self, ctx: &ScanContext<'_>) -> Result<String, String> {
        let build_dir = self
            .cfg
            .scratch_dir(ctx.root)
            .ok_or_else(|| format!("refusing to use {:?} as the build directory", self.cfg.dir))?;
        recreate_dir(&build_dir)?;

        let timeout = self.cfg.timeout();
        let steps = [("configure", &self.cfg.configure), ("build", &self.cfg.build)];
        let mut stderr = String::new();
        for (step, cmd) in steps {
            let (program, args) = cmd
                .split_first()
                .ok_or_else(|| format!("{} command is empty", step))?;
            let out = ctx
                .runner
                .run(program, args, &build_dir, timeout)
                .map_err(|e| e.to_string())?;
            if !out.success() {
                tracing::warn!(step, code = ?out.code, "build step exited unsuccessfully");
            }
            stderr = out.stderr;
        }
        // Only the build step's diagnostics are parsed.
        Ok(stderr)
    }
}

fn recreate_dir(dir: &Path) -> Result<(), String> {
    if dir.exists() {
        fs::remove_dir_all(dir)
            .map_err(|e| format!("cannot remove {}: {}", dir.display(), e))?;
    }
    fs::create_dir_all(dir).map_err(|e| format!("cannot create {}: {}", dir.display(), e))
}

impl Detector for BuildDetector {
    fn name(&self) -> &'static str {
        "build"
    }

    fn group(&self) -> DetectorGroup {
        DetectorGroup::Build
    }

    fn detect(&self, ctx: &ScanContext<'_>) -> Vec<Issue> {
        match self.run_build(ctx) {
            Ok(stderr) => parse_build_warnings(&stderr)
                .into_iter()
                .map(|w| {
                    Issue::new(IssueKind::BuildWarning, Severity::Warning, w.message)
                        .in_file(w.file)
                        .at_line(w.line)
                        .with_category(w.category)
                })
                .collect(),
            Err(reason) => {
                tracing::warn!(%reason, "build analysis failed");
                vec![Issue::new(
                    IssueKind::BuildError,
                    Severity::Error,
                    format!("Build failed: {}", reason),
                )]
            }
        }
    }
}
