//! Marker comment detector (TODO, FIXME, ...).

use super::{Detector, DetectorGroup, ScanContext};
use crate::config::MarkersCfg;
use crate::models::{Issue, IssueKind, Severity};
use glob::glob;
use rayon::prelude::*;
use std::fs;
use std::path::{Component, Path, PathBuf};

pub struct MarkerDetector {
    cfg: MarkersCfg,
}

impl MarkerDetector {
    pub fn new(cfg: MarkersCfg) -> Self {
        MarkerDetector { cfg }
    }

    /// Source files to scan: grouped by extension in configured order,
    /// sorted by path within each extension.
    fn targets(&self, root: &Path) -> Vec<PathBuf> {
        let mut out = Vec::new();
        for ext in &self.cfg.extensions {
            let base = glob::Pattern::escape(&root.to_string_lossy());
            let pattern = format!("{}/**/*.{}", base.trim_end_matches('/'), ext);
            let entries = match glob(&pattern) {
                Ok(paths) => paths,
                Err(e) => {
                    tracing::warn!(%pattern, error = %e, "invalid source pattern");
                    continue;
                }
            };
            let mut found: Vec<PathBuf> = entries
                .flatten()
                .filter(|p| p.is_file() && !self.is_excluded(root, p))
                .collect();
            found.sort();
            out.extend(found);
        }
        out
    }

    fn is_excluded(&self, root: &Path, path: &Path) -> bool {
        let rel = path.strip_prefix(root).unwrap_or(path);
        rel.components().any(|c| match c {
            Component::Normal(name) => self
                .cfg
                .exclude_dirs
                .iter()
                .any(|d| name.to_str() == Some(d.as_str())),
            _ => false,
        })
    }
}

/// Scan one file's text. `rel` is the path reported in each issue.
pub fn scan_text(text: &str, rel: &str, vocabulary: &[String]) -> Vec<Issue> {
    text.lines()
        .enumerate()
        .filter_map(|(idx, line)| {
            let marker = vocabulary.iter().find(|m| line.contains(m.as_str()))?;
            Some(
                Issue::new(
                    IssueKind::TodoMarker,
                    Severity::Info,
                    format!("{} found: {}", marker, line.trim()),
                )
                .in_file(rel)
                .at_line(idx + 1),
            )
        })
        .collect()
}

fn relative_display(root: &Path, path: &Path) -> String {
    pathdiff::diff_paths(path, root)
        .unwrap_or_else(|| path.to_path_buf())
        .to_string_lossy()
        .to_string()
}

impl Detector for MarkerDetector {
    fn name(&self) -> &'static str {
        "markers"
    }

    fn group(&self) -> DetectorGroup {
        DetectorGroup::Quality
    }

    fn detect(&self, ctx: &ScanContext<'_>) -> Vec<Issue> {
        let root = ctx.root;
        let targets = self.targets(root);
        tracing::debug!(files = targets.len(), "scanning for markers");
        let per_file: Vec<Vec<Issue>> = targets
            .par_iter()
            .map(|path| match fs::read_to_string(path) {
                Ok(text) => scan_text(&text, &relative_display(root, path), &self.cfg.vocabulary),
                Err(e) => {
                    tracing::debug!(file = %path.display(), error = %e, "skipping unreadable file");
                    Vec::new()
                }
            })
            .collect();
        per_file.into_iter().flatten().collect()
    }
}
