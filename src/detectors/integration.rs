//! Integration gap detector: headers the entry point includes but whose
//! feature it never mentions.

use super::{read_evidence, Detector, DetectorGroup, ScanContext};
use crate::config::{FeatureCheck, IntegrationCfg};
use crate::models::{Issue, IssueKind, Severity};

pub struct IntegrationGapDetector {
    cfg: IntegrationCfg,
}

impl IntegrationGapDetector {
    pub fn new(cfg: IntegrationCfg) -> Self {
        IntegrationGapDetector { cfg }
    }
}

/// True when `entry` includes the feature's header and names the feature
/// nowhere outside the include directive itself.
pub fn is_gap(entry: &str, feature: &FeatureCheck) -> bool {
    let include = format!("#include \"{}\"", feature.header);
    if !entry.contains(&include) {
        return false;
    }
    !entry.replace(&include, "").contains(&feature.name)
}

impl Detector for IntegrationGapDetector {
    fn name(&self) -> &'static str {
        "integration"
    }

    fn group(&self) -> DetectorGroup {
        DetectorGroup::Integration
    }

    fn detect(&self, ctx: &ScanContext<'_>) -> Vec<Issue> {
        let Some(entry) = read_evidence(ctx.root, &self.cfg.entry_file) else {
            return Vec::new();
        };
        let include_dir = ctx.root.join(&self.cfg.include_dir);
        self.cfg
            .features
            .iter()
            .filter(|f| include_dir.join(&f.header).exists())
            .filter(|f| is_gap(&entry, f))
            .map(|f| {
                Issue::new(
                    IssueKind::IntegrationGap,
                    Severity::Enhancement,
                    format!("{} is included but not used in main simulation", f.name),
                )
                .in_file(self.cfg.entry_file.clone())
            })
            .collect()
    }
}
