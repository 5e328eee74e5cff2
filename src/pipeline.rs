//! One invocation end to end: scan, persist, render.

use crate::config::Effective;
use crate::detectors::{default_detectors, ScanContext};
use crate::error::{Result, TrackerError};
use crate::history::HistoryStore;
use crate::models::ScanRecord;
use crate::report::{self, ReportOptions};
use crate::runner::CommandRunner;
use crate::scan::run_full_scan;

pub struct ScanOutcome {
    pub record: ScanRecord,
    pub scans_retained: usize,
}

pub fn history_store(eff: &Effective) -> HistoryStore {
    HistoryStore::new(eff.history_path.clone(), eff.max_scans)
}

pub fn report_options(eff: &Effective) -> ReportOptions {
    ReportOptions {
        sort_breakdowns: eff.sort_breakdowns,
    }
}

/// Run all configured detectors, append the result to the history and
/// write the Markdown report.
///
/// The history is loaded before any detector runs so that a corrupt file
/// stops the run before the (slow) build is started.
pub fn run_scan(eff: &Effective, runner: &dyn CommandRunner) -> Result<ScanOutcome> {
    let store = history_store(eff);
    let mut history = store.load()?;

    let ctx = ScanContext {
        root: &eff.repo_root,
        runner,
    };
    let record = run_full_scan(&ctx, &default_detectors(eff));

    history.append_and_trim(record.clone(), store.max_scans());
    store.save(&history)?;

    let body = report::render(&record, report_options(eff));
    report::write_report(&eff.report_path, &body)?;

    Ok(ScanOutcome {
        record,
        scans_retained: history.scans.len(),
    })
}

/// Re-render the most recent persisted scan without scanning.
pub fn render_latest(eff: &Effective) -> Result<String> {
    let store = history_store(eff);
    let history = store.load()?;
    let latest = history.latest().ok_or_else(|| TrackerError::NoScans {
        path: store.path().to_path_buf(),
    })?;
    Ok(report::render(latest, report_options(eff)))
}
