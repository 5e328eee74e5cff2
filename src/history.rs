//! Persistent scan history.
//!
//! The history lives in a single pretty-printed JSON document. Saves go to a
//! sibling temp file first and are renamed into place, so an interrupted
//! write never leaves a truncated history behind.

use crate::error::{Result, TrackerError};
use crate::models::History;
use std::fs;
use std::path::{Path, PathBuf};

pub struct HistoryStore {
    path: PathBuf,
    max_scans: usize,
}

impl HistoryStore {
    pub fn new(path: PathBuf, max_scans: usize) -> Self {
        HistoryStore { path, max_scans }
    }

    pub fn max_scans(&self) -> usize {
        self.max_scans
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the history. A missing file is an empty history; a file that
    /// exists but cannot be read or parsed is an error, never silently
    /// replaced.
    pub fn load(&self) -> Result<History> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no history yet");
            return Ok(History::default());
        }
        let data = fs::read_to_string(&self.path).map_err(|source| TrackerError::HistoryRead {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&data).map_err(|e| TrackerError::HistoryCorrupt {
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }

    /// Write `history`, creating parent directories as needed.
    pub fn save(&self, history: &History) -> Result<()> {
        let write_err = |source| TrackerError::HistoryWrite {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let mut body = serde_json::to_string_pretty(history)?;
        body.push('\n');

        let tmp = self.tmp_path();
        fs::write(&tmp, body).map_err(write_err)?;
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(write_err(e));
        }
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "history.json".to_string());
        self.path.with_file_name(format!(".{}.tmp", name))
    }
}
