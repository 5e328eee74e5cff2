use std::path::PathBuf;

/// Pipeline faults. Detector-level problems never surface here; they turn
/// into empty results or a synthetic `build_error` issue instead.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error("cannot read history file {path}: {source}")]
    HistoryRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("history file {path} is corrupt: {reason} (fix or remove it to start a fresh history)")]
    HistoryCorrupt { path: PathBuf, reason: String },

    #[error("cannot write history file {path}: {source}")]
    HistoryWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot write report {path}: {source}")]
    ReportWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("config parse error in {path}: {reason}")]
    ConfigParse { path: PathBuf, reason: String },

    #[error("invalid config: {reason}")]
    InvalidConfig { reason: String },

    #[error("no scans recorded yet in {path}")]
    NoScans { path: PathBuf },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TrackerError>;
