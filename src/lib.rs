//! repowatch core library.
//!
//! This crate exposes programmatic APIs for scanning a repository for
//! quality signals, keeping a bounded history of scan results, and
//! rendering a Markdown report.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Discovery and effective configuration resolution.
//! - `detectors`: Independent evidence sources producing issues.
//! - `scan`: Runs detectors in order and builds a scan record.
//! - `history`: Loads and saves the capped scan history.
//! - `report`: Markdown rendering of one scan.
//! - `pipeline`: One invocation end to end.
//! - `models`: Issue, scan record and history data models.
//! - `output`: Human/JSON printers for the CLI.
//! - `runner`: External process boundary.
pub mod cli;
pub mod config;
pub mod detectors;
pub mod error;
pub mod history;
pub mod models;
pub mod output;
pub mod pipeline;
pub mod report;
pub mod runner;
pub mod scan;
pub mod utils;
