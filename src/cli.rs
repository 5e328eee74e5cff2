//! CLI argument parsing via `clap`.

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "repowatch",
    version,
    about = "Track build warnings, markers and integration gaps across runs",
    long_about = "repowatch scans a C/C++ source tree for build warnings, marker comments and a few \
                  targeted heuristics, keeps the last scans in a JSON history file, and writes a \
                  Markdown report.\n\nConfiguration precedence: CLI > repowatch.toml > defaults.",
    after_help = "Examples:\n  repowatch\n  repowatch scan --skip-build --output json\n  repowatch report --output-file report.md\n  repowatch history"
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    /// Log progress to stderr (repeat for debug output)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
    #[command(subcommand)]
    pub cmd: Option<Commands>,
}

#[derive(Args, Clone, Default)]
/// Options shared by every command that reads the repository.
pub struct RepoArgs {
    #[arg(long, help = "Repository root (default: current dir)")]
    pub repo_root: Option<String>,
    #[arg(long, help = "Config file (default: repowatch.toml in the repository root)")]
    pub config: Option<String>,
}

#[derive(Subcommand)]
/// Supported subcommands. Running without one performs a scan.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current repowatch version.")]
    Version,
    /// Run a full scan
    #[command(
        about = "Run a full scan",
        long_about = "Run every detector, append the result to the history file and write the \
                      Markdown report. Findings never cause a non-zero exit.",
        after_help = "Examples:\n  repowatch scan\n  repowatch scan --skip-build --report out/issues.md"
    )]
    Scan {
        #[command(flatten)]
        repo: RepoArgs,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Do not run the configure/build steps")]
        skip_build: bool,
        #[arg(long, help = "Report path, relative to the repository root")]
        report: Option<String>,
    },
    /// Render the latest recorded scan
    #[command(
        about = "Render latest report",
        long_about = "Render the most recent scan from the history file without scanning again."
    )]
    Report {
        #[command(flatten)]
        repo: RepoArgs,
        #[arg(long, help = "Write the report here instead of stdout")]
        output_file: Option<String>,
    },
    /// List recorded scans
    #[command(
        about = "List recorded scans",
        long_about = "Show the timestamp, total and severity counts of every scan in the history file."
    )]
    History {
        #[command(flatten)]
        repo: RepoArgs,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
}
