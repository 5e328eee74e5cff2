//! repowatch CLI binary entry point.
//! Resolves configuration, delegates to the pipeline and prints results.

use clap::Parser;
use repowatch::cli::{Cli, Commands, RepoArgs};
use repowatch::config::{self, Effective, Overrides};
use repowatch::error::Result;
use repowatch::runner::SystemRunner;
use repowatch::{output, pipeline, report, utils};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_env("REPOWATCH_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn resolve(
    repo: RepoArgs,
    output: Option<String>,
    skip_build: bool,
    report: Option<String>,
) -> Result<Effective> {
    let eff = config::resolve_effective(&Overrides {
        repo_root: repo.repo_root,
        config: repo.config,
        output,
        skip_build,
        report,
    })?;
    match &eff.config_path {
        Some(p) => tracing::info!(config = %p.display(), "loaded repowatch config"),
        None => tracing::info!("no repowatch config found; using defaults"),
    }
    Ok(eff)
}

fn run(cli: Cli) -> Result<()> {
    let cmd = cli.cmd.unwrap_or(Commands::Scan {
        repo: RepoArgs::default(),
        output: None,
        skip_build: false,
        report: None,
    });
    match cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Scan {
            repo,
            output,
            skip_build,
            report,
        } => {
            let eff = resolve(repo, output, skip_build, report)?;
            if eff.output != "json" {
                eprintln!(
                    "{} scanning {}",
                    utils::note_prefix(),
                    eff.repo_root.display()
                );
            }
            let outcome = pipeline::run_scan(&eff, &SystemRunner)?;
            tracing::debug!(retained = outcome.scans_retained, "scan persisted");
            output::print_scan(
                &outcome.record,
                &eff.output,
                &eff.history_path,
                &eff.report_path,
            );
        }
        Commands::Report { repo, output_file } => {
            let eff = resolve(repo, None, false, None)?;
            let body = pipeline::render_latest(&eff)?;
            match output_file {
                Some(p) => {
                    let path = eff.repo_root.join(p);
                    report::write_report(&path, &body)?;
                    println!("report written to {}", path.display());
                }
                None => print!("{}", body),
            }
        }
        Commands::History { repo, output } => {
            let eff = resolve(repo, output, false, None)?;
            let history = pipeline::history_store(&eff).load()?;
            output::print_history(&history, &eff.output);
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    if let Err(e) = run(cli) {
        eprintln!("{} {}", utils::error_prefix(), e);
        std::process::exit(2);
    }
}
