//! CLI for the TODO tracker.
//!
//! Scans a source tree for TODO/HACK/OPT comments and mirrors them into
//! GitHub issues: new comments are filed, edited ones updated, and issues of
//! removed comments closed.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use todo_tracker::{RunSummary, Runner, RunnerConfig, RunnerError};
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// TODO Tracker - Mirror TODO/HACK/OPT source comments into GitHub issues.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Root of the git working tree to scan.
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Tracker config file [default: <root>/todo-tracker.toml, if present].
    #[arg(long)]
    config: Option<PathBuf>,

    /// GitHub repository, as a remote URL or owner/repo.
    #[arg(long, env = "CIRCLE_REPOSITORY_URL")]
    repository_url: String,

    /// GitHub Personal Access Token.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: String,

    /// Preview changes without creating, updating or closing issues.
    #[arg(long)]
    dry_run: bool,

    /// Maximum files scanned at once.
    #[arg(long, default_value_t = 5)]
    concurrency: usize,
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let args = Args::parse();

    match run(args).await {
        Ok(summary) => {
            print_summary(&summary);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Critical failure");
            ExitCode::from(2)
        }
    }
}

/// Sets up the global tracing subscriber with:
/// - Compact log formatting (single-line output)
/// - Log level filtering via `RUST_LOG` env var (defaults to "info")
fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Main execution logic.
async fn run(args: Args) -> Result<RunSummary, RunnerError> {
    // Install aws-lc-rs as the rustls crypto provider; an already installed one is kept.
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    let mut config = RunnerConfig::new(
        args.root,
        args.repository_url,
        args.token,
        args.dry_run,
        args.concurrency,
    );
    if let Some(path) = args.config {
        config = config.with_config_path(path);
    }

    let runner = Runner::new(config)?;
    runner.run().await
}

/// Prints the final run summary.
fn print_summary(summary: &RunSummary) {
    println!("\nSummary:");
    println!(
        "  Mode: {}",
        if summary.dry_run { "Dry Run" } else { "Live" }
    );
    println!("  Files scanned: {}", summary.files_scanned);
    if summary.files_skipped > 0 {
        println!("  Files skipped: {}", summary.files_skipped);
    }
    println!("  Source issues: {}", summary.source_issues);
    println!("  Tracked issues: {}", summary.tracked_issues);
    if summary.corrupt_payloads > 0 {
        println!("  Unreadable payloads: {}", summary.corrupt_payloads);
    }

    let (created, updated, closed) = if summary.dry_run {
        ("would create", "would update", "would close")
    } else {
        ("created", "updated", "closed")
    };
    println!("  Issues {created}: {}", summary.issues_created);
    println!("  Issues {updated}: {}", summary.issues_updated);
    println!("  Issues {closed}: {}", summary.issues_closed);
    println!("  Issues unchanged: {}", summary.issues_unchanged);
    println!("  Issues skipped: {}", summary.issues_skipped);
    if summary.issues_deferred > 0 {
        println!("  Issues deferred: {}", summary.issues_deferred);
    }
}
