//! CLI entry point for the cloud image mirror.

use std::io::{self, IsTerminal};
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use image_sync_core::config::{ReleaseFilter, load_release_contexts};
use image_sync_core::download::{HttpClient, RetryPolicy};
use image_sync_core::sync::{NullSink, ProgressSink, ReleaseSynchronizer, TracingSink};
use tracing::debug;

mod cli;
mod progress;

use cli::Args;
use progress::SpinnerSink;

#[tokio::main]
async fn main() -> ExitCode {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();
    init_tracing(&args);
    debug!(?args, "CLI arguments parsed");

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Error: {error}");
            ExitCode::FAILURE
        }
    }
}

/// Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
fn init_tracing(args: &Args) {
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .init();
}

fn progress_sink(quiet: bool) -> Box<dyn ProgressSink> {
    if quiet {
        Box::new(NullSink)
    } else if io::stderr().is_terminal() {
        Box::new(SpinnerSink::new())
    } else {
        Box::new(TracingSink)
    }
}

async fn run(args: Args) -> Result<()> {
    let filter = ReleaseFilter::new(args.distros, args.releases);
    let releases = load_release_contexts(&args.config, &args.images_dir, &filter)?;
    debug!(
        releases = releases.len(),
        config = %args.config.display(),
        "configuration loaded"
    );

    let synchronizer = ReleaseSynchronizer::new(
        Box::new(HttpClient::new()),
        RetryPolicy::with_max_attempts(args.retries),
        progress_sink(args.quiet),
    );
    let stats = synchronizer.sync_all(releases).await?;
    debug!(
        updated = stats.updated(),
        skipped = stats.skipped(),
        "synchronisation finished"
    );
    Ok(())
}
