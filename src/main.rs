pub mod cli;
pub mod error;
pub mod maven;
pub mod repo_fs;
pub mod sync;
pub mod util;

use std::process::ExitCode;

use chrono::Utc;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::cli::Args;
use crate::error::exit_status;
use crate::repo_fs::committing::CommittingRepoFs;
use crate::repo_fs::dry_run::DryRunRepoFs;
use crate::sync::sync_repository;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = init_tracing() {
        eprintln!("failed to initialize logging: {}", e);
        return ExitCode::FAILURE;
    }

    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::from(exit_status(&e))
        }
    }
}

async fn run(args: &Args) -> anyhow::Result<()> {
    let policy = args.policy();

    if args.commit {
        sync_repository(&args.root, &CommittingRepoFs::new(), &policy, Utc::now()).await?;
    }
    else {
        let fs = DryRunRepoFs::new(std::io::stdout());
        sync_repository(&args.root, &fs, &policy, Utc::now()).await?;
        info!("dry run: {} modifications planned, nothing was changed - use --commit to apply them", fs.planned_operations().len());
    }
    Ok(())
}

const DEFAULT_LOG_FILTER: &str = "maven_metadata_sync=info";

/// logs go to stderr, stdout is reserved for the documents of a dry run
fn init_tracing() -> anyhow::Result<()> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::registry()
        .with(log_filter(rust_log.as_deref()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()?;
    Ok(())
}

/// RUST_LOG as it is, falling back to the default if it is missing or does not parse
fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}
