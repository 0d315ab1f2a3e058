//! aadsync - reconcile an enterprise application's role assignments
//! against a desired Azure AD group set.

#![deny(clippy::all)]

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use aadsync::config::{Cli, Settings};
use aadsync::graph::session::GraphSession;
use aadsync::state;
use aadsync::sync::engine::reconcile;

#[tokio::main]
async fn main() {
    // Load .env file (if present) before anything else
    if let Err(e) = dotenvy::dotenv() {
        // .env file is optional - only log if it's not a "file not found" error
        if !e.to_string().contains("not found") {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }

    let cli = Cli::parse();

    init_logging(cli.verbose);

    info!("Starting aadsync v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(cli).await {
        error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let settings = Settings::resolve(cli)?;

    let desired = state::load_desired_groups(&settings.state_file).with_context(|| {
        format!(
            "Failed to load desired state from {}",
            settings.state_file.display()
        )
    })?;
    info!("Desired state holds {} group ids", desired.len());

    let session = GraphSession::connect(&settings)
        .await
        .context("Failed to initialize Graph session")?;

    let report = reconcile(&session, &desired)
        .await
        .context("Reconciliation aborted")?;

    info!("{}", report.summary());
    Ok(())
}

/// Initialize tracing/logging on stderr.
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
