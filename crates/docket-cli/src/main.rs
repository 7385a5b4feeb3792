//! Docket CLI
//!
//! Command-line access to an access-controlled document store.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use clap::Parser;
use docket_cli::{Cli, DocketConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = cli
        .needs_config()
        .then(|| DocketConfig::load(cli.config.as_deref()));
    let level = match (&config, cli.verbose) {
        (_, true) => "debug".to_string(),
        (Some(Ok(config)), false) => config.logging.level.clone(),
        _ => "warn".to_string(),
    };

    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| level.into()),
        )
        .init();

    let config = config
        .transpose()
        .context("Failed to load configuration")?;

    let mut stdout = std::io::stdout().lock();
    if let Err(e) = docket_cli::run(cli, config, &mut stdout).await {
        let status = e.status_code();
        tracing::debug!(status, "command failed");
        return Err(anyhow::Error::new(e).context(format!("Request failed with status {status}")));
    }
    Ok(())
}
