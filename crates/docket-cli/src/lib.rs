//! # docket-cli
//!
//! Command-line access to a Docket resource.
//!
//! This crate provides the `docket` binary:
//! - Document operations (create, read, replace, patch, destroy, list)
//! - Role-based sessions from `--user` and `--role`
//! - Configuration management (`config path|get|init|show`)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_handlers;
pub mod error;
pub mod session;

use std::io::Write;

pub use cli::{Cli, Command, ConfigAction};
pub use config::DocketConfig;
pub use error::{Error, Result};
pub use session::CliSession;

/// Run a parsed command line.
///
/// `config` is the already loaded configuration, if the caller has one;
/// otherwise it is loaded here when the command needs it.
pub async fn run<W: Write>(cli: Cli, config: Option<DocketConfig>, out: &mut W) -> Result<()> {
    if let Command::Config { action } = cli.command {
        return config_handlers::handle_config_command(cli.config.as_deref(), action, out);
    }

    let mut config = match config {
        Some(config) => config,
        None => DocketConfig::load(cli.config.as_deref())?,
    };
    if let Some(data) = cli.data {
        config.resource.data_file = Some(data);
    }

    let session = CliSession::new(cli.user, cli.roles);
    log::debug!("running as {:?} with roles {:?}", session.user, session.roles);

    let resource = commands::open_resource(&config).await?;
    commands::execute(&resource, &session, cli.command, out).await
}
