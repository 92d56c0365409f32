//! clikraken
//!
//! Command line client for the Kraken exchange. The binary parses the
//! arguments, loads the settings and hands over to [`execute`].

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod output;

use std::io::Write;
use std::sync::Arc;

use clap::CommandFactory;
use kraken_sdk::Logger;

pub use cli::{Cli, Command};
pub use config::Settings;
pub use context::{Context, GlobalOptions};
pub use error::{CliError, CliResult};

/// Run the parsed command line, writing results to `out`.
///
/// Without a subcommand the help text is printed.
pub async fn execute(
    cli: &Cli,
    settings: Settings,
    logger: Arc<dyn Logger>,
    out: &mut dyn Write,
) -> CliResult<()> {
    let Some(command) = &cli.command else {
        writeln!(out, "{}", Cli::command().render_help())?;
        return Ok(());
    };

    let ctx = Context::new(settings, GlobalOptions::from_cli(cli), logger)?;
    commands::dispatch(&ctx, command, out).await
}
