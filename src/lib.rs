//! presencial library root.
//! Exposes the CLI parser, the high-level run() function and the ledger
//! modules used by the binary and the integration tests.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod store;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::{APP_IDENTITY, Config};
use errors::AppResult;
use std::path::PathBuf;
use tracing::debug;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init { .. } => {
            cli::commands::init::handle(&cli.command, &data_dir(cli), cli.ledger.as_deref())
        }
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Add { .. } => cli::commands::add::handle(&cli.command, cfg),
        Commands::Report { .. } => cli::commands::report::handle(&cli.command, cfg),
        Commands::Status => cli::commands::status::handle(cfg),
        Commands::List => cli::commands::list::handle(cfg),
        Commands::Export { .. } => cli::commands::export::handle(&cli.command, cfg),
        Commands::Import { .. } => cli::commands::import::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
    }
}

/// `--data-dir`, or the per-user directory of the default identity.
fn data_dir(cli: &Cli) -> PathBuf {
    cli.data_dir
        .as_deref()
        .map(utils::path::expand_tilde)
        .unwrap_or_else(|| Config::data_dir(APP_IDENTITY))
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();
    utils::logging::enable_logging(cli.verbose);

    let dir = data_dir(&cli);

    // init creates the configuration itself, with the requested backend
    if matches!(cli.command, Commands::Init { .. }) {
        return dispatch(&cli, &Config::defaults_in(&dir, Default::default()));
    }

    let (mut cfg, _) = Config::load_in(&dir)?;
    debug!(config = %cfg.config_file().display(), "configuration ready");

    // override only for this run, never saved
    if let Some(ledger) = &cli.ledger {
        cfg.storage_location = ledger.clone();
    }

    dispatch(&cli, &cfg)
}
