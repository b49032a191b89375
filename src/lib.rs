//! rGuestDesk library root.
//! Exposes the CLI parser, the high-level run() function and the internal
//! modules (ledger, session lifecycle, sheet sync, exports).

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod store;
pub mod sync;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    use crate::cli::commands as c;

    match &cli.command {
        Commands::Init => c::init::handle(cli),
        Commands::Config { .. } => c::config::handle(&cli.command, cfg),
        Commands::Log { .. } => c::log::handle(&cli.command, cfg),
        Commands::Start { .. } | Commands::Join { .. } | Commands::Events | Commands::End { .. } => {
            c::event::handle(&cli.command, cfg)
        }
        Commands::Add { .. } | Commands::Undo => c::add::handle(&cli.command, cfg),
        Commands::Del { .. } => c::del::handle(&cli.command, cfg),
        Commands::List | Commands::Status => c::list::handle(&cli.command, cfg),
        Commands::Stats { .. } => c::stats::handle(&cli.command, cfg),
        Commands::Sync => c::sync::handle(&cli.command, cfg),
        Commands::Report { .. } | Commands::Export { .. } | Commands::Share => {
            c::export::handle(&cli.command, cfg)
        }
        Commands::Desk => c::desk::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // `init` writes the config, every other command reads it
    let mut cfg = if matches!(cli.command, Commands::Init) {
        Config::default()
    } else {
        Config::load()?
    };

    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    dispatch(&cli, &cfg)
}
