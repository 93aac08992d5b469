//! rfidlog library root.
//! Durable RFID scan log: event store, queries, retention, backup/restore
//! and compaction over a single SQLite file, plus the CLI front-end.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

pub use crate::core::LogStore;
pub use errors::{AppError, ErrorKind};

/// Central command dispatcher
pub fn dispatch(cli: &Cli, store: &LogStore) -> AppResult<()> {
    let json = cli.json;
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli, store),
        Commands::Scan { .. } => cli::commands::scan::handle(&cli.command, store, json),
        Commands::Recent { .. } | Commands::Search { .. } | Commands::Date { .. } => {
            cli::commands::list::handle(&cli.command, store, json)
        }
        Commands::Stats | Commands::Health => cli::commands::stats::handle(&cli.command, store, json),
        Commands::Cleanup { .. } => cli::commands::cleanup::handle(&cli.command, store, json),
        Commands::Backup { .. } => cli::commands::backup::handle(&cli.command, store, json),
        Commands::Restore { .. } => cli::commands::restore::handle(&cli.command, store, json),
        Commands::Db { .. } => cli::commands::db::handle(&cli.command, store, json),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, store),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    let mut cfg = Config::load()?;
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    // Only `init` may create the store file; every other command expects it.
    let store = LogStore::new(cfg);
    dispatch(&cli, &store)
}
