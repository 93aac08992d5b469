use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line interface definition for rfidlog
#[derive(Parser)]
#[command(
    name = "rfidlog",
    version = env!("CARGO_PKG_VERSION"),
    about = "RFID card-scan log on SQLite: record scans, query them, back up, restore and compact the store",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Print results as JSON instead of tables
    #[arg(global = true, long = "json")]
    pub json: bool,

    /// Run in test mode (no config file written)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration file and the log store
    Init,

    /// Record a card scan
    Scan {
        /// Card / tag UID
        uid: String,

        #[arg(long, short, help = "Display name of the card holder (default: Unknown)")]
        user: Option<String>,
    },

    /// Show the most recent scans
    Recent {
        #[arg(long, short, help = "Maximum number of scans to show")]
        limit: Option<i64>,
    },

    /// Search scans by UID or user name (case-insensitive substring)
    Search {
        term: String,

        #[arg(long, short, help = "Maximum number of scans to show")]
        limit: Option<i64>,
    },

    /// Show scans recorded on a given day
    Date {
        /// Day to show (YYYY-MM-DD)
        date: String,

        #[arg(long, short, help = "Maximum number of scans to show")]
        limit: Option<i64>,
    },

    /// Show total, unique-user and today's scan counts
    Stats,

    /// Check that the store answers queries
    Health,

    /// Delete scans older than N days
    Cleanup {
        #[arg(long, help = "Days of history to keep (default from config)")]
        days: Option<i64>,
    },

    /// Create, list or prune backups of the store
    Backup {
        #[arg(long, value_name = "NAME", help = "Backup file name (default: rfid_logs_backup_<timestamp>.db)")]
        name: Option<String>,

        #[arg(long, help = "List existing backups")]
        list: bool,

        #[arg(
            long,
            value_name = "DAYS",
            num_args = 0..=1,
            help = "Delete backups older than DAYS (default from config)"
        )]
        prune: Option<Option<i64>>,

        #[arg(long, help = "Create a backup only if automatic backups are enabled and one is due")]
        auto: bool,
    },

    /// Restore the store from a backup (a safety backup is taken first)
    Restore {
        /// Backup file path, or a file name inside the backup directory
        path: PathBuf,
    },

    /// Maintain the store (info, compaction, integrity checks)
    Db {
        #[arg(long = "info", help = "Show store and backup information")]
        info: bool,

        #[arg(long = "optimize", help = "Run ANALYZE, VACUUM and REINDEX")]
        optimize: bool,

        #[arg(long = "check", help = "Check store integrity")]
        check: bool,
    },

    /// Show or check the configuration file
    Config {
        #[arg(long = "print", help = "Print the effective configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,
    },
}
