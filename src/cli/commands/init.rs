use crate::cli::parser::Cli;
use crate::core::LogStore;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

/// Handle the `init` command
///
/// This initializes:
///  - the configuration file (skipped in test mode or when it exists)
///  - the store file, its table and indexes
pub fn handle(cli: &Cli, store: &LogStore) -> AppResult<()> {
    if let Some(path) = store.config().init_file(cli.test)? {
        info(format!("Config file : {}", path.display()));
    }

    store.events().initialize()?;

    success(format!("Log store initialized at {}", store.path().display()));
    Ok(())
}
