use crate::cli::parser::Commands;
use crate::config::{Config, missing_fields};
use crate::core::LogStore;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, store: &LogStore) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
    } = cmd
    {
        let path = Config::config_file();

        if *print_config {
            info(format!("Effective configuration ({}):\n", path.display()));
            println!("{}", store.config().to_yaml()?);
        }

        if *check {
            if !path.exists() {
                warning(format!(
                    "No configuration file at {}; defaults are in use.",
                    path.display()
                ));
                return Ok(());
            }

            let missing = missing_fields(&path)?;
            if missing.is_empty() {
                success("Configuration file is complete.");
            } else {
                warning(format!(
                    "Missing fields (defaults applied): {}",
                    missing.join(", ")
                ));
            }
        }
    }

    Ok(())
}
