use crate::cli::parser::Commands;
use crate::core::LogStore;
use crate::errors::AppResult;
use crate::ui::messages::{self, info, success};

pub fn handle(cmd: &Commands, store: &LogStore, json: bool) -> AppResult<()> {
    if let Commands::Restore { path } = cmd {
        let report = store.backups().restore_backup(path)?;

        if json {
            messages::json(&report)?;
        } else {
            success(format!(
                "Store restored from {}",
                report.restored_from.display()
            ));
            info(format!(
                "Previous state backed up to {}",
                report.safety_backup.path.display()
            ));
        }
    }

    Ok(())
}
