use super::print_backups;
use crate::cli::parser::Commands;
use crate::core::LogStore;
use crate::errors::AppResult;
use crate::ui::messages::{self, info, success};
use serde_json::json;

pub fn handle(cmd: &Commands, store: &LogStore, json: bool) -> AppResult<()> {
    if let Commands::Backup {
        name,
        list,
        prune,
        auto,
    } = cmd
    {
        let backups = store.backups();

        //
        // 1) PRUNE
        //
        if let Some(days) = prune {
            let days_to_keep = days.unwrap_or(store.config().backup_retention_days);
            let deleted = backups.prune(days_to_keep)?;
            if json {
                messages::json(&json!({ "deleted_count": deleted, "days_to_keep": days_to_keep }))?;
            } else {
                success(format!(
                    "Deleted {deleted} backup(s) older than {days_to_keep} day(s)."
                ));
            }
        }

        //
        // 2) LIST
        //
        if *list {
            let records = backups.list_backups()?;
            if json {
                messages::json(&records)?;
            } else {
                info(format!("Backups in {}", backups.backup_dir().display()));
                print_backups(&records);
            }
        }

        //
        // 3) CREATE (explicit, automatic, or by default when nothing else asked)
        //
        let explicit = name.is_some() || (!*list && prune.is_none() && !*auto);
        let due = *auto && backups.is_backup_due()?;

        if explicit || due {
            let record = backups.create_backup(name.as_deref())?;
            if json {
                messages::json(&record)?;
            } else {
                success(format!(
                    "Backup created: {} ({} bytes)",
                    record.path.display(),
                    record.size_bytes
                ));
            }
        } else if *auto && !json {
            info("No backup due.");
        }
    }

    Ok(())
}
