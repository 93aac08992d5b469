use crate::cli::parser::Commands;
use crate::core::LogStore;
use crate::errors::AppResult;
use crate::ui::messages;
use serde_json::json;

pub fn handle(cmd: &Commands, store: &LogStore, json: bool) -> AppResult<()> {
    if let Commands::Cleanup { days } = cmd {
        let days_to_keep = days.unwrap_or(store.config().log_retention_days);
        let deleted = store.retention().prune_older_than(days_to_keep)?;

        if json {
            messages::json(&json!({
                "message": "Cleanup completed",
                "deleted_count": deleted,
                "days_to_keep": days_to_keep,
            }))?;
        } else {
            messages::success(format!(
                "Cleanup completed: {deleted} scan(s) older than {days_to_keep} day(s) deleted."
            ));
        }
    }

    Ok(())
}
