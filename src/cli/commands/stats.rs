use crate::cli::parser::Commands;
use crate::core::LogStore;
use crate::errors::AppResult;
use crate::ui::messages::{self, field};
use crate::utils::colors::{GREEN, RESET};

pub fn handle(cmd: &Commands, store: &LogStore, json: bool) -> AppResult<()> {
    match cmd {
        Commands::Stats => {
            let stats = store.queries().stats()?;
            if json {
                return messages::json(&stats);
            }
            println!();
            field("Total scans", format!("{GREEN}{}{RESET}", stats.total_count));
            field("Unique users", stats.unique_user_count);
            field("Today's scans", stats.today_count);
            println!();
        }
        Commands::Health => {
            let report = store.queries().health()?;
            if json {
                return messages::json(&report);
            }
            messages::success(format!(
                "Store {} ({} scans)",
                report.status, report.stats.total_count
            ));
        }
        _ => {}
    }

    Ok(())
}
