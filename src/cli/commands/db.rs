use super::print_backups;
use crate::cli::parser::Commands;
use crate::core::LogStore;
use crate::errors::AppResult;
use crate::models::DatabaseInfo;
use crate::ui::messages::{self, field, success, warning};
use crate::utils::colors::{CYAN, GREEN, RED, RESET, YELLOW, color_for_delta, colorize_optional};
use crate::utils::time::format_timestamp;

pub fn handle(cmd: &Commands, store: &LogStore, json: bool) -> AppResult<()> {
    if let Commands::Db {
        info,
        optimize,
        check,
    } = cmd
    {
        //
        // 1) INFO
        //
        if *info {
            let db_info = store.backups().info()?;
            if json {
                messages::json(&db_info)?;
            } else {
                print_info(&db_info);
            }
        }

        //
        // 2) CHECK
        //
        if *check {
            let report = store.compactor().integrity_check()?;
            if json {
                messages::json(&report)?;
            } else if report.ok {
                success("Integrity check passed.");
            } else {
                warning(format!(
                    "{RED}Integrity check failed:{RESET} {}",
                    report.messages.join("; ")
                ));
            }
        }

        //
        // 3) OPTIMIZE
        //
        if *optimize {
            if !json {
                println!("{CYAN}▶ Running ANALYZE, VACUUM, REINDEX…{RESET}");
            }
            let report = store.compactor().compact()?;
            if json {
                messages::json(&report)?;
            } else {
                let color = color_for_delta(report.bytes_saved);
                success(format!(
                    "Optimization completed: {} → {} bytes ({color}{:+}{RESET} saved)",
                    report.bytes_before, report.bytes_after, report.bytes_saved
                ));
            }
        }
    }

    Ok(())
}

fn print_info(info: &DatabaseInfo) {
    println!();
    field("File", format!("{YELLOW}{}{RESET}", info.path.display()));
    field("Size", format!("{:.2} MB ({} bytes)", info.size_mb, info.size_bytes));
    field("Tables", info.tables.join(", "));
    field("Total scans", format!("{GREEN}{}{RESET}", info.row_count));

    let oldest = info.oldest_timestamp.as_ref().map(format_timestamp);
    let newest = info.newest_timestamp.as_ref().map(format_timestamp);
    field("Date range", "");
    println!("    from: {}", colorize_optional(oldest.as_deref()));
    println!("    to:   {}", colorize_optional(newest.as_deref()));

    let last = info.last_backup_time.as_ref().map(format_timestamp);
    field("Backups", info.backup_count);
    field("Last backup", colorize_optional(last.as_deref()));
    if !info.backups.is_empty() {
        println!();
        print_backups(&info.backups);
    }
    println!();
}
