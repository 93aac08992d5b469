pub mod backup;
pub mod cleanup;
pub mod config;
pub mod db;
pub mod init;
pub mod list;
pub mod restore;
pub mod scan;
pub mod stats;

use crate::core::LogStore;
use crate::models::{BackupRecord, ScanEvent};
use crate::utils::colors::{GREY, RESET};
use crate::utils::table::Table;

/// Transport-side clamp to `[1, max_query_limit]`; the default applies when
/// no limit was given.
pub fn resolve_limit(store: &LogStore, limit: Option<i64>) -> i64 {
    let cfg = store.config();
    limit
        .unwrap_or(cfg.default_query_limit)
        .clamp(1, cfg.max_query_limit.max(1))
}

pub fn print_events(events: &[ScanEvent]) {
    if events.is_empty() {
        println!("{GREY}No scans found.{RESET}");
        return;
    }

    let mut table = Table::new(&["ID", "Time", "UID", "User"]);
    for ev in events {
        table.add_row(vec![
            ev.id.to_string(),
            ev.time_str(),
            ev.uid.clone(),
            ev.user.clone(),
        ]);
    }
    print!("{}", table.render());
    println!("{GREY}{} scan(s){RESET}", events.len());
}

pub fn print_backups(backups: &[BackupRecord]) {
    if backups.is_empty() {
        println!("{GREY}No backups found.{RESET}");
        return;
    }

    let mut table = Table::new(&["Name", "Size (bytes)", "Modified"]);
    for b in backups {
        table.add_row(vec![
            b.name.clone(),
            b.size_bytes.to_string(),
            crate::utils::time::format_timestamp(&b.modified_at),
        ]);
    }
    print!("{}", table.render());
}
