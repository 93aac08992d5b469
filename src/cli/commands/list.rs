use super::{print_events, resolve_limit};
use crate::cli::parser::Commands;
use crate::core::LogStore;
use crate::errors::AppResult;
use crate::ui::messages;
use serde_json::json;

/// `recent`, `search` and `date`: the three bounded listings.
pub fn handle(cmd: &Commands, store: &LogStore, json: bool) -> AppResult<()> {
    let queries = store.queries();

    let (events, extra) = match cmd {
        Commands::Recent { limit } => (queries.recent(resolve_limit(store, *limit))?, None),
        Commands::Search { term, limit } => (
            queries.search(term, resolve_limit(store, *limit))?,
            Some(("search_term", term.as_str())),
        ),
        Commands::Date { date, limit } => (
            queries.by_date(date, resolve_limit(store, *limit))?,
            Some(("date", date.as_str())),
        ),
        _ => return Ok(()),
    };

    if json {
        let mut body = json!({ "logs": events, "count": events.len() });
        if let Some((key, value)) = extra {
            body[key] = json!(value);
        }
        messages::json(&body)?;
    } else {
        print_events(&events);
    }

    Ok(())
}
