use crate::cli::parser::Commands;
use crate::core::LogStore;
use crate::errors::AppResult;
use crate::ui::messages;

pub fn handle(cmd: &Commands, store: &LogStore, json: bool) -> AppResult<()> {
    if let Commands::Scan { uid, user } = cmd {
        let event = store.events().append(uid, user.as_deref())?;

        if json {
            messages::json(&event)?;
        } else {
            messages::success(format!(
                "Scan #{} recorded: {} ({}) at {}",
                event.id,
                event.uid,
                event.user,
                event.time_str()
            ));
        }
    }

    Ok(())
}
