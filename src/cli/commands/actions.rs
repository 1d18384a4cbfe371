//! `return`, `hide`, `extend`, `note` and `stock`: single-record actions.

use crate::cli::commands::open_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::RecordActions;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::date::now_minute;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let store = open_store(cfg)?;

    match cmd {
        Commands::Return { id } => {
            RecordActions::mark_returned(&store, *id)?;
            success(format!("Record {id} marked as returned."));
        }
        Commands::Hide { id } => {
            RecordActions::hide(&store, *id)?;
            success(format!("Record {id} deleted."));
        }
        Commands::Extend { id, due } => {
            let record = RecordActions::extend_due(&store, *id, due)?;
            success(format!(
                "Loan {id} now due {}.",
                record.due_at().unwrap_or("")
            ));
        }
        Commands::Note { id, text } => {
            let record =
                RecordActions::append_note(&store, *id, text, cfg.max_note_len, now_minute())?;
            success(format!("Note added to record {id} ({} notes).", record.notes.len()));
        }
        Commands::Stock { id } => {
            let record = RecordActions::toggle_stock(&store, *id)?;
            if record.in_stock() {
                success(format!("Entry {id} is now in stock."));
            } else {
                success(format!("Entry {id} is no longer in stock."));
            }
        }
        _ => {}
    }
    Ok(())
}
