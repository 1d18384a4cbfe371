use crate::cli::commands::open_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::StatusEngine;
use crate::db::RecordStore;
use crate::errors::AppResult;
use crate::ui::messages::header;
use crate::utils::date::now_minute;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Show { id } = cmd {
        let store = open_store(cfg)?;
        let record = store.get(*id)?;
        let status = StatusEngine::with_pending_window(cfg.pending_after_days)
            .compute_status(&record, now_minute());

        header(format!("Record {}", record.id));
        let fields = [
            ("Kind", record.kind().label().to_string()),
            ("Status", status.to_string()),
            ("Date", record.started_at.clone()),
            ("Responsible", record.responsible.clone()),
            ("Asset tag", record.asset_tag.clone()),
            ("Workflow", record.workflow.clone()),
            ("Reason", record.reason_display().to_string()),
            ("Hardware", record.hardware_display().to_string()),
            ("Brand", record.brand.clone()),
            ("Model", record.model.clone()),
            ("Borrower", record.borrower().to_string()),
            ("Due", record.due_at().unwrap_or("").to_string()),
            ("Source", record.source().to_string()),
            ("Client IP", record.client_ip().to_string()),
            ("Registered", record.registered_at().to_string()),
        ];
        for (label, value) in fields.iter().filter(|(_, v)| !v.is_empty()) {
            println!("{label:<12} {value}");
        }

        if !record.notes.is_empty() {
            println!("Notes:");
            for note in &record.notes {
                println!("  {} · {}", note.recorded_at, note.text);
            }
        }
    }
    Ok(())
}
