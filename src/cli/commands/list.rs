use crate::cli::commands::open_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::StatusEngine;
use crate::db::RecordStore;
use crate::errors::AppResult;
use crate::models::{Record, StatusLabel};
use crate::ui::messages::{header, info};
use crate::utils::date::now_minute;
use crate::utils::table::{Column, Table};
use ansi_term::Colour;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List {
        all,
        kind,
        overdue,
        pending,
    } = cmd
    {
        let store = open_store(cfg)?;
        let records = store.list()?;
        let engine = StatusEngine::with_pending_window(cfg.pending_after_days);
        let now = now_minute();

        let overdue_ids = engine.compute_overdue_set(&records, now);
        let pending_ids = engine.compute_pending_entry_set(&records, now);

        let selected: Vec<&Record> = records
            .iter()
            .filter(|r| *all || !r.hidden)
            .filter(|r| kind.is_none_or(|k| r.kind() == k))
            .filter(|r| !*overdue || overdue_ids.contains(&r.id))
            .filter(|r| !*pending || pending_ids.contains(&r.id))
            .collect();

        if selected.is_empty() {
            info("No records to show.");
            return Ok(());
        }

        let mut table = Table::new(vec![
            Column::new("ID", 6),
            Column::new("KIND", 5),
            Column::new("DATE", 16),
            Column::new("RESPONSIBLE", 14),
            Column::new("ASSET", 10),
            Column::new("HARDWARE", 16),
            Column::new("BORROWER", 16),
            Column::new("DUE", 16),
            Column::new("STATUS", 28),
        ]);

        for r in &selected {
            let status = engine.compute_status(r, now);
            let is_pending = pending_ids.contains(&r.id);
            let mut status_text = status.to_string();
            if is_pending {
                status_text = if status_text.is_empty() {
                    "Pending".to_string()
                } else {
                    format!("{status_text} / Pending")
                };
            }

            table.add_coloured_row(
                vec![
                    r.id.to_string(),
                    r.kind().label().to_string(),
                    r.started_at.clone(),
                    r.responsible.clone(),
                    r.asset_tag.clone(),
                    r.hardware_display().to_string(),
                    r.borrower().to_string(),
                    r.due_at().unwrap_or("").to_string(),
                    status_text,
                ],
                row_colour(&status, is_pending),
            );
        }

        header(format!("Records ({})", selected.len()));
        print!("{}", table.render());
        if !pending_ids.is_empty() {
            info(format!(
                "{} entries pending for more than {} days.",
                pending_ids.len(),
                cfg.pending_after_days
            ));
        }
    }
    Ok(())
}

fn row_colour(status: &StatusLabel, pending: bool) -> Option<Colour> {
    match status {
        StatusLabel::Overdue(_) => Some(Colour::Red),
        StatusLabel::Deleted => Some(Colour::Fixed(8)),
        StatusLabel::InStock => Some(Colour::Cyan),
        _ if pending => Some(Colour::Yellow),
        _ => None,
    }
}
