use crate::cli::commands::open_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::StatusEngine;
use crate::errors::AppResult;
use crate::export::{ExportFilter, ExportLogic};
use crate::utils::date::now_minute;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        kind,
        status,
        range,
        responsible,
        workflow,
        include_hidden,
        force,
    } = cmd
    {
        let filter = ExportFilter {
            kind: kind.map(|k| k.as_str().to_string()),
            status: status.clone(),
            range: range.clone(),
            responsible: responsible.clone(),
            workflow: workflow.clone(),
            include_hidden: *include_hidden,
        };

        let store = open_store(cfg)?;
        let engine = StatusEngine::with_pending_window(cfg.pending_after_days);
        ExportLogic::export(&store, &engine, *format, file, &filter, *force, now_minute())?;
    }
    Ok(())
}
