use crate::cli::commands::open_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::{RegisterLogic, RegistrationForm};
use crate::errors::AppResult;
use crate::models::SubmissionMeta;
use crate::ui::messages::success;
use crate::utils::date::{format_local, now_minute};

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

/// Handle the `add` command: same validation as the web form.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add {
        kind,
        responsible,
        asset_tag,
        workflow,
        date,
        reason,
        reason_detail,
        hardware,
        hardware_detail,
        brand,
        model,
        borrower,
        due_at,
        note,
    } = cmd
    {
        let form = RegistrationForm {
            kind: kind.as_str().to_string(),
            responsible: responsible.clone(),
            asset_tag: asset_tag.clone(),
            workflow: text(workflow),
            started_at: text(date),
            reason: reason.clone(),
            reason_detail: text(reason_detail),
            hardware: hardware.clone(),
            hardware_detail: text(hardware_detail),
            brand: text(brand),
            model: text(model),
            borrower: text(borrower),
            due_at: text(due_at),
            note: text(note),
        };

        let store = open_store(cfg)?;
        let now = now_minute();
        let record = RegisterLogic::apply(
            &store,
            &form,
            SubmissionMeta::cli(format_local(&now)),
            cfg.max_note_len,
            now,
        )?;

        success(format!(
            "{} registered with ID {} ({})",
            record.kind().label(),
            record.id,
            record.started_at
        ));
    }
    Ok(())
}
