use crate::db::{RecordStore, next_id};
use crate::errors::{AppError, AppResult};
use crate::models::record::OTHER_CATEGORY;
use crate::models::{Movement, Note, Record, RecordKind, SubmissionMeta};
use crate::utils::date::{format_local, normalize};
use chrono::NaiveDateTime;
use serde::Deserialize;

/// Reason categories offered by the form.
pub const REASONS: [&str; 4] = ["formatting", "maintenance", "repair", OTHER_CATEGORY];

/// Hardware categories offered by the form.
pub const HARDWARE: [&str; 5] = ["desktop", "notebook", "keyboard/mouse", "monitor", OTHER_CATEGORY];

/// Minimum number of digits in a patrimony tag.
pub const ASSET_TAG_MIN_DIGITS: usize = 7;

/// Raw registration input, as posted by the HTML form or assembled by the
/// CLI. Every field is text; validation happens in [`RegisterLogic::apply`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegistrationForm {
    pub kind: String,
    pub responsible: String,
    pub asset_tag: String,
    pub workflow: String,
    pub started_at: String,
    pub reason: String,
    pub reason_detail: String,
    pub hardware: String,
    pub hardware_detail: String,
    pub brand: String,
    pub model: String,
    pub borrower: String,
    pub due_at: String,
    pub note: String,
}

/// Business logic for registering a movement.
pub struct RegisterLogic;

impl RegisterLogic {
    /// Validate the form, assign `max(id) + 1` and persist the record.
    ///
    /// An `exit` carrying a workflow id closes every open entry with the
    /// same workflow id, leaving a `Returned (ID: <exit>)` link on them.
    pub fn apply(
        store: &dyn RecordStore,
        form: &RegistrationForm,
        submitted: SubmissionMeta,
        max_note_len: usize,
        now: NaiveDateTime,
    ) -> AppResult<Record> {
        let draft = Self::build(form, submitted, max_note_len, now)?;

        let mut created = None;
        store.transact(&mut |records| {
            let mut record = draft.clone();
            record.id = next_id(records);

            if record.is_exit()
                && let Some(workflow) = record.workflow_id()
            {
                for entry in records.iter_mut().filter(|r| {
                    r.is_entry() && !r.hidden && !r.returned && r.workflow_id() == Some(workflow)
                }) {
                    entry.returned = true;
                    entry.status_text = Some(format!("Returned (ID: {})", record.id));
                    tracing::info!(entry = entry.id, exit = record.id, workflow, "Entry closed by exit");
                }
            }

            records.push(record.clone());
            created = Some(record);
            Ok(())
        })?;

        let record = created.ok_or_else(|| AppError::Other("record was not created".into()))?;
        tracing::info!(id = record.id, kind = record.kind().as_str(), "Record registered");
        Ok(record)
    }

    /// Turn the form into a record with id 0, or explain what is wrong.
    pub fn build(
        form: &RegistrationForm,
        submitted: SubmissionMeta,
        max_note_len: usize,
        now: NaiveDateTime,
    ) -> AppResult<Record> {
        let kind = RecordKind::from_input(&form.kind).ok_or_else(|| {
            if form.kind.trim().is_empty() {
                AppError::Validation("Field 'kind' is required.".into())
            } else {
                AppError::InvalidKind(form.kind.trim().to_string())
            }
        })?;

        let responsible = required(&form.responsible, "responsible")?;

        let asset_tag = form.asset_tag.trim().to_string();
        if asset_tag.len() < ASSET_TAG_MIN_DIGITS || !asset_tag.chars().all(|c| c.is_ascii_digit())
        {
            return Err(AppError::Validation(format!(
                "Asset tag must contain only digits, at least {ASSET_TAG_MIN_DIGITS}."
            )));
        }

        let reason = required(&form.reason, "reason")?.to_lowercase();
        let reason_detail = form.reason_detail.trim().to_string();
        if reason == OTHER_CATEGORY && reason_detail.is_empty() {
            return Err(AppError::Validation(
                "Describe the reason (required when 'other' is selected).".into(),
            ));
        }

        let hardware = required(&form.hardware, "hardware")?;
        let hardware_detail = form.hardware_detail.trim().to_string();
        if hardware.eq_ignore_ascii_case(OTHER_CATEGORY) && hardware_detail.is_empty() {
            return Err(AppError::Validation(
                "Describe the hardware (required when 'other' is selected).".into(),
            ));
        }

        let started_at = if form.started_at.trim().is_empty() {
            format_local(&now)
        } else {
            normalize(&form.started_at)
                .ok_or_else(|| AppError::InvalidDate(form.started_at.trim().to_string()))?
        };

        let note = form.note.trim();
        if note.chars().count() > max_note_len {
            return Err(AppError::Validation(format!(
                "Note must be at most {max_note_len} characters."
            )));
        }

        let movement = match kind {
            RecordKind::Entry => Movement::Entry { in_stock: false },
            RecordKind::Exit => Movement::Exit,
            RecordKind::Loan => {
                let borrower = required(&form.borrower, "borrower")?;
                let due_at = normalize(&form.due_at).ok_or_else(|| {
                    if form.due_at.trim().is_empty() {
                        AppError::Validation("Field 'due_at' is required for loans.".into())
                    } else {
                        AppError::InvalidDate(form.due_at.trim().to_string())
                    }
                })?;
                Movement::Loan { borrower, due_at }
            }
        };

        let mut record = Record::new(0, movement);
        record.responsible = responsible;
        record.asset_tag = asset_tag;
        record.workflow = form.workflow.trim().to_string();
        record.reason = reason;
        record.reason_detail = reason_detail;
        record.hardware = hardware;
        record.hardware_detail = hardware_detail;
        record.brand = form.brand.trim().to_string();
        record.model = form.model.trim().to_string();
        record.started_at = started_at;
        if !note.is_empty() {
            record.notes.push(Note::new(note, format_local(&now)));
        }
        record.submitted = Some(submitted);

        Ok(record)
    }
}

fn required(value: &str, field: &str) -> AppResult<String> {
    let v = value.trim();
    if v.is_empty() {
        Err(AppError::Validation(format!("Field '{field}' is required.")))
    } else {
        Ok(v.to_string())
    }
}
