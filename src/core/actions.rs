//! In-place lifecycle actions on existing records.
//!
//! `returned` and `hidden` only ever move from false to true; every action
//! checks the current state inside the store transaction.

use crate::db::RecordStore;
use crate::errors::{AppError, AppResult};
use crate::models::{Movement, Note, Record};
use crate::utils::date::{format_local, normalize};
use chrono::NaiveDateTime;

pub struct RecordActions;

impl RecordActions {
    /// Close a loan or an entry.
    pub fn mark_returned(store: &dyn RecordStore, id: u64) -> AppResult<Record> {
        let record = store.update(id, &mut |r| {
            ensure_visible(r)?;
            if r.returned {
                return Err(AppError::transition(r.id, "already returned"));
            }
            if r.is_exit() {
                return Err(AppError::transition(r.id, "exits cannot be returned"));
            }
            r.returned = true;
            Ok(())
        })?;
        tracing::info!(id, "Record marked as returned");
        Ok(record)
    }

    /// Soft delete. Hiding twice is harmless.
    pub fn hide(store: &dyn RecordStore, id: u64) -> AppResult<Record> {
        let record = store.update(id, &mut |r| {
            r.hidden = true;
            Ok(())
        })?;
        tracing::info!(id, "Record hidden");
        Ok(record)
    }

    /// Move the due date of an open loan.
    pub fn extend_due(store: &dyn RecordStore, id: u64, new_due: &str) -> AppResult<Record> {
        let due = normalize(new_due).ok_or_else(|| AppError::InvalidDate(new_due.trim().to_string()))?;

        let record = store.update(id, &mut |r| {
            ensure_visible(r)?;
            if r.returned {
                return Err(AppError::transition(r.id, "loan already returned"));
            }
            match &mut r.movement {
                Movement::Loan { due_at, .. } => {
                    *due_at = due.clone();
                    Ok(())
                }
                _ => Err(AppError::transition(r.id, "only loans have a due date")),
            }
        })?;
        tracing::info!(id, due = %due, "Loan due date extended");
        Ok(record)
    }

    /// Flip the in-stock flag of an open entry; returns the new record.
    pub fn toggle_stock(store: &dyn RecordStore, id: u64) -> AppResult<Record> {
        let record = store.update(id, &mut |r| {
            ensure_visible(r)?;
            if r.returned {
                return Err(AppError::transition(r.id, "entry already returned"));
            }
            match &mut r.movement {
                Movement::Entry { in_stock } => {
                    *in_stock = !*in_stock;
                    Ok(())
                }
                _ => Err(AppError::transition(r.id, "only entries can be stocked")),
            }
        })?;
        tracing::info!(id, in_stock = record.in_stock(), "Stock flag toggled");
        Ok(record)
    }

    /// Append a note stamped with `now`.
    pub fn append_note(
        store: &dyn RecordStore,
        id: u64,
        text: &str,
        max_len: usize,
        now: NaiveDateTime,
    ) -> AppResult<Record> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AppError::Validation("Note is empty.".into()));
        }
        if text.chars().count() > max_len {
            return Err(AppError::Validation(format!(
                "Note must be at most {max_len} characters."
            )));
        }

        let note = Note::new(text, format_local(&now));
        let record = store.update(id, &mut |r| {
            r.notes.push(note.clone());
            Ok(())
        })?;
        tracing::info!(id, notes = record.notes.len(), "Note appended");
        Ok(record)
    }
}

fn ensure_visible(record: &Record) -> AppResult<()> {
    if record.hidden {
        Err(AppError::transition(record.id, "record was deleted"))
    } else {
        Ok(())
    }
}
