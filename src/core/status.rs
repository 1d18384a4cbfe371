//! Status derivation for records: labels, overdue loans and stale entries.
//!
//! Everything here is a pure function of `(records, now)`. Malformed or
//! missing timestamps never produce errors; the record just drops out of
//! the category that needed the value.

use crate::models::{Record, StatusLabel};
use crate::utils::date::{parse_local_datetime, truncate_to_minute};
use chrono::{Duration, NaiveDateTime};
use std::collections::{BTreeSet, HashSet};

/// Entries older than this, with no matching exit and no recent note,
/// are reported as pending.
pub const PENDING_AFTER_DAYS: u32 = 7;

#[derive(Debug, Clone, Copy)]
pub struct StatusEngine {
    pending_after: Duration,
}

impl Default for StatusEngine {
    fn default() -> Self {
        Self::with_pending_window(PENDING_AFTER_DAYS)
    }
}

impl StatusEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pending_window(days: u32) -> Self {
        Self {
            pending_after: Duration::days(i64::from(days)),
        }
    }

    /// Derive the label of a single record.
    ///
    /// Precedence: hidden > returned > overdue > in stock > active > empty.
    pub fn compute_status(&self, record: &Record, now: NaiveDateTime) -> StatusLabel {
        let now = truncate_to_minute(now);

        if record.hidden {
            return StatusLabel::Deleted;
        }
        if record.returned {
            return match record.status_text.as_deref().map(str::trim) {
                Some(text) if !text.is_empty() => StatusLabel::Custom(text.to_string()),
                _ => StatusLabel::Returned,
            };
        }
        if let Some(due) = loan_due(record)
            && due <= now
        {
            return StatusLabel::Overdue(due);
        }
        if record.in_stock() {
            return StatusLabel::InStock;
        }
        if record.is_loan() {
            return StatusLabel::Active;
        }
        StatusLabel::Empty
    }

    /// Ids of open loans whose due date is at or before `now`.
    pub fn compute_overdue_set(&self, records: &[Record], now: NaiveDateTime) -> BTreeSet<u64> {
        self.overdue_loans(records, now)
            .into_iter()
            .map(|(r, _)| r.id)
            .collect()
    }

    /// Open overdue loans with their parsed due date, oldest first.
    pub fn overdue_loans<'a>(
        &self,
        records: &'a [Record],
        now: NaiveDateTime,
    ) -> Vec<(&'a Record, NaiveDateTime)> {
        let now = truncate_to_minute(now);

        let mut out: Vec<_> = records
            .iter()
            .filter(|r| is_open(r) && !r.in_stock())
            .filter_map(|r| loan_due(r).map(|due| (r, due)))
            .filter(|(_, due)| *due <= now)
            .collect();

        out.sort_by_key(|(r, due)| (*due, r.id));
        out
    }

    /// Ids of stale entries: open, older than the pending window, with a
    /// non-`other` reason, never matched by an exit on the same workflow
    /// and not annotated within the window.
    pub fn compute_pending_entry_set(
        &self,
        records: &[Record],
        now: NaiveDateTime,
    ) -> BTreeSet<u64> {
        let now = truncate_to_minute(now);

        let exit_workflows: HashSet<&str> = records
            .iter()
            .filter(|r| r.is_exit() && !r.hidden)
            .filter_map(Record::workflow_id)
            .collect();

        records
            .iter()
            .filter(|r| r.is_entry() && is_open(r) && !r.in_stock())
            .filter(|r| !r.has_other_reason())
            .filter(|r| {
                parse_local_datetime(&r.started_at)
                    .is_some_and(|start| now - start >= self.pending_after)
            })
            .filter(|r| {
                r.workflow_id()
                    .is_none_or(|w| !exit_workflows.contains(w))
            })
            .filter(|r| {
                latest_note_at(r).is_none_or(|noted| now - noted >= self.pending_after)
            })
            .map(|r| r.id)
            .collect()
    }
}

fn is_open(record: &Record) -> bool {
    !record.hidden && !record.returned
}

fn loan_due(record: &Record) -> Option<NaiveDateTime> {
    record.due_at().and_then(parse_local_datetime)
}

/// Most recent parseable note timestamp; unparseable notes are skipped.
fn latest_note_at(record: &Record) -> Option<NaiveDateTime> {
    record
        .notes
        .iter()
        .filter_map(|n| parse_local_datetime(&n.recorded_at))
        .max()
}
