// src/export/filter.rs

use crate::core::StatusEngine;
use crate::errors::{AppError, AppResult};
use crate::export::model::RecordExport;
use crate::export::range::parse_range;
use crate::models::{Record, RecordKind};
use crate::utils::date::parse_local_datetime;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;

const STATUS_TAGS: [&str; 6] = ["deleted", "returned", "overdue", "in_stock", "active", "none"];

/// Optional predicates applied, in order, to the records being exported.
///
/// Deserializable from a query string (`?kind=loan&status=overdue&range=2025-06`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ExportFilter {
    pub kind: Option<String>,
    /// Status tag: deleted, returned, overdue, in_stock, active, none.
    pub status: Option<String>,
    /// Range on the start date (see [`parse_range`]); `all` disables it.
    pub range: Option<String>,
    pub responsible: Option<String>,
    pub workflow: Option<String>,
    pub include_hidden: bool,
}

/// Parsed form of [`ExportFilter`], validated once before scanning.
struct Predicates<'a> {
    kind: Option<RecordKind>,
    status: Option<&'a str>,
    bounds: Option<(NaiveDate, NaiveDate)>,
    responsible: Option<&'a str>,
    workflow: Option<String>,
    include_hidden: bool,
}

impl ExportFilter {
    fn predicates(&self) -> AppResult<Predicates<'_>> {
        let kind = match non_blank(&self.kind) {
            Some(k) => Some(RecordKind::from_input(k).ok_or_else(|| AppError::InvalidKind(k.to_string()))?),
            None => None,
        };

        let status = match non_blank(&self.status) {
            Some(s) if STATUS_TAGS.contains(&s) => Some(s),
            Some(s) => {
                return Err(AppError::Validation(format!(
                    "Unknown status '{s}'. Use one of: {}",
                    STATUS_TAGS.join(", ")
                )));
            }
            None => None,
        };

        let bounds = match non_blank(&self.range) {
            None => None,
            Some(r) if r.eq_ignore_ascii_case("all") => None,
            Some(r) => Some(parse_range(r)?),
        };

        Ok(Predicates {
            kind,
            status,
            bounds,
            responsible: non_blank(&self.responsible),
            workflow: non_blank(&self.workflow).map(str::to_lowercase),
            include_hidden: self.include_hidden,
        })
    }

    /// Filter `records` and flatten the survivors into export rows, keeping
    /// storage order.
    pub fn apply(
        &self,
        engine: &StatusEngine,
        records: &[Record],
        now: NaiveDateTime,
    ) -> AppResult<Vec<RecordExport>> {
        let p = self.predicates()?;

        let rows = records
            .iter()
            .filter(|r| p.include_hidden || !r.hidden)
            .filter(|r| p.kind.is_none_or(|k| r.kind() == k))
            .filter(|r| {
                p.bounds.is_none_or(|(start, end)| {
                    parse_local_datetime(&r.started_at)
                        .is_some_and(|dt| (start..=end).contains(&dt.date()))
                })
            })
            .filter(|r| {
                p.responsible
                    .is_none_or(|who| r.responsible.trim().eq_ignore_ascii_case(who))
            })
            .filter(|r| {
                p.workflow
                    .as_deref()
                    .is_none_or(|w| r.workflow.to_lowercase().contains(w))
            })
            .map(|r| (r, engine.compute_status(r, now)))
            .filter(|(_, status)| p.status.is_none_or(|tag| status.tag() == tag))
            .map(|(r, status)| RecordExport::from_record(r, &status))
            .collect();

        Ok(rows)
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

