// src/export/model.rs

use crate::models::{Record, StatusLabel};
use serde::Serialize;

/// Column order of [`RecordExport`], for header-only CSV output.
pub const COLUMNS: [&str; 20] = [
    "id", "kind", "status", "responsible", "borrower", "asset_tag", "workflow", "reason",
    "hardware", "brand", "model", "started_at", "due_at", "returned", "in_stock", "hidden",
    "notes", "source", "client_ip", "registered_at",
];

/// Flat row written to CSV / JSON exports.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct RecordExport {
    pub id: u64,
    pub kind: String,
    pub status: String,
    pub responsible: String,
    pub borrower: String,
    pub asset_tag: String,
    pub workflow: String,
    pub reason: String,
    pub hardware: String,
    pub brand: String,
    pub model: String,
    pub started_at: String,
    pub due_at: String,
    pub returned: bool,
    pub in_stock: bool,
    pub hidden: bool,
    /// Note texts joined with ` | `, oldest first.
    pub notes: String,
    pub source: String,
    pub client_ip: String,
    pub registered_at: String,
}

impl RecordExport {
    pub fn from_record(record: &Record, status: &StatusLabel) -> Self {
        Self {
            id: record.id,
            kind: record.kind().as_str().to_string(),
            status: status.to_string(),
            responsible: record.responsible.clone(),
            borrower: record.borrower().to_string(),
            asset_tag: record.asset_tag.clone(),
            workflow: record.workflow.clone(),
            reason: record.reason_display().to_string(),
            hardware: record.hardware_display().to_string(),
            brand: record.brand.clone(),
            model: record.model.clone(),
            started_at: record.started_at.clone(),
            due_at: record.due_at().unwrap_or("").to_string(),
            returned: record.returned,
            in_stock: record.in_stock(),
            hidden: record.hidden,
            notes: record
                .notes
                .iter()
                .map(|n| n.text.as_str())
                .collect::<Vec<_>>()
                .join(" | "),
            source: record.source().to_string(),
            client_ip: record.client_ip().to_string(),
            registered_at: record.registered_at().to_string(),
        }
    }
}
