// src/export/logic.rs

use crate::core::StatusEngine;
use crate::db::RecordStore;
use crate::errors::{AppError, AppResult};
use crate::export::json_csv::{write_csv, write_json};
use crate::export::{ExportFilter, ExportFormat, notify_export_success};
use crate::ui::messages::{info, warning};
use crate::ui::prompt::confirm_overwrite;
use crate::utils::path::expand_tilde;
use chrono::NaiveDateTime;
use std::fs::File;
use std::io::BufWriter;

/// High-level export logic.
pub struct ExportLogic;

impl ExportLogic {
    /// Export the records matching `filter` to `file`.
    ///
    /// - `format`: csv | json
    /// - `file`: absolute output path (`~/` is expanded)
    /// - `force`: overwrite without asking
    ///
    /// Returns the number of exported rows; nothing is written when no
    /// record matches.
    pub fn export(
        store: &dyn RecordStore,
        engine: &StatusEngine,
        format: ExportFormat,
        file: &str,
        filter: &ExportFilter,
        force: bool,
        now: NaiveDateTime,
    ) -> AppResult<usize> {
        let path = expand_tilde(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "Output file path must be absolute: {file}"
            )));
        }

        let records = store.list()?;
        let rows = filter.apply(engine, &records, now)?;

        if rows.is_empty() {
            warning("No records match the selected filters.");
            return Ok(0);
        }

        if path.exists() && !force && !confirm_overwrite(&path)? {
            return Err(AppError::Export(
                "Export cancelled: existing file not overwritten".into(),
            ));
        }

        info(format!(
            "Exporting to {}: {}",
            format.as_str().to_uppercase(),
            path.display()
        ));
        let out = BufWriter::new(File::create(&path)?);
        match format {
            ExportFormat::Csv => write_csv(&rows, out)?,
            ExportFormat::Json => write_json(&rows, out)?,
        }

        tracing::info!(format = format.as_str(), rows = rows.len(), path = %path.display(), "Export written");
        notify_export_success(&format.as_str().to_uppercase(), rows.len(), &path);
        Ok(rows.len())
    }
}
