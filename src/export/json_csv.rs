// src/export/json_csv.rs

use crate::errors::{AppError, AppResult};
use crate::export::RecordExport;
use crate::export::model::COLUMNS;
use std::io::Write;

/// Serialize rows as pretty-printed JSON.
pub fn write_json<W: Write>(rows: &[RecordExport], mut out: W) -> AppResult<()> {
    serde_json::to_writer_pretty(&mut out, rows)?;
    out.flush()?;
    Ok(())
}

/// Serialize rows as CSV, header included (derived from the serde field
/// names). An empty slice still produces the header line.
pub fn write_csv<W: Write>(rows: &[RecordExport], out: W) -> AppResult<()> {
    let mut wtr = csv::Writer::from_writer(out);

    if rows.is_empty() {
        wtr.write_record(COLUMNS)?;
    }

    for row in rows {
        wtr.serialize(row)?;
    }

    wtr.flush()
        .map_err(|e| AppError::Export(format!("CSV flush error: {e}")))?;
    Ok(())
}

/// CSV into an in-memory buffer (HTTP downloads).
pub fn csv_bytes(rows: &[RecordExport]) -> AppResult<Vec<u8>> {
    let mut buf = Vec::new();
    write_csv(rows, &mut buf)?;
    Ok(buf)
}
