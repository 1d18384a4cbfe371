//! Narrow storage interface the rest of the crate talks to.

use crate::errors::{AppError, AppResult};
use crate::models::Record;

/// A persistent list of records.
///
/// Implementations must make `transact` atomic with respect to other calls
/// on the same store: the closure sees a consistent snapshot and its
/// changes are either fully persisted or dropped.
pub trait RecordStore: Send + Sync {
    /// Snapshot of every record, hidden ones included, in storage order.
    fn list(&self) -> AppResult<Vec<Record>>;

    /// Run a read-modify-write over the whole collection. Changes are
    /// persisted only when `apply` returns `Ok`.
    fn transact(&self, apply: &mut dyn FnMut(&mut Vec<Record>) -> AppResult<()>) -> AppResult<()>;

    fn get(&self, id: u64) -> AppResult<Record> {
        self.list()?
            .into_iter()
            .find(|r| r.id == id)
            .ok_or(AppError::NotFound(id))
    }

    /// Replace the record with the same id, or append it.
    fn upsert(&self, record: Record) -> AppResult<()> {
        let mut pending = Some(record);
        self.transact(&mut |records| {
            let Some(record) = pending.take() else {
                return Ok(());
            };
            match records.iter_mut().find(|r| r.id == record.id) {
                Some(slot) => *slot = record,
                None => records.push(record),
            }
            Ok(())
        })
    }

    /// Mutate one record in place and return its new state.
    fn update(
        &self,
        id: u64,
        apply: &mut dyn FnMut(&mut Record) -> AppResult<()>,
    ) -> AppResult<Record> {
        let mut updated = None;
        self.transact(&mut |records| {
            let record = records
                .iter_mut()
                .find(|r| r.id == id)
                .ok_or(AppError::NotFound(id))?;
            apply(record)?;
            updated = Some(record.clone());
            Ok(())
        })?;
        updated.ok_or(AppError::NotFound(id))
    }
}

/// Next id: `max(existing) + 1`, starting at 1. Hidden records count, so
/// ids are never reused.
pub fn next_id(records: &[Record]) -> u64 {
    records.iter().map(|r| r.id).max().unwrap_or(0) + 1
}
