//! Record store backed by a single pretty-printed JSON array.

use crate::db::store::RecordStore;
use crate::errors::{AppError, AppResult};
use crate::models::Record;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    /// Open the store, creating an empty file (and its parent folders) when
    /// missing.
    pub fn open(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref().to_path_buf();

        if !path.exists() {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, "[]")?;
            tracing::info!(path = %path.display(), "Created empty record file");
        }

        Ok(Self {
            path,
            lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn guard(&self) -> AppResult<MutexGuard<'_, ()>> {
        self.lock
            .lock()
            .map_err(|_| AppError::Other("record store lock poisoned".into()))
    }

    /// Records that deserialize, plus the raw elements that do not. A bad
    /// element is logged and kept aside so it survives the next write.
    fn read_all(&self) -> AppResult<(Vec<Record>, Vec<Value>)> {
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok((Vec::new(), Vec::new()));
        }

        let raw: Vec<Value> = serde_json::from_str(&content)?;
        let mut records = Vec::with_capacity(raw.len());
        let mut unreadable = Vec::new();
        for value in raw {
            match Record::deserialize(&value) {
                Ok(record) => records.push(record),
                Err(error) => {
                    let id = value.get("id").and_then(Value::as_u64);
                    tracing::warn!(?id, %error, path = %self.path.display(), "Skipping unreadable record");
                    unreadable.push(value);
                }
            }
        }
        Ok((records, unreadable))
    }

    /// Write to a sibling temp file, then rename over the data file.
    fn write_all(&self, records: &[Record], unreadable: &[Value]) -> AppResult<()> {
        let mut values = Vec::with_capacity(records.len() + unreadable.len());
        for record in records {
            values.push(serde_json::to_value(record)?);
        }
        values.extend(unreadable.iter().cloned());
        let json = serde_json::to_string_pretty(&values)?;

        let mut tmp_name = self.path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp = PathBuf::from(tmp_name);

        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(json.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl RecordStore for JsonFileStore {
    fn list(&self) -> AppResult<Vec<Record>> {
        let _guard = self.guard()?;
        Ok(self.read_all()?.0)
    }

    fn transact(&self, apply: &mut dyn FnMut(&mut Vec<Record>) -> AppResult<()>) -> AppResult<()> {
        let _guard = self.guard()?;
        let (mut records, unreadable) = self.read_all()?;
        apply(&mut records)?;
        self.write_all(&records, &unreadable)?;
        tracing::debug!(path = %self.path.display(), count = records.len(), "Record file written");
        Ok(())
    }
}
