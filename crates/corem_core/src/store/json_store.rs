//! JSON array file store with atomic replace.

use super::{StoreError, StoreResult};
use log::{debug, error, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Record store bound to one JSON file path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        self.path.as_path()
    }

    /// Loads the whole file as an array of `T`.
    ///
    /// # Errors
    /// - `Unavailable` when the file is missing or unreadable.
    /// - `Corrupt` when the content is not a JSON array of `T`.
    pub fn read_all<T: DeserializeOwned>(&self) -> StoreResult<Vec<T>> {
        let started_at = Instant::now();
        let bytes = std::fs::read(&self.path).map_err(|source| StoreError::Unavailable {
            path: self.path.clone(),
            source,
        })?;

        let records: Vec<T> =
            serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt {
                path: self.path.clone(),
                source,
            })?;

        debug!(
            "event=store_read module=store status=ok path={} records={} duration_ms={}",
            self.path.display(),
            records.len(),
            started_at.elapsed().as_millis()
        );
        Ok(records)
    }

    /// Like [`JsonStore::read_all`], but a missing file reads as empty.
    ///
    /// Used by export paths so the first export can create the store.
    pub fn read_all_or_empty<T: DeserializeOwned>(&self) -> StoreResult<Vec<T>> {
        match self.read_all() {
            Ok(records) => Ok(records),
            Err(err) if err.is_missing() => {
                debug!(
                    "event=store_read module=store status=empty path={}",
                    self.path.display()
                );
                Ok(Vec::new())
            }
            Err(err) => Err(err),
        }
    }

    /// Replaces the whole file with `records`.
    ///
    /// Content is written to a sibling `.tmp` file, synced, then renamed over
    /// the target, so readers observe either the old or the new collection.
    pub fn write_all<T: Serialize>(&self, records: &[T]) -> StoreResult<()> {
        let started_at = Instant::now();
        let payload = serde_json::to_vec_pretty(records).map_err(|err| StoreError::Write {
            path: self.path.clone(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, err),
        })?;

        if let Err(source) = self.replace_atomically(&payload) {
            error!(
                "event=store_write module=store status=error path={} error_code=store_write_failed error={}",
                self.path.display(),
                source
            );
            return Err(StoreError::Write {
                path: self.path.clone(),
                source,
            });
        }

        debug!(
            "event=store_write module=store status=ok path={} records={} bytes={} duration_ms={}",
            self.path.display(),
            records.len(),
            payload.len(),
            started_at.elapsed().as_millis()
        );
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|value| value.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn replace_atomically(&self, payload: &[u8]) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let tmp = self.temp_path();
        let written = File::create(&tmp).and_then(|mut file| {
            file.write_all(payload)?;
            file.sync_all()
        });

        let result = written.and_then(|()| std::fs::rename(&tmp, &self.path));
        if result.is_err() && tmp.exists() {
            if let Err(cleanup) = std::fs::remove_file(&tmp) {
                warn!(
                    "event=store_tmp_cleanup module=store status=error path={} error={}",
                    tmp.display(),
                    cleanup
                );
            }
        }
        result
    }
}
