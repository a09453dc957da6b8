//! Whole-collection JSON file persistence.
//!
//! # Responsibility
//! - Load and replace one JSON array of records per file.
//! - Report missing, corrupt and unwritable stores with path and cause.
//!
//! # Invariants
//! - There is no per-record write primitive; callers read all, modify in
//!   memory, and write all back.
//! - A failed write never truncates or partially overwrites the prior file.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod json_store;

pub use json_store::JsonStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure reading or replacing a record file.
#[derive(Debug)]
pub enum StoreError {
    /// File is missing or cannot be read.
    Unavailable {
        path: PathBuf,
        source: std::io::Error,
    },
    /// File content is not a JSON array of the expected record type.
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// Serializing or replacing the file failed.
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl StoreError {
    /// Path of the record file involved in the failure.
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::Unavailable { path, .. } | Self::Corrupt { path, .. } | Self::Write { path, .. } => {
                path
            }
        }
    }

    /// Returns whether the failure is a missing record file.
    pub fn is_missing(&self) -> bool {
        matches!(
            self,
            Self::Unavailable { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Stable short code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unavailable { .. } => "store_unavailable",
            Self::Corrupt { .. } => "store_corrupt",
            Self::Write { .. } => "store_write_failed",
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable { path, source } => {
                write!(f, "record store `{}` is unavailable: {source}", path.display())
            }
            Self::Corrupt { path, source } => {
                write!(f, "record store `{}` is corrupt: {source}", path.display())
            }
            Self::Write { path, source } => {
                write!(f, "failed to write record store `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Unavailable { source, .. } | Self::Write { source, .. } => Some(source),
            Self::Corrupt { source, .. } => Some(source),
        }
    }
}
