//! On-disk layout of the local store.
//!
//! # Responsibility
//! - Resolve the data directory under the user's home directory.
//! - Name the account store, project store and log directory.
//!
//! # Invariants
//! - Account and project records live in separate files.
//! - Paths are absolute when resolved from the home directory.

use crate::store::JsonStore;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const DATA_DIR_NAME: &str = ".corem";
const ACCOUNTS_FILE_NAME: &str = "accounts.json";
const PROJECTS_FILE_NAME: &str = "projects.json";
const LOG_DIR_NAME: &str = "logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The platform reported no home directory for the current user.
    HomeDirUnavailable,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HomeDirUnavailable => write!(f, "cannot determine the user's home directory"),
        }
    }
}

impl Error for ConfigError {}

/// File layout for one local store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreLayout {
    data_dir: PathBuf,
}

impl StoreLayout {
    /// Resolves `~/.corem`.
    pub fn from_home() -> Result<Self, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::HomeDirUnavailable)?;
        Ok(Self::at(home.join(DATA_DIR_NAME)))
    }

    /// Uses an explicit data directory. Tests point this at a temp dir.
    pub fn at(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        self.data_dir.as_path()
    }

    pub fn accounts_path(&self) -> PathBuf {
        self.data_dir.join(ACCOUNTS_FILE_NAME)
    }

    pub fn projects_path(&self) -> PathBuf {
        self.data_dir.join(PROJECTS_FILE_NAME)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join(LOG_DIR_NAME)
    }

    pub fn account_store(&self) -> JsonStore {
        JsonStore::new(self.accounts_path())
    }

    pub fn project_store(&self) -> JsonStore {
        JsonStore::new(self.projects_path())
    }
}
