//! Project contact record.
//!
//! # Invariants
//! - Internal contacts take part in the work and may name one task of the
//!   project; external contacts never name a task.
//! - `key` is unique within one project.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContactKind {
    /// Direct contributor to the project.
    Internal,
    /// Indirect contributor, kept for reference.
    External,
}

impl ContactKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Internal => "internal",
            Self::External => "external",
        }
    }
}

impl Display for ContactKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Person with access to a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub key: String,
    pub kind: ContactKind,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Task key for internal contacts attached to one task.
    #[serde(default)]
    pub task_id: Option<String>,
}
