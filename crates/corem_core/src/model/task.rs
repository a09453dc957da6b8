//! Task record, its closed enumerations, and status log entries.
//!
//! # Invariants
//! - `project_id` and `author` are fixed at creation.
//! - `dependent_on`, `start` and `end` are free text and never validated.

use super::ParseEnumError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Task urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub const EXPECTED: &'static str = "low|medium|high";

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl FromStr for Priority {
    type Err = ParseEnumError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(ParseEnumError {
                field: "priority",
                value: other.to_string(),
                expected: Self::EXPECTED,
            }),
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Status {
    /// Not started.
    Waiting,
    InProgress,
    Completed,
    /// Dropped before completion.
    Abort,
}

impl Status {
    pub const EXPECTED: &'static str = "waiting|inProgress|completed|abort";

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Waiting => "waiting",
            Self::InProgress => "inProgress",
            Self::Completed => "completed",
            Self::Abort => "abort",
        }
    }
}

impl FromStr for Status {
    type Err = ParseEnumError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "waiting" => Ok(Self::Waiting),
            "inProgress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "abort" => Ok(Self::Abort),
            other => Err(ParseEnumError {
                field: "status",
                value: other.to_string(),
                expected: Self::EXPECTED,
            }),
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recorded status change of a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskLog {
    pub status: Status,
    pub status_info: Option<String>,
    /// Username of whoever changed the status.
    pub author: String,
}

/// Unit of work inside a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub key: String,
    pub priority: Priority,
    pub objective: String,
    pub description: String,
    pub start: Option<String>,
    pub end: Option<String>,
    pub status: Status,
    #[serde(default)]
    pub status_info: Option<String>,
    /// Comma-separated task keys, stored verbatim.
    pub dependent_on: Option<String>,
    pub project_id: String,
    pub author: String,
    #[serde(default)]
    pub logs: Vec<TaskLog>,
}

impl Task {
    /// Splits `dependent_on` into trimmed, non-empty keys.
    ///
    /// Purely a view; keys are not checked against existing tasks.
    pub fn dependency_keys(&self) -> Vec<&str> {
        self.dependent_on
            .as_deref()
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|key| !key.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}
