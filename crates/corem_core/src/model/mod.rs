//! Three-tier record model: account, project, task.
//!
//! # Responsibility
//! - Define the persisted record shapes and their JSON wire names.
//! - Define the closed task enumerations and their text parsing.
//!
//! # Invariants
//! - An account exclusively owns its projects; a project exclusively owns
//!   its tasks. Cross references are plain string keys.
//! - No record carries a plaintext password.

pub mod account;
pub mod contact;
pub mod project;
pub mod task;

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Text did not name a member of a closed enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnumError {
    /// Name of the field being parsed, e.g. `priority`.
    pub field: &'static str,
    /// Raw text that failed to parse.
    pub value: String,
    /// Accepted spellings, for user-facing messages.
    pub expected: &'static str,
}

impl Display for ParseEnumError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid {} `{}`; expected {}",
            self.field, self.value, self.expected
        )
    }
}

impl Error for ParseEnumError {}
