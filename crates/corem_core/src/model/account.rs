//! Account record.
//!
//! # Invariants
//! - `password` holds the salted digest, never plaintext. The plaintext key
//!   of a live session is kept by `Session`, outside this record.
//! - `salt` is generated once at creation and only replaced together with a
//!   freshly derived `password`.
//! - `username` is the unique lookup key in the account store.

use super::project::Project;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub username: String,
    /// Salted digest as produced by `credential::digest`.
    pub password: String,
    pub email: String,
    pub salt: String,
    #[serde(default)]
    pub projects: Vec<Project>,
}

impl Account {
    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|project| project.id == id)
    }

    pub fn project_mut(&mut self, id: &str) -> Option<&mut Project> {
        self.projects.iter_mut().find(|project| project.id == id)
    }
}
