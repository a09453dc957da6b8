//! Project record.
//!
//! # Invariants
//! - Equality is identity-like: `(id, name, created_by)`; task contents and
//!   descriptive fields do not take part.
//! - `created_by` is fixed at creation.

use super::contact::Contact;
use super::task::Task;
use serde::{Deserialize, Serialize};

/// A named body of work owned by one account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub category: Option<String>,
    pub tags: Option<String>,
    pub description: String,
    /// Username of the owning account.
    pub created_by: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub contacts: Vec<Contact>,
}

impl PartialEq for Project {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.name == other.name && self.created_by == other.created_by
    }
}

impl Eq for Project {}

impl Project {
    pub fn task(&self, key: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.key == key)
    }

    pub fn task_mut(&mut self, key: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| task.key == key)
    }

    pub fn contact(&self, key: &str) -> Option<&Contact> {
        self.contacts.iter().find(|contact| contact.key == key)
    }

    /// Splits `tags` on commas into trimmed, non-empty values.
    pub fn tag_list(&self) -> Vec<&str> {
        self.tags
            .as_deref()
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|tag| !tag.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}
