//! Repository layer over the JSON record store.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for accounts and projects.
//! - Keep read-all / modify / write-all mechanics out of the services.
//!
//! # Invariants
//! - Every write replaces the whole collection through `JsonStore`.
//! - Lookups on a missing store report `StoreError::Unavailable`; exports
//!   treat a missing store as empty so the first export can create it.

pub mod account_repo;
pub mod project_repo;

use crate::store::StoreError;

pub type RepoResult<T> = Result<T, StoreError>;

/// What an export did to the stored collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// An equal record was already stored; the file was rewritten unchanged.
    Unchanged,
    /// A record with the same key was replaced in place.
    Replaced,
    /// No matching record existed; the record was appended.
    Appended,
}

impl UpsertOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unchanged => "unchanged",
            Self::Replaced => "replaced",
            Self::Appended => "appended",
        }
    }
}

/// Value-equality dedup with key-based replacement.
///
/// - An equal record leaves the collection untouched.
/// - Otherwise the first record sharing `same_key` is overwritten.
/// - Otherwise the record is appended.
pub(crate) fn upsert_by_value<T, F>(records: &mut Vec<T>, record: &T, same_key: F) -> UpsertOutcome
where
    T: PartialEq + Clone,
    F: Fn(&T) -> bool,
{
    if records.iter().any(|existing| existing == record) {
        return UpsertOutcome::Unchanged;
    }
    if let Some(slot) = records.iter_mut().find(|existing| same_key(&**existing)) {
        *slot = record.clone();
        return UpsertOutcome::Replaced;
    }
    records.push(record.clone());
    UpsertOutcome::Appended
}
