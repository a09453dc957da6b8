//! Flat project store contract and JSON store implementation.
//!
//! # Invariants
//! - The flat project store is populated only by explicit project export;
//!   projects embedded in an exported account are not mirrored here.
//! - `Project` equality is `(id, name, created_by)`, so an export of an
//!   already stored project replaces it with the newer contents.

use super::{RepoResult, UpsertOutcome};
use crate::model::project::Project;
use crate::store::JsonStore;

/// Repository interface for the flat project store.
pub trait ProjectRepository {
    fn list_projects(&self) -> RepoResult<Vec<Project>>;
    fn find_by_owner_and_name(&self, owner: &str, name: &str) -> RepoResult<Option<Project>>;
    fn upsert_project(&self, project: &Project) -> RepoResult<UpsertOutcome>;
    fn remove_project(&self, owner: &str, id: &str) -> RepoResult<bool>;
}

/// Project repository backed by one JSON array file.
pub struct JsonProjectRepository {
    store: JsonStore,
}

impl JsonProjectRepository {
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }
}

impl ProjectRepository for JsonProjectRepository {
    fn list_projects(&self) -> RepoResult<Vec<Project>> {
        self.store.read_all()
    }

    fn find_by_owner_and_name(&self, owner: &str, name: &str) -> RepoResult<Option<Project>> {
        Ok(self
            .list_projects()?
            .into_iter()
            .find(|project| project.created_by == owner && project.name == name))
    }

    fn upsert_project(&self, project: &Project) -> RepoResult<UpsertOutcome> {
        let mut projects: Vec<Project> = self.store.read_all_or_empty()?;
        let outcome = match projects.iter().position(|existing| existing == project) {
            Some(index) => {
                projects[index] = project.clone();
                UpsertOutcome::Replaced
            }
            None => {
                projects.push(project.clone());
                UpsertOutcome::Appended
            }
        };
        self.store.write_all(&projects)?;
        Ok(outcome)
    }

    fn remove_project(&self, owner: &str, id: &str) -> RepoResult<bool> {
        let mut projects: Vec<Project> = self.store.read_all_or_empty()?;
        let before = projects.len();
        projects.retain(|project| !(project.created_by == owner && project.id == id));
        if projects.len() == before {
            return Ok(false);
        }
        self.store.write_all(&projects)?;
        Ok(true)
    }
}
