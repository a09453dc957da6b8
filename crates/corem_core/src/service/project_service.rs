//! Project use-case service.
//!
//! # Responsibility
//! - Create projects under an account and keep them embedded in it.
//! - Look up, export and remove projects in the flat project store.
//! - Update and delete projects embedded in an account.
//!
//! # Invariants
//! - `created_by` is set from the owning account and never changes.
//! - Project ids are unique within one account.
//! - `load_by_name` only sees projects that were explicitly exported.

use super::attachments::attach_file;
use super::{normalize_optional, require, ServiceError, ServiceResult};
use crate::model::account::Account;
use crate::model::project::Project;
use crate::repo::project_repo::ProjectRepository;
use crate::repo::UpsertOutcome;
use log::{info, warn};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Input for project creation. Blank `id` means "generate one".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewProjectRequest {
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    pub category: Option<String>,
    pub tags: Option<String>,
}

/// Partial project edit. `None` or blank keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub tags: Option<String>,
}

/// Project service facade over repository implementations.
pub struct ProjectService<R: ProjectRepository> {
    repo: R,
}

impl<R: ProjectRepository> ProjectService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a project owned by `account` and appends it to
    /// `account.projects`.
    ///
    /// # Errors
    /// - `MissingField` for a blank name or description.
    /// - `DuplicateProject` when the account already has this id.
    pub fn create(
        &self,
        account: &mut Account,
        request: NewProjectRequest,
    ) -> ServiceResult<Project> {
        let name = require(&request.name, "project name")?;
        let description = require(&request.description, "project description")?;
        let id = normalize_optional(request.id).unwrap_or_else(|| Uuid::new_v4().to_string());
        if account.project(&id).is_some() {
            return Err(ServiceError::DuplicateProject(id));
        }

        let project = Project {
            id,
            name,
            category: normalize_optional(request.category),
            tags: normalize_optional(request.tags),
            description,
            created_by: account.username.clone(),
            tasks: Vec::new(),
            contacts: Vec::new(),
        };
        account.projects.push(project.clone());

        info!(
            "event=project_create module=project status=ok project_id={} owner={}",
            project.id, project.created_by
        );
        Ok(project)
    }

    /// Finds an exported project by owner and name.
    ///
    /// A project store that was never written reads as empty.
    pub fn load_by_name(&self, account: &Account, name: &str) -> ServiceResult<Option<Project>> {
        match self
            .repo
            .find_by_owner_and_name(&account.username, name.trim())
        {
            Ok(found) => Ok(found),
            Err(err) if err.is_missing() => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Writes `project` into the flat project store, replacing an equal
    /// record or appending.
    pub fn export(&self, project: &Project) -> ServiceResult<UpsertOutcome> {
        let outcome = self.repo.upsert_project(project)?;
        info!(
            "event=project_export module=project status=ok project_id={} outcome={}",
            project.id,
            outcome.as_str()
        );
        Ok(outcome)
    }

    /// Projects embedded in `account`, in creation order.
    pub fn list<'a>(&self, account: &'a Account) -> &'a [Project] {
        account.projects.as_slice()
    }

    pub fn find<'a>(&self, account: &'a Account, id: &str) -> ServiceResult<&'a Project> {
        account
            .project(id)
            .ok_or_else(|| ServiceError::ProjectNotFound(id.to_string()))
    }

    /// Applies a partial edit to one of the account's projects.
    pub fn update<'a>(
        &self,
        account: &'a mut Account,
        id: &str,
        update: ProjectUpdate,
    ) -> ServiceResult<&'a Project> {
        let project = account
            .project_mut(id)
            .ok_or_else(|| ServiceError::ProjectNotFound(id.to_string()))?;

        if let Some(name) = normalize_optional(update.name) {
            project.name = name;
        }
        if let Some(description) = normalize_optional(update.description) {
            project.description = description;
        }
        if let Some(category) = normalize_optional(update.category) {
            project.category = Some(category);
        }
        if let Some(tags) = normalize_optional(update.tags) {
            project.tags = Some(tags);
        }

        info!(
            "event=project_update module=project status=ok project_id={}",
            project.id
        );
        Ok(project)
    }

    /// Removes a project and its tasks from the account and from the flat
    /// project store.
    ///
    /// The account keeps the project when the project store cannot be
    /// updated.
    pub fn delete(&self, account: &mut Account, id: &str) -> ServiceResult<Project> {
        let index = account
            .projects
            .iter()
            .position(|project| project.id == id)
            .ok_or_else(|| ServiceError::ProjectNotFound(id.to_string()))?;

        let was_exported = self
            .repo
            .remove_project(&account.username, id)
            .inspect_err(|err| {
                warn!(
                    "event=project_delete module=project status=error project_id={} error_code={}",
                    id,
                    err.code()
                );
            })?;
        let removed = account.projects.remove(index);
        info!(
            "event=project_delete module=project status=ok project_id={} tasks={} was_exported={}",
            removed.id,
            removed.tasks.len(),
            was_exported
        );
        Ok(removed)
    }

    /// Copies `source` next to the project's working files.
    ///
    /// Failures are logged and returned; callers are expected to report them
    /// and continue.
    pub fn add_files(
        &self,
        project: &Project,
        source: &Path,
        dest_dir: &Path,
    ) -> ServiceResult<PathBuf> {
        attach_file(source, dest_dir).inspect_err(|err| {
            warn!(
                "event=project_add_files module=project status=error project_id={} error_code={}",
                project.id,
                err.code()
            );
        })
    }
}
