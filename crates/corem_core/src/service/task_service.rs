//! Task use-case service.
//!
//! # Responsibility
//! - Create tasks inside a project, parsing priority and status text.
//! - Record status changes as task log entries.
//! - Edit and delete tasks of a project.
//!
//! # Invariants
//! - Enum text is parsed before the project is touched, so a rejected
//!   request leaves `project.tasks` unchanged.
//! - `project_id` and `author` are set here and never edited afterwards.
//! - `dependent_on` is stored verbatim; no existence or cycle check.
//!
//! Tasks have no store of their own. They are persisted with the account or
//! project that embeds them.

use super::{normalize_optional, require, ServiceError, ServiceResult};
use crate::model::account::Account;
use crate::model::project::Project;
use crate::model::task::{Priority, Status, Task, TaskLog};
use log::info;
use uuid::Uuid;

/// Input for task creation. Blank `key` means "generate one".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTaskRequest {
    pub key: Option<String>,
    pub priority: String,
    pub objective: String,
    pub description: String,
    pub start: Option<String>,
    pub end: Option<String>,
    pub status: String,
    pub status_info: Option<String>,
    pub dependent_on: Option<String>,
}

/// Input for a status change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusUpdate {
    pub status: String,
    pub status_info: Option<String>,
}

/// Partial task edit. `None` or blank keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskUpdate {
    pub priority: Option<String>,
    pub end: Option<String>,
    pub dependent_on: Option<String>,
}

/// Stateless task operations over an in-memory project.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskService;

impl TaskService {
    pub fn new() -> Self {
        Self
    }

    /// Creates a task authored by `account` and appends it to
    /// `project.tasks`.
    ///
    /// # Errors
    /// - `InvalidEnumValue` for unknown priority or status text.
    /// - `MissingField` for a blank objective or description.
    /// - `DuplicateTask` when the project already has this key.
    pub fn create(
        &self,
        account: &Account,
        project: &mut Project,
        request: NewTaskRequest,
    ) -> ServiceResult<Task> {
        self.create_for(&account.username, project, request)
    }

    /// Creates a task inside the account's own copy of project `project_id`.
    pub fn create_in_account(
        &self,
        account: &mut Account,
        project_id: &str,
        request: NewTaskRequest,
    ) -> ServiceResult<Task> {
        let author = account.username.clone();
        let project = account
            .project_mut(project_id)
            .ok_or_else(|| ServiceError::ProjectNotFound(project_id.to_string()))?;
        self.create_for(&author, project, request)
    }

    fn create_for(
        &self,
        author: &str,
        project: &mut Project,
        request: NewTaskRequest,
    ) -> ServiceResult<Task> {
        let priority: Priority = request.priority.parse()?;
        let status: Status = request.status.parse()?;
        let objective = require(&request.objective, "task objective")?;
        let description = require(&request.description, "task description")?;
        let key = normalize_optional(request.key).unwrap_or_else(|| Uuid::new_v4().to_string());
        if project.task(&key).is_some() {
            return Err(ServiceError::DuplicateTask(key));
        }

        let task = Task {
            key,
            priority,
            objective,
            description,
            start: normalize_optional(request.start),
            end: normalize_optional(request.end),
            status,
            status_info: normalize_optional(request.status_info),
            dependent_on: normalize_optional(request.dependent_on),
            project_id: project.id.clone(),
            author: author.to_string(),
            logs: Vec::new(),
        };
        project.tasks.push(task.clone());

        info!(
            "event=task_create module=task status=ok project_id={} task_key={} priority={} task_status={}",
            task.project_id, task.key, task.priority, task.status
        );
        Ok(task)
    }

    /// Sets a new status and appends a log entry for it.
    pub fn update_status<'a>(
        &self,
        author: &str,
        project: &'a mut Project,
        key: &str,
        update: StatusUpdate,
    ) -> ServiceResult<&'a Task> {
        let status: Status = update.status.parse()?;
        let status_info = normalize_optional(update.status_info);
        let task = project
            .task_mut(key)
            .ok_or_else(|| ServiceError::TaskNotFound(key.to_string()))?;

        task.status = status;
        task.status_info = status_info.clone();
        task.logs.push(TaskLog {
            status,
            status_info,
            author: author.to_string(),
        });

        info!(
            "event=task_status module=task status=ok task_key={} task_status={} log_entries={}",
            task.key,
            task.status,
            task.logs.len()
        );
        Ok(task)
    }

    /// Edits priority, end date and dependency text.
    pub fn update<'a>(
        &self,
        project: &'a mut Project,
        key: &str,
        update: TaskUpdate,
    ) -> ServiceResult<&'a Task> {
        let priority = normalize_optional(update.priority)
            .map(|value| value.parse::<Priority>())
            .transpose()?;
        let task = project
            .task_mut(key)
            .ok_or_else(|| ServiceError::TaskNotFound(key.to_string()))?;

        if let Some(priority) = priority {
            task.priority = priority;
        }
        if let Some(end) = normalize_optional(update.end) {
            task.end = Some(end);
        }
        if let Some(dependent_on) = normalize_optional(update.dependent_on) {
            task.dependent_on = Some(dependent_on);
        }

        info!("event=task_update module=task status=ok task_key={}", task.key);
        Ok(task)
    }

    /// Removes a task together with its log entries.
    pub fn delete(&self, project: &mut Project, key: &str) -> ServiceResult<Task> {
        let index = project
            .tasks
            .iter()
            .position(|task| task.key == key)
            .ok_or_else(|| ServiceError::TaskNotFound(key.to_string()))?;
        let removed = project.tasks.remove(index);
        info!(
            "event=task_delete module=task status=ok task_key={} log_entries={}",
            removed.key,
            removed.logs.len()
        );
        Ok(removed)
    }
}
