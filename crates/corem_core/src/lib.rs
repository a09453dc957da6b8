//! Core domain logic for Corem.
//! Accounts, projects and tasks in a local JSON store behind a salted
//! password check. This crate owns every business invariant; the CLI only
//! collects input and prints results.

pub mod config;
pub mod credential;
pub mod logging;
pub mod model;
pub mod prompt;
pub mod repo;
pub mod service;
pub mod session;
pub mod store;

pub use config::{ConfigError, StoreLayout};
pub use credential::{CredentialError, SessionKey};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::account::Account;
pub use model::contact::{Contact, ContactKind};
pub use model::project::Project;
pub use model::task::{Priority, Status, Task, TaskLog};
pub use model::ParseEnumError;
pub use prompt::{PromptError, PromptResult, Prompter, ScriptedPrompter};
pub use repo::account_repo::{AccountRepository, JsonAccountRepository};
pub use repo::project_repo::{JsonProjectRepository, ProjectRepository};
pub use repo::{RepoResult, UpsertOutcome};
pub use service::account_service::{
    AccountService, LoginRequest, NewAccountRequest, UpdatePasswordRequest,
};
pub use service::contact_service::{ContactService, NewContactRequest};
pub use service::project_service::{NewProjectRequest, ProjectService, ProjectUpdate};
pub use service::task_service::{NewTaskRequest, StatusUpdate, TaskService, TaskUpdate};
pub use service::{ServiceError, ServiceResult};
pub use session::Session;
pub use store::{JsonStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Account and project services wired to one store layout.
pub fn open_services(
    layout: &StoreLayout,
) -> (
    AccountService<JsonAccountRepository>,
    ProjectService<JsonProjectRepository>,
) {
    (
        AccountService::new(JsonAccountRepository::new(layout.account_store())),
        ProjectService::new(JsonProjectRepository::new(layout.project_store())),
    )
}
