//! Account, project and task use-case services.
//!
//! # Responsibility
//! - Validate request input above the repository layer.
//! - Keep credential handling, ownership wiring and persistence calls in one
//!   place so the CLI only collects input and reports results.
//!
//! # Invariants
//! - Every fallible operation returns `ServiceError`; nothing here exits the
//!   process.
//! - Enumerated task fields are parsed before any record is mutated.

pub mod account_service;
pub mod attachments;
pub mod contact_service;
pub mod project_service;
pub mod task_service;

use crate::credential::CredentialError;
use crate::model::ParseEnumError;
use crate::store::StoreError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors from account, project and task use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Password and its confirmation differ.
    ConfirmationMismatch,
    /// No stored account has this username (or email).
    AccountNotFound(String),
    /// An account with this username is already stored.
    DuplicateAccount(String),
    /// Entered password does not match the stored digest.
    InvalidCredentials,
    /// Priority or status text is not a known member.
    InvalidEnumValue(ParseEnumError),
    InvalidEmail(String),
    /// A required request field is blank.
    MissingField(&'static str),
    DuplicateProject(String),
    ProjectNotFound(String),
    DuplicateTask(String),
    TaskNotFound(String),
    ContactNotFound(String),
    /// Contact fields contradict the contact kind.
    InvalidContact(String),
    /// Copying an attachment failed.
    FileOperation {
        path: PathBuf,
        source: std::io::Error,
    },
    Credential(CredentialError),
    Store(StoreError),
}

impl ServiceError {
    /// Stable short code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfirmationMismatch => "confirmation_mismatch",
            Self::AccountNotFound(_) => "account_not_found",
            Self::DuplicateAccount(_) => "duplicate_account",
            Self::InvalidCredentials => "invalid_credentials",
            Self::InvalidEnumValue(_) => "invalid_enum_value",
            Self::InvalidEmail(_) => "invalid_email",
            Self::MissingField(_) => "missing_field",
            Self::DuplicateProject(_) => "duplicate_project",
            Self::ProjectNotFound(_) => "project_not_found",
            Self::DuplicateTask(_) => "duplicate_task",
            Self::TaskNotFound(_) => "task_not_found",
            Self::ContactNotFound(_) => "contact_not_found",
            Self::InvalidContact(_) => "invalid_contact",
            Self::FileOperation { .. } => "file_operation_failed",
            Self::Credential(_) => "credential_failed",
            Self::Store(err) => err.code(),
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConfirmationMismatch => write!(f, "passwords do not match"),
            Self::AccountNotFound(key) => write!(f, "no such account: {key}"),
            Self::DuplicateAccount(username) => {
                write!(f, "account already exists: {username}")
            }
            Self::InvalidCredentials => write!(f, "invalid credentials"),
            Self::InvalidEnumValue(err) => write!(f, "{err}"),
            Self::InvalidEmail(email) => write!(f, "unsupported email format: `{email}`"),
            Self::MissingField(field) => write!(f, "{field} is required"),
            Self::DuplicateProject(id) => write!(f, "project already exists: {id}"),
            Self::ProjectNotFound(id) => write!(f, "project not found: {id}"),
            Self::DuplicateTask(key) => write!(f, "task already exists: {key}"),
            Self::TaskNotFound(key) => write!(f, "task not found: {key}"),
            Self::ContactNotFound(key) => write!(f, "contact not found: {key}"),
            Self::InvalidContact(details) => write!(f, "invalid contact: {details}"),
            Self::FileOperation { path, source } => {
                write!(f, "file operation failed for `{}`: {source}", path.display())
            }
            Self::Credential(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidEnumValue(err) => Some(err),
            Self::FileOperation { source, .. } => Some(source),
            Self::Credential(err) => Some(err),
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<CredentialError> for ServiceError {
    fn from(value: CredentialError) -> Self {
        Self::Credential(value)
    }
}

impl From<ParseEnumError> for ServiceError {
    fn from(value: ParseEnumError) -> Self {
        Self::InvalidEnumValue(value)
    }
}

/// Trims `value` and rejects blank input as `MissingField(field)`.
pub(crate) fn require(value: &str, field: &'static str) -> ServiceResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

/// Trims an optional value; blank becomes `None`.
pub(crate) fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|trimmed| !trimmed.is_empty())
}

/// Trims a required email and checks it looks like `a@b.c`.
pub(crate) fn require_email(value: &str) -> ServiceResult<String> {
    let email = require(value, "email")?;
    if !EMAIL_RE.is_match(&email) {
        return Err(ServiceError::InvalidEmail(email));
    }
    Ok(email)
}
