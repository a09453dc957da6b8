//! Project contact use-case service.
//!
//! # Responsibility
//! - Grant internal and external contacts access to a project.
//! - Revoke contacts by key.
//!
//! # Invariants
//! - A task named by an internal contact exists in the project when the
//!   contact is added.
//! - A rejected request leaves `project.contacts` unchanged.
//!
//! Contacts are persisted with the project that embeds them.

use super::{normalize_optional, require, require_email, ServiceError, ServiceResult};
use crate::model::contact::{Contact, ContactKind};
use crate::model::project::Project;
use log::info;
use uuid::Uuid;

/// Input for adding a contact. `task_id` applies to internal contacts only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContactRequest {
    pub kind: ContactKind,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub task_id: Option<String>,
}

/// Stateless contact operations over an in-memory project.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContactService;

impl ContactService {
    pub fn new() -> Self {
        Self
    }

    /// Adds a contact to `project` under a generated key.
    ///
    /// # Errors
    /// - `MissingField` for a blank name, email or phone.
    /// - `InvalidEmail` when the email does not look like `a@b.c`.
    /// - `InvalidContact` when an external contact names a task.
    /// - `TaskNotFound` when the named task is not in the project.
    pub fn add(&self, project: &mut Project, request: NewContactRequest) -> ServiceResult<Contact> {
        let name = require(&request.name, "contact name")?;
        let email = require_email(&request.email)?;
        let phone = require(&request.phone, "contact phone")?;
        let task_id = normalize_optional(request.task_id);
        match (request.kind, task_id.as_deref()) {
            (ContactKind::External, Some(_)) => {
                return Err(ServiceError::InvalidContact(
                    "external contacts cannot be attached to a task".to_string(),
                ));
            }
            (ContactKind::Internal, Some(key)) if project.task(key).is_none() => {
                return Err(ServiceError::TaskNotFound(key.to_string()));
            }
            _ => {}
        }

        let contact = Contact {
            key: Uuid::new_v4().to_string(),
            kind: request.kind,
            name,
            email,
            phone,
            task_id,
        };
        project.contacts.push(contact.clone());

        info!(
            "event=contact_add module=contact status=ok project_id={} contact_key={} kind={}",
            project.id, contact.key, contact.kind
        );
        Ok(contact)
    }

    /// Contacts of `project`, optionally only one kind, in insertion order.
    pub fn list<'a>(&self, project: &'a Project, kind: Option<ContactKind>) -> Vec<&'a Contact> {
        project
            .contacts
            .iter()
            .filter(|contact| kind.map_or(true, |kind| contact.kind == kind))
            .collect()
    }

    /// Removes a contact and returns it.
    pub fn revoke(&self, project: &mut Project, key: &str) -> ServiceResult<Contact> {
        let index = project
            .contacts
            .iter()
            .position(|contact| contact.key == key)
            .ok_or_else(|| ServiceError::ContactNotFound(key.to_string()))?;
        let removed = project.contacts.remove(index);
        info!(
            "event=contact_revoke module=contact status=ok project_id={} contact_key={} kind={}",
            project.id, removed.key, removed.kind
        );
        Ok(removed)
    }
}
