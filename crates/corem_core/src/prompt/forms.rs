//! Prompt sequences for each interactive use-case.
//!
//! Forms only collect text. Validation (enum parsing, confirmation match,
//! email format) happens in the services so scripted and typed input go
//! through the same checks.

use super::{PromptResult, Prompter};
use crate::model::contact::ContactKind;
use crate::model::task::{Priority, Status};
use crate::service::account_service::{LoginRequest, NewAccountRequest, UpdatePasswordRequest};
use crate::service::contact_service::NewContactRequest;
use crate::service::project_service::{NewProjectRequest, ProjectUpdate};
use crate::service::task_service::{NewTaskRequest, StatusUpdate, TaskUpdate};

pub fn new_account(prompter: &mut dyn Prompter) -> PromptResult<NewAccountRequest> {
    let username = prompter.required("Enter username: ")?;
    let password = prompter.secret("Secure key: ")?;
    let confirm_password = prompter.secret("Confirm key: ")?;
    let email = prompter.required("Enter email: ")?;
    Ok(NewAccountRequest {
        username,
        password,
        confirm_password,
        email,
    })
}

pub fn login(prompter: &mut dyn Prompter) -> PromptResult<LoginRequest> {
    let username = prompter.required("Enter username: ")?;
    let password = prompter.secret("Secure key: ")?;
    Ok(LoginRequest { username, password })
}

pub fn update_password(prompter: &mut dyn Prompter) -> PromptResult<UpdatePasswordRequest> {
    let new_password = prompter.secret("New secure key: ")?;
    let confirm_password = prompter.secret("Confirm key: ")?;
    Ok(UpdatePasswordRequest {
        new_password,
        confirm_password,
    })
}

pub fn new_project(prompter: &mut dyn Prompter) -> PromptResult<NewProjectRequest> {
    let id = prompter.optional("Enter project id (optional): ")?;
    let name = prompter.required("Enter project name: ")?;
    let description = prompter.required("Enter project description: ")?;
    let category = prompter.optional("Enter project category (optional): ")?;
    let tags = prompter.optional("Enter tags separated by comma (optional): ")?;
    Ok(NewProjectRequest {
        id,
        name,
        description,
        category,
        tags,
    })
}

pub fn project_update(prompter: &mut dyn Prompter) -> PromptResult<ProjectUpdate> {
    Ok(ProjectUpdate {
        name: prompter.optional("New name (blank keeps current): ")?,
        description: prompter.optional("New description (blank keeps current): ")?,
        category: prompter.optional("New category (blank keeps current): ")?,
        tags: prompter.optional("New tags (blank keeps current): ")?,
    })
}

pub fn new_task(prompter: &mut dyn Prompter) -> PromptResult<NewTaskRequest> {
    let key = prompter.optional("Enter task id (optional): ")?;
    let priority = prompter.required(&format!("Enter priority [{}]: ", Priority::EXPECTED))?;
    let objective = prompter.required("Enter task objective: ")?;
    let description = prompter.required("Enter task description: ")?;
    let start = prompter.optional("Enter start date (optional): ")?;
    let end = prompter.optional("Enter expected end date (optional): ")?;
    let status = prompter.required(&format!("Enter current status [{}]: ", Status::EXPECTED))?;
    let dependent_on =
        prompter.optional("Enter comma separated task id(s) this task depends on (optional): ")?;
    Ok(NewTaskRequest {
        key,
        priority,
        objective,
        description,
        start,
        end,
        status,
        status_info: None,
        dependent_on,
    })
}

pub fn status_update(prompter: &mut dyn Prompter) -> PromptResult<StatusUpdate> {
    let status = prompter.required(&format!("Enter current status [{}]: ", Status::EXPECTED))?;
    let status_info = prompter.optional("Enter status description (optional): ")?;
    Ok(StatusUpdate {
        status,
        status_info,
    })
}

pub fn task_update(prompter: &mut dyn Prompter) -> PromptResult<TaskUpdate> {
    Ok(TaskUpdate {
        priority: prompter.optional(&format!(
            "New priority [{}] (blank keeps current): ",
            Priority::EXPECTED
        ))?,
        end: prompter.optional("New end date (blank keeps current): ")?,
        dependent_on: prompter.optional("New dependency list (blank keeps current): ")?,
    })
}

/// Only internal contacts are asked for a task.
pub fn new_contact(
    prompter: &mut dyn Prompter,
    kind: ContactKind,
) -> PromptResult<NewContactRequest> {
    let name = prompter.required("Enter contact name: ")?;
    let email = prompter.required("Enter contact email: ")?;
    let phone = prompter.required("Enter contact phone number: ")?;
    let task_id = match kind {
        ContactKind::Internal => prompter.optional("Enter task id (optional): ")?,
        ContactKind::External => None,
    };
    Ok(NewContactRequest {
        kind,
        name,
        email,
        phone,
        task_id,
    })
}

#[cfg(test)]
mod tests {
    use super::{new_account, new_contact, new_project, new_task};
    use crate::model::contact::ContactKind;
    use crate::prompt::{PromptError, ScriptedPrompter};

    #[test]
    fn new_account_reads_keys_securely() {
        let mut prompter = ScriptedPrompter::new(["ada", "Secr3t!", "Secr3t!", "ada@example.com"]);
        let request = new_account(&mut prompter).unwrap();
        assert_eq!(request.username, "ada");
        assert_eq!(request.confirm_password, "Secr3t!");

        let secure: Vec<bool> = prompter.asked().iter().map(|(_, secure)| *secure).collect();
        assert_eq!(secure, vec![false, true, true, false]);
    }

    #[test]
    fn new_project_allows_blank_optional_fields() {
        let mut prompter = ScriptedPrompter::new(["", "Garden", "Spring planting", "", ""]);
        let request = new_project(&mut prompter).unwrap();
        assert_eq!(request.id, None);
        assert_eq!(request.category, None);
        assert_eq!(request.name, "Garden");
    }

    #[test]
    fn new_task_stops_at_missing_required_answer() {
        let mut prompter = ScriptedPrompter::new(["", "high", ""]);
        let err = new_task(&mut prompter).unwrap_err();
        assert!(matches!(err, PromptError::MissingInput(label) if label == "Enter task objective:"));
    }

    #[test]
    fn new_contact_asks_for_task_only_for_internal_contacts() {
        let mut prompter =
            ScriptedPrompter::new(["Lin", "lin@example.com", "555-0100", "dig"]);
        let request = new_contact(&mut prompter, ContactKind::Internal).unwrap();
        assert_eq!(request.task_id.as_deref(), Some("dig"));
        assert_eq!(prompter.remaining(), 0);

        let mut prompter = ScriptedPrompter::new(["Sam", "sam@example.com", "555-0101", "dig"]);
        let request = new_contact(&mut prompter, ContactKind::External).unwrap();
        assert_eq!(request.task_id, None);
        assert_eq!(prompter.remaining(), 1);
    }
}
