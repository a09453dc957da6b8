use corem_core::{
    ContactKind, ContactService, JsonStore, NewContactRequest, Priority, Project, ServiceError,
    Status, Task,
};

fn project_with_task(task_key: &str) -> Project {
    Project {
        id: "p-1".to_string(),
        name: "Garden".to_string(),
        category: None,
        tags: None,
        description: "d".to_string(),
        created_by: "ada".to_string(),
        tasks: vec![Task {
            key: task_key.to_string(),
            priority: Priority::Low,
            objective: "Dig".to_string(),
            description: "Dig beds".to_string(),
            start: None,
            end: None,
            status: Status::Waiting,
            status_info: None,
            dependent_on: None,
            project_id: "p-1".to_string(),
            author: "ada".to_string(),
            logs: Vec::new(),
        }],
        contacts: Vec::new(),
    }
}

fn contact_request(kind: ContactKind, task_id: Option<&str>) -> NewContactRequest {
    NewContactRequest {
        kind,
        name: " Lin ".to_string(),
        email: "lin@example.com".to_string(),
        phone: "555-0100".to_string(),
        task_id: task_id.map(str::to_string),
    }
}

#[test]
fn internal_contact_can_name_existing_task() {
    let mut project = project_with_task("dig");
    let contact = ContactService::new()
        .add(&mut project, contact_request(ContactKind::Internal, Some("dig")))
        .unwrap();

    assert_eq!(contact.name, "Lin");
    assert_eq!(contact.task_id.as_deref(), Some("dig"));
    assert!(!contact.key.is_empty());
    assert_eq!(project.contact(&contact.key), Some(&contact));
}

#[test]
fn rejected_contacts_leave_project_unchanged() {
    let mut project = project_with_task("dig");
    let contacts = ContactService::new();

    let err = contacts
        .add(&mut project, contact_request(ContactKind::Internal, Some("plant")))
        .unwrap_err();
    assert!(matches!(err, ServiceError::TaskNotFound(key) if key == "plant"));

    let err = contacts
        .add(&mut project, contact_request(ContactKind::External, Some("dig")))
        .unwrap_err();
    assert_eq!(err.code(), "invalid_contact");

    let mut request = contact_request(ContactKind::External, None);
    request.email = "lin.example.com".to_string();
    let err = contacts.add(&mut project, request).unwrap_err();
    assert!(matches!(err, ServiceError::InvalidEmail(_)));

    let mut request = contact_request(ContactKind::External, None);
    request.phone = " ".to_string();
    let err = contacts.add(&mut project, request).unwrap_err();
    assert!(matches!(err, ServiceError::MissingField("contact phone")));

    assert!(project.contacts.is_empty());
}

#[test]
fn list_filters_by_kind_and_revoke_removes_contact() {
    let mut project = project_with_task("dig");
    let contacts = ContactService::new();
    let internal = contacts
        .add(&mut project, contact_request(ContactKind::Internal, None))
        .unwrap();
    let external = contacts
        .add(&mut project, contact_request(ContactKind::External, None))
        .unwrap();

    assert_eq!(contacts.list(&project, None).len(), 2);
    assert_eq!(
        contacts.list(&project, Some(ContactKind::External)),
        vec![&external]
    );

    let revoked = contacts.revoke(&mut project, &internal.key).unwrap();
    assert_eq!(revoked, internal);
    assert_eq!(project.contacts, vec![external]);
    assert!(matches!(
        contacts.revoke(&mut project, &internal.key).unwrap_err(),
        ServiceError::ContactNotFound(_)
    ));
}

#[test]
fn contacts_are_stored_with_their_project() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStore::new(dir.path().join("projects.json"));
    let mut project = project_with_task("dig");
    ContactService::new()
        .add(&mut project, contact_request(ContactKind::Internal, Some("dig")))
        .unwrap();
    store.write_all(std::slice::from_ref(&project)).unwrap();

    let json: serde_json::Value =
        serde_json::from_slice(&std::fs::read(store.path()).unwrap()).unwrap();
    let contact = &json[0]["contacts"][0];
    assert_eq!(contact["kind"], "internal");
    assert_eq!(contact["taskId"], "dig");

    let loaded: Vec<Project> = store.read_all().unwrap();
    assert_eq!(loaded[0].contacts, project.contacts);
}
