use corem_core::{Account, JsonStore, Priority, Project, Status, StoreError, Task};
use serde_json::Value;

fn sample_accounts() -> Vec<Account> {
    let task = Task {
        key: "t-1".to_string(),
        priority: Priority::Medium,
        objective: "Draft outline".to_string(),
        description: "First pass".to_string(),
        start: Some("01-03-2026".to_string()),
        end: None,
        status: Status::InProgress,
        status_info: None,
        dependent_on: Some("t-0".to_string()),
        project_id: "p-1".to_string(),
        author: "ada".to_string(),
        logs: Vec::new(),
    };
    let project = Project {
        id: "p-1".to_string(),
        name: "Book".to_string(),
        category: None,
        tags: Some("writing,draft".to_string()),
        description: "A book".to_string(),
        created_by: "ada".to_string(),
        tasks: vec![task],
        contacts: Vec::new(),
    };
    vec![Account {
        username: "ada".to_string(),
        password: "$argon2id$stored".to_string(),
        email: "ada@example.com".to_string(),
        salt: "0f3c7b9e-salt".to_string(),
        projects: vec![project],
    }]
}

#[test]
fn write_of_read_preserves_logical_array() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStore::new(dir.path().join("accounts.json"));
    store.write_all(&sample_accounts()).unwrap();
    let before: Value = serde_json::from_slice(&std::fs::read(store.path()).unwrap()).unwrap();

    let loaded: Vec<Account> = store.read_all().unwrap();
    store.write_all(&loaded).unwrap();
    let after: Value = serde_json::from_slice(&std::fs::read(store.path()).unwrap()).unwrap();

    assert_eq!(before, after);
    assert_eq!(loaded, sample_accounts());
    assert_eq!(loaded[0].projects[0].tasks[0], sample_accounts()[0].projects[0].tasks[0]);
}

#[test]
fn wire_format_uses_camel_case_and_null_optionals() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStore::new(dir.path().join("accounts.json"));
    store.write_all(&sample_accounts()).unwrap();

    let json: Value = serde_json::from_slice(&std::fs::read(store.path()).unwrap()).unwrap();
    let project = &json[0]["projects"][0];
    assert_eq!(project["createdBy"], "ada");
    assert!(project["category"].is_null());
    let task = &project["tasks"][0];
    assert_eq!(task["projectId"], "p-1");
    assert_eq!(task["dependentOn"], "t-0");
    assert_eq!(task["status"], "inProgress");
    assert_eq!(task["priority"], "medium");
    assert!(task["end"].is_null());
}

#[test]
fn records_without_optional_or_collection_fields_still_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("projects.json");
    std::fs::write(
        &path,
        r#"[{"id":"p-9","name":"Legacy","description":"old","createdBy":"bob"}]"#,
    )
    .unwrap();

    let projects: Vec<Project> = JsonStore::new(&path).read_all().unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].tags, None);
    assert!(projects[0].tasks.is_empty());
}

#[test]
fn unknown_enum_value_in_file_is_corrupt() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("projects.json");
    std::fs::write(
        &path,
        r#"[{"id":"p","name":"n","description":"d","createdBy":"a","tasks":[
            {"key":"k","priority":"urgent","objective":"o","description":"d",
             "status":"waiting","projectId":"p","author":"a"}]}]"#,
    )
    .unwrap();

    let err = JsonStore::new(&path).read_all::<Project>().unwrap_err();
    assert!(matches!(err, StoreError::Corrupt { .. }));
}
