use corem_core::prompt::forms;
use corem_core::{
    open_services, PromptError, ScriptedPrompter, ServiceError, Status, StoreLayout, TaskService,
};

#[test]
fn scripted_register_project_task_export_then_login() {
    let dir = tempfile::tempdir().unwrap();
    let layout = StoreLayout::at(dir.path().join(".corem"));
    let (accounts, projects) = open_services(&layout);
    let tasks = TaskService::new();

    let mut prompter = ScriptedPrompter::new([
        // account
        "ada",
        "Secr3t!",
        "Secr3t!",
        "ada@example.com",
        // project
        "",
        "Garden",
        "Spring planting",
        "home",
        "",
        // task
        "dig",
        "high",
        "Dig beds",
        "Two raised beds",
        "",
        "",
        "waiting",
        "",
    ]);

    let request = forms::new_account(&mut prompter).unwrap();
    let mut session = accounts.create(request).unwrap();

    let request = forms::new_project(&mut prompter).unwrap();
    let project = projects.create(session.account_mut(), request).unwrap();
    assert!(session.select_project(&project.id));

    let request = forms::new_task(&mut prompter).unwrap();
    tasks
        .create_in_account(session.account_mut(), &project.id, request)
        .unwrap();
    assert_eq!(prompter.remaining(), 0);

    accounts.export(session.account(), false).unwrap();
    accounts.sign_out(session);

    let mut prompter = ScriptedPrompter::new(["ada", "Secr3t!"]);
    let session = accounts
        .login(forms::login(&mut prompter).unwrap())
        .unwrap();
    let stored = session.account().project(&project.id).unwrap();
    assert_eq!(stored.category.as_deref(), Some("home"));
    assert_eq!(stored.tasks.len(), 1);
    assert_eq!(stored.tasks[0].key, "dig");
    assert_eq!(stored.tasks[0].status, Status::Waiting);
    assert_eq!(stored.tasks[0].author, "ada");
}

#[test]
fn scripted_wrong_password_and_blank_required_answer() {
    let dir = tempfile::tempdir().unwrap();
    let layout = StoreLayout::at(dir.path().join(".corem"));
    let (accounts, _) = open_services(&layout);

    let mut prompter = ScriptedPrompter::new(["ada", "Secr3t!", "Secr3t!", "ada@example.com"]);
    let session = accounts
        .create(forms::new_account(&mut prompter).unwrap())
        .unwrap();
    accounts.export(session.account(), false).unwrap();

    let mut prompter = ScriptedPrompter::new(["ada", "wrong"]);
    let err = accounts
        .login(forms::login(&mut prompter).unwrap())
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidCredentials));

    let mut prompter = ScriptedPrompter::new(["", "whatever"]);
    let err = forms::login(&mut prompter).unwrap_err();
    assert!(matches!(err, PromptError::MissingInput(_)));
}
