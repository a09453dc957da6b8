//! Interactive console entry point.
//!
//! # Responsibility
//! - Wire the terminal prompter to the core services.
//! - Print results and report failures as `[!] ...` lines.
//! - Own the process exit code; the core never exits.

mod console;

use console::ConsolePrompter;
use corem_core::prompt::forms;
use corem_core::{
    core_version, default_log_level, init_logging, open_services, AccountService, ContactKind,
    ContactService, JsonAccountRepository, JsonProjectRepository, Project, ProjectService,
    PromptError, PromptResult, Prompter, ServiceError, Session, StoreLayout, TaskService,
};
use log::{error, info, warn};
use std::path::Path;
use std::process::ExitCode;

const MAX_LOGIN_ATTEMPTS: usize = 3;
const EXIT_INTERRUPTED: u8 = 130;

fn main() -> ExitCode {
    let layout = match StoreLayout::from_home() {
        Ok(layout) => layout,
        Err(err) => {
            eprintln!("[!] {err}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(err) = init_logging(default_log_level(), layout.log_dir()) {
        eprintln!("[!] logging disabled: {err}");
    }
    info!(
        "event=cli_start module=cli status=ok version={}",
        core_version()
    );

    let console = Console::new(&layout);
    let mut prompter = ConsolePrompter::new();
    match console.run(&mut prompter) {
        Ok(code) => code,
        Err(PromptError::Closed) => {
            println!();
            info!("event=cli_exit module=cli status=ok reason=input_closed");
            ExitCode::SUCCESS
        }
        Err(PromptError::Interrupted) => {
            eprintln!("[!] Interrupted; unsaved changes were discarded.");
            info!("event=cli_exit module=cli status=ok reason=interrupted");
            ExitCode::from(EXIT_INTERRUPTED)
        }
        Err(err) => {
            eprintln!("[!] Input Error: {err}");
            error!("event=cli_exit module=cli status=error error={err}");
            ExitCode::FAILURE
        }
    }
}

enum SessionEnd {
    SignOut,
    DeleteAccount,
}

struct Console {
    accounts: AccountService<JsonAccountRepository>,
    projects: ProjectService<JsonProjectRepository>,
    tasks: TaskService,
    contacts: ContactService,
}

impl Console {
    fn new(layout: &StoreLayout) -> Self {
        let (accounts, projects) = open_services(layout);
        Self {
            accounts,
            projects,
            tasks: TaskService::new(),
            contacts: ContactService::new(),
        }
    }

    fn run(&self, prompter: &mut dyn Prompter) -> PromptResult<ExitCode> {
        let Some(mut session) = self.authenticate(prompter)? else {
            return Ok(ExitCode::FAILURE);
        };
        println!("Signed in as {}.", session.username());

        match self.account_menu(prompter, &mut session) {
            Ok(SessionEnd::SignOut) => {
                self.save_account(&session);
                self.accounts.sign_out(session);
                println!("Signed out.");
                Ok(ExitCode::SUCCESS)
            }
            Ok(SessionEnd::DeleteAccount) => match self.accounts.delete(session) {
                Ok(account) => {
                    println!("Account {} deleted.", account.username);
                    Ok(ExitCode::SUCCESS)
                }
                Err(err) => {
                    report(&err);
                    Ok(ExitCode::FAILURE)
                }
            },
            Err(PromptError::Interrupted) => {
                self.accounts.sign_out(session);
                Err(PromptError::Interrupted)
            }
            Err(err) => {
                // Keep what was entered before the prompt failed.
                self.save_account(&session);
                self.accounts.sign_out(session);
                Err(err)
            }
        }
    }

    fn authenticate(&self, prompter: &mut dyn Prompter) -> PromptResult<Option<Session>> {
        let choice = prompter
            .optional("Enter any character for a new account or press return to login: ")?;
        if choice.is_some() {
            let request = forms::new_account(prompter)?;
            let session = match self.accounts.create(request) {
                Ok(session) => session,
                Err(err) => {
                    report(&err);
                    return Ok(None);
                }
            };
            if let Err(err) = self.accounts.export(session.account(), false) {
                report(&err);
                return Ok(None);
            }
            println!("Account created.");
            return Ok(Some(session));
        }

        for attempt in 1..=MAX_LOGIN_ATTEMPTS {
            let request = forms::login(prompter)?;
            match self.accounts.login(request) {
                Ok(session) => return Ok(Some(session)),
                Err(err @ ServiceError::InvalidCredentials) if attempt < MAX_LOGIN_ATTEMPTS => {
                    report(&err);
                }
                Err(err) => {
                    report(&err);
                    return Ok(None);
                }
            }
        }
        Ok(None)
    }

    fn account_menu(
        &self,
        prompter: &mut dyn Prompter,
        session: &mut Session,
    ) -> PromptResult<SessionEnd> {
        loop {
            println!();
            println!("[1] New project");
            println!("[2] Select project");
            println!("[3] List projects");
            println!("[4] Change secure key");
            println!("[5] Save account");
            println!("[6] Delete account");
            println!("[q] Save and sign out");
            let choice = prompter.optional("Select option: ")?;
            match choice.as_deref() {
                Some("1") => self.new_project(prompter, session)?,
                Some("2") => {
                    if self.select_project(prompter, session)? {
                        self.project_menu(prompter, session)?;
                    }
                }
                Some("3") => print_projects(session.account().projects.as_slice()),
                Some("4") => {
                    let request = forms::update_password(prompter)?;
                    match self.accounts.update_password(session, request) {
                        Ok(()) => println!("Secure key updated."),
                        Err(err) => report(&err),
                    }
                }
                Some("5") => self.save_account(session),
                Some("6") => {
                    let answer = prompter.optional("Type DELETE to remove this account: ")?;
                    if answer.as_deref() == Some("DELETE") {
                        return Ok(SessionEnd::DeleteAccount);
                    }
                    println!("Account kept.");
                }
                Some("q") | Some("Q") => return Ok(SessionEnd::SignOut),
                _ => println!("[!] Unknown option."),
            }
        }
    }

    fn new_project(&self, prompter: &mut dyn Prompter, session: &mut Session) -> PromptResult<()> {
        let request = forms::new_project(prompter)?;
        match self.projects.create(session.account_mut(), request) {
            Ok(project) => {
                println!("Project {} created with id {}.", project.name, project.id);
                session.select_project(&project.id);
                self.project_menu(prompter, session)?;
            }
            Err(err) => report(&err),
        }
        Ok(())
    }

    fn select_project(
        &self,
        prompter: &mut dyn Prompter,
        session: &mut Session,
    ) -> PromptResult<bool> {
        let listed = self.projects.list(session.account());
        if listed.is_empty() {
            println!("No projects yet.");
            return Ok(false);
        }
        print_projects(listed);

        let answer = prompter.required("Select project number or id: ")?;
        let id = match answer.parse::<usize>() {
            Ok(n) if (1..=listed.len()).contains(&n) => listed[n - 1].id.clone(),
            _ => answer,
        };
        if let Err(err) = self.projects.find(session.account(), &id) {
            report(&err);
            return Ok(false);
        }
        Ok(session.select_project(&id))
    }

    fn project_menu(&self, prompter: &mut dyn Prompter, session: &mut Session) -> PromptResult<()> {
        let author = session.username().to_string();
        while let Some(project) = session.selected_project() {
            println!();
            println!("Project {} ({})", project.name, project.id);
            println!("[1] Add task");
            println!("[2] Update task status");
            println!("[3] Update task");
            println!("[4] Delete task");
            println!("[5] List tasks");
            println!("[6] Attach file");
            println!("[7] Update project");
            println!("[8] Export project");
            println!("[9] Delete project");
            println!("[c] Add internal contact");
            println!("[x] Add external contact");
            println!("[l] List contacts");
            println!("[r] Revoke contact");
            println!("[b] Back");
            let choice = prompter.optional("Select option: ")?;
            let Some(id) = session.selected_project_id().map(str::to_string) else {
                break;
            };

            match choice.as_deref() {
                Some("1") => {
                    let request = forms::new_task(prompter)?;
                    match self
                        .tasks
                        .create_in_account(session.account_mut(), &id, request)
                    {
                        Ok(task) => println!("Task {} added.", task.key),
                        Err(err) => report(&err),
                    }
                }
                Some("2") => {
                    let key = prompter.required("Enter task id: ")?;
                    let update = forms::status_update(prompter)?;
                    let Some(project) = session.selected_project_mut() else {
                        break;
                    };
                    match self.tasks.update_status(&author, project, &key, update) {
                        Ok(task) => println!("Task {} is now {}.", task.key, task.status),
                        Err(err) => report(&err),
                    }
                }
                Some("3") => {
                    let key = prompter.required("Enter task id: ")?;
                    let update = forms::task_update(prompter)?;
                    let Some(project) = session.selected_project_mut() else {
                        break;
                    };
                    match self.tasks.update(project, &key, update) {
                        Ok(task) => println!("Task {} updated.", task.key),
                        Err(err) => report(&err),
                    }
                }
                Some("4") => {
                    let key = prompter.required("Enter task id: ")?;
                    let Some(project) = session.selected_project_mut() else {
                        break;
                    };
                    match self.tasks.delete(project, &key) {
                        Ok(task) => println!("Task {} deleted.", task.key),
                        Err(err) => report(&err),
                    }
                }
                Some("5") => {
                    if let Some(project) = session.selected_project() {
                        print_tasks(project);
                    }
                }
                Some("6") => {
                    let source = prompter.required("Enter path of file to attach: ")?;
                    if let Some(project) = session.selected_project() {
                        self.attach(project, Path::new(&source));
                    }
                }
                Some("7") => {
                    let update = forms::project_update(prompter)?;
                    match self.projects.update(session.account_mut(), &id, update) {
                        Ok(project) => println!("Project {} updated.", project.name),
                        Err(err) => report(&err),
                    }
                }
                Some("8") => {
                    if let Some(project) = session.selected_project() {
                        match self.projects.export(project) {
                            Ok(outcome) => println!("Project export: {}.", outcome.as_str()),
                            Err(err) => report(&err),
                        }
                    }
                }
                Some("9") => {
                    let answer = prompter.optional("Type DELETE to remove this project: ")?;
                    if answer.as_deref() != Some("DELETE") {
                        println!("Project kept.");
                        continue;
                    }
                    match self.projects.delete(session.account_mut(), &id) {
                        Ok(project) => {
                            session.clear_selection();
                            println!("Project {} deleted.", project.name);
                        }
                        Err(err) => report(&err),
                    }
                }
                Some("c") => self.add_contact(prompter, session, ContactKind::Internal)?,
                Some("x") => self.add_contact(prompter, session, ContactKind::External)?,
                Some("l") => {
                    if let Some(project) = session.selected_project() {
                        print_contacts(project);
                    }
                }
                Some("r") => {
                    let key = prompter.required("Enter contact id: ")?;
                    let Some(project) = session.selected_project_mut() else {
                        break;
                    };
                    match self.contacts.revoke(project, &key) {
                        Ok(contact) => println!("Access revoked for {}.", contact.name),
                        Err(err) => report(&err),
                    }
                }
                Some("b") | Some("B") => {
                    session.clear_selection();
                    break;
                }
                _ => println!("[!] Unknown option."),
            }
        }
        Ok(())
    }

    fn add_contact(
        &self,
        prompter: &mut dyn Prompter,
        session: &mut Session,
        kind: ContactKind,
    ) -> PromptResult<()> {
        let request = forms::new_contact(prompter, kind)?;
        if let Some(project) = session.selected_project_mut() {
            match self.contacts.add(project, request) {
                Ok(contact) => println!("Contact {} added with id {}.", contact.name, contact.key),
                Err(err) => report(&err),
            }
        }
        Ok(())
    }

    /// Copies into the working directory. Failures are reported and the
    /// session goes on.
    fn attach(&self, project: &Project, source: &Path) {
        let dest_dir = match std::env::current_dir() {
            Ok(dir) => dir,
            Err(err) => {
                eprintln!("[!] File Error: {err}");
                warn!("event=cli_attach module=cli status=error error={err}");
                return;
            }
        };
        match self.projects.add_files(project, source, &dest_dir) {
            Ok(copied) => println!("Copied to {}.", copied.display()),
            Err(err) => report(&err),
        }
    }

    fn save_account(&self, session: &Session) {
        match self.accounts.export(session.account(), false) {
            Ok(outcome) => println!("Account export: {}.", outcome.as_str()),
            Err(err) => report(&err),
        }
    }
}

fn report(err: &ServiceError) {
    eprintln!("[!] {err}");
    warn!(
        "event=cli_action module=cli status=error error_code={}",
        err.code()
    );
}

fn print_projects(projects: &[Project]) {
    if projects.is_empty() {
        println!("No projects yet.");
        return;
    }
    for (n, project) in projects.iter().enumerate() {
        println!(
            "  [{}] {} ({}) tasks={}",
            n + 1,
            project.name,
            project.id,
            project.tasks.len()
        );
    }
}

fn print_contacts(project: &Project) {
    if project.contacts.is_empty() {
        println!("No contacts yet.");
        return;
    }
    for contact in &project.contacts {
        let task = contact
            .task_id
            .as_deref()
            .map(|key| format!(" task={key}"))
            .unwrap_or_default();
        println!(
            "  {} [{}] {} <{}> {}{}",
            contact.key, contact.kind, contact.name, contact.email, contact.phone, task
        );
    }
}

fn print_tasks(project: &Project) {
    if project.tasks.is_empty() {
        println!("No tasks yet.");
        return;
    }
    for task in &project.tasks {
        println!(
            "  {} [{} / {}] {}",
            task.key, task.priority, task.status, task.objective
        );
        let dependencies = task.dependency_keys();
        if !dependencies.is_empty() {
            println!("      depends on: {}", dependencies.join(", "));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Console;
    use corem_core::{
        open_services, NewAccountRequest, PromptError, PromptResult, Prompter, ScriptedPrompter,
        StoreLayout,
    };
    use std::collections::VecDeque;

    /// Replays answers, then behaves like Ctrl-C at the next prompt.
    struct InterruptingPrompter {
        answers: VecDeque<String>,
    }

    impl Prompter for InterruptingPrompter {
        fn read_line(&mut self, _label: &str, _secure: bool) -> PromptResult<String> {
            self.answers.pop_front().ok_or(PromptError::Interrupted)
        }
    }

    const LOGIN_THEN_NEW_PROJECT: [&str; 9] =
        ["", "ada", "pw", "1", "", "Garden", "Spring planting", "", ""];

    fn registered_layout() -> (tempfile::TempDir, StoreLayout) {
        let dir = tempfile::tempdir().unwrap();
        let layout = StoreLayout::at(dir.path().join(".corem"));
        let (accounts, _) = open_services(&layout);
        let session = accounts
            .create(NewAccountRequest {
                username: "ada".to_string(),
                password: "pw".to_string(),
                confirm_password: "pw".to_string(),
                email: "ada@example.com".to_string(),
            })
            .unwrap();
        accounts.export(session.account(), false).unwrap();
        (dir, layout)
    }

    fn stored_project_count(layout: &StoreLayout) -> usize {
        let (accounts, _) = open_services(layout);
        accounts.load_by_username("ada").unwrap().projects.len()
    }

    #[test]
    fn interrupt_discards_unsaved_changes() {
        let (_dir, layout) = registered_layout();
        let mut prompter = InterruptingPrompter {
            answers: LOGIN_THEN_NEW_PROJECT.iter().map(|s| s.to_string()).collect(),
        };

        let err = Console::new(&layout).run(&mut prompter).unwrap_err();
        assert!(matches!(err, PromptError::Interrupted));
        assert_eq!(stored_project_count(&layout), 0);
    }

    #[test]
    fn closed_input_saves_before_exit() {
        let (_dir, layout) = registered_layout();
        let mut prompter = ScriptedPrompter::new(LOGIN_THEN_NEW_PROJECT);

        let err = Console::new(&layout).run(&mut prompter).unwrap_err();
        assert!(matches!(err, PromptError::Closed));
        assert_eq!(stored_project_count(&layout), 1);
    }
}
