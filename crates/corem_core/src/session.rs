//! Explicit context of one signed-in user.
//!
//! # Invariants
//! - The plaintext key sits next to the account, never inside it, so
//!   exporting `session.account()` cannot leak it.
//! - A selected project id, when set, names a project of this account.

use crate::credential::SessionKey;
use crate::model::account::Account;
use crate::model::project::Project;

#[derive(Debug)]
pub struct Session {
    account: Account,
    key: SessionKey,
    selected_project: Option<String>,
}

impl Session {
    pub fn new(account: Account, key: SessionKey) -> Self {
        Self {
            account,
            key,
            selected_project: None,
        }
    }

    pub fn account(&self) -> &Account {
        &self.account
    }

    pub fn account_mut(&mut self) -> &mut Account {
        &mut self.account
    }

    pub fn username(&self) -> &str {
        self.account.username.as_str()
    }

    pub fn key(&self) -> &SessionKey {
        &self.key
    }

    pub(crate) fn replace_key(&mut self, key: SessionKey) {
        self.key = key;
    }

    /// Selects one of the account's projects. Returns `false` for unknown ids.
    pub fn select_project(&mut self, id: &str) -> bool {
        if self.account.project(id).is_none() {
            return false;
        }
        self.selected_project = Some(id.to_string());
        true
    }

    pub fn clear_selection(&mut self) {
        self.selected_project = None;
    }

    pub fn selected_project_id(&self) -> Option<&str> {
        self.selected_project.as_deref()
    }

    pub fn selected_project(&self) -> Option<&Project> {
        self.selected_project
            .as_deref()
            .and_then(|id| self.account.project(id))
    }

    pub fn selected_project_mut(&mut self) -> Option<&mut Project> {
        let id = self.selected_project.clone()?;
        self.account.project_mut(&id)
    }

    /// Ends the session, dropping the plaintext key.
    pub fn into_account(self) -> Account {
        self.account
    }
}
