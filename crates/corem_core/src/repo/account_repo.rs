//! Account repository contract and JSON store implementation.

use super::{upsert_by_value, RepoResult, UpsertOutcome};
use crate::model::account::Account;
use crate::store::JsonStore;

/// Repository interface for account records.
pub trait AccountRepository {
    fn list_accounts(&self) -> RepoResult<Vec<Account>>;
    fn find_by_username(&self, username: &str) -> RepoResult<Option<Account>>;
    fn find_by_email(&self, email: &str) -> RepoResult<Option<Account>>;
    fn upsert_account(&self, account: &Account) -> RepoResult<UpsertOutcome>;
    fn remove_account(&self, username: &str) -> RepoResult<bool>;
}

/// Account repository backed by one JSON array file.
pub struct JsonAccountRepository {
    store: JsonStore,
}

impl JsonAccountRepository {
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }
}

impl AccountRepository for JsonAccountRepository {
    fn list_accounts(&self) -> RepoResult<Vec<Account>> {
        self.store.read_all()
    }

    fn find_by_username(&self, username: &str) -> RepoResult<Option<Account>> {
        Ok(self
            .list_accounts()?
            .into_iter()
            .find(|account| account.username == username))
    }

    fn find_by_email(&self, email: &str) -> RepoResult<Option<Account>> {
        Ok(self
            .list_accounts()?
            .into_iter()
            .find(|account| account.email == email))
    }

    fn upsert_account(&self, account: &Account) -> RepoResult<UpsertOutcome> {
        let mut accounts: Vec<Account> = self.store.read_all_or_empty()?;
        let outcome = upsert_by_value(&mut accounts, account, |existing| {
            existing.username == account.username
        });
        self.store.write_all(&accounts)?;
        Ok(outcome)
    }

    fn remove_account(&self, username: &str) -> RepoResult<bool> {
        let mut accounts: Vec<Account> = self.store.read_all()?;
        let before = accounts.len();
        accounts.retain(|account| account.username != username);
        if accounts.len() == before {
            return Ok(false);
        }
        self.store.write_all(&accounts)?;
        Ok(true)
    }
}
