//! Account use-case service.
//!
//! # Responsibility
//! - Create accounts with a fresh salt and a salted password digest.
//! - Authenticate by recomputing the digest under the stored salt.
//! - Export, update and delete account records.
//!
//! # Invariants
//! - Stored `password` is always `digest(plaintext, salt)`.
//! - Plaintext keys only ever leave this service inside a `Session`.
//! - A username already present in the store cannot be created again.

use super::{require, require_email, ServiceError, ServiceResult};
use crate::credential::{self, SessionKey};
use crate::model::account::Account;
use crate::repo::account_repo::AccountRepository;
use crate::repo::UpsertOutcome;
use crate::session::Session;
use log::{info, warn};

/// Input for account registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccountRequest {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
    pub email: String,
}

/// Input for sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Input for replacing the password of the signed-in account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePasswordRequest {
    pub new_password: String,
    pub confirm_password: String,
}

/// Account service facade over repository implementations.
pub struct AccountService<R: AccountRepository> {
    repo: R,
}

impl<R: AccountRepository> AccountService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Registers a new account in memory and opens a session for it.
    ///
    /// The account is not persisted; call [`AccountService::export`].
    ///
    /// # Errors
    /// - `ConfirmationMismatch` when the two password entries differ.
    /// - `MissingField` for a blank username, password or email.
    /// - `InvalidEmail` when the email does not look like `a@b.c`.
    /// - `DuplicateAccount` when the username is already stored.
    pub fn create(&self, request: NewAccountRequest) -> ServiceResult<Session> {
        if request.password != request.confirm_password {
            warn!("event=account_create module=account status=error error_code=confirmation_mismatch");
            return Err(ServiceError::ConfirmationMismatch);
        }
        let username = require(&request.username, "username")?;
        if request.password.is_empty() {
            return Err(ServiceError::MissingField("password"));
        }
        let email = require_email(&request.email)?;

        match self.repo.find_by_username(&username) {
            Ok(Some(_)) => return Err(ServiceError::DuplicateAccount(username)),
            Ok(None) => {}
            Err(err) if err.is_missing() => {}
            Err(err) => return Err(err.into()),
        }

        let salt = credential::generate_salt();
        let password = credential::digest(&request.password, &salt)?;
        let account = Account {
            username,
            password,
            email,
            salt,
            projects: Vec::new(),
        };

        info!(
            "event=account_create module=account status=ok username={}",
            account.username
        );
        Ok(Session::new(account, SessionKey::new(request.password)))
    }

    /// Authenticates against the stored digest and opens a session.
    ///
    /// # Errors
    /// - `AccountNotFound` when no record has this username.
    /// - `InvalidCredentials` when the digest does not match.
    /// - `Store` when the account store is missing or corrupt.
    pub fn login(&self, request: LoginRequest) -> ServiceResult<Session> {
        let username = request.username.trim();
        let account = self.load_by_username(username)?;

        if !credential::verify(&request.password, &account.salt, &account.password)? {
            warn!(
                "event=login module=account status=error error_code=invalid_credentials username={}",
                username
            );
            return Err(ServiceError::InvalidCredentials);
        }

        info!("event=login module=account status=ok username={}", username);
        Ok(Session::new(account, SessionKey::new(request.password)))
    }

    /// Returns the first stored account with `username`.
    pub fn load_by_username(&self, username: &str) -> ServiceResult<Account> {
        self.repo
            .find_by_username(username)?
            .ok_or_else(|| ServiceError::AccountNotFound(username.to_string()))
    }

    /// Returns the first stored account with `email`.
    pub fn load_by_email(&self, email: &str) -> ServiceResult<Account> {
        self.repo
            .find_by_email(email.trim())?
            .ok_or_else(|| ServiceError::AccountNotFound(email.trim().to_string()))
    }

    /// Writes `account` into the account store.
    ///
    /// An equal stored record leaves the collection unchanged; a record with
    /// the same username is replaced; otherwise the account is appended.
    /// `encrypted` is accepted for call compatibility and has no effect.
    pub fn export(&self, account: &Account, encrypted: bool) -> ServiceResult<UpsertOutcome> {
        match self.repo.upsert_account(account) {
            Ok(outcome) => {
                info!(
                    "event=account_export module=account status=ok username={} outcome={} encrypted_requested={}",
                    account.username,
                    outcome.as_str(),
                    encrypted
                );
                Ok(outcome)
            }
            Err(err) => {
                warn!(
                    "event=account_export module=account status=error error_code={} error={}",
                    err.code(),
                    err
                );
                Err(err.into())
            }
        }
    }

    /// Replaces the password of the signed-in account under a fresh salt and
    /// persists the result. On failure the session is left untouched.
    pub fn update_password(
        &self,
        session: &mut Session,
        request: UpdatePasswordRequest,
    ) -> ServiceResult<()> {
        if request.new_password != request.confirm_password {
            return Err(ServiceError::ConfirmationMismatch);
        }
        if request.new_password.is_empty() {
            return Err(ServiceError::MissingField("password"));
        }

        let salt = credential::generate_salt();
        let password = credential::digest(&request.new_password, &salt)?;
        let mut updated = session.account().clone();
        updated.salt = salt;
        updated.password = password;

        if let Err(err) = self.repo.upsert_account(&updated) {
            warn!(
                "event=account_update module=account status=error error_code={} username={}",
                err.code(),
                updated.username
            );
            return Err(err.into());
        }
        *session.account_mut() = updated;
        session.replace_key(SessionKey::new(request.new_password));

        info!(
            "event=account_update module=account status=ok username={}",
            session.username()
        );
        Ok(())
    }

    /// Removes the signed-in account from the store and ends the session.
    pub fn delete(&self, session: Session) -> ServiceResult<Account> {
        let account = session.into_account();
        if !self.repo.remove_account(&account.username)? {
            return Err(ServiceError::AccountNotFound(account.username));
        }
        info!(
            "event=account_delete module=account status=ok username={}",
            account.username
        );
        Ok(account)
    }

    /// Ends the session. The plaintext key is dropped with it.
    pub fn sign_out(&self, session: Session) {
        let account = session.into_account();
        info!(
            "event=sign_out module=account status=ok username={}",
            account.username
        );
    }
}
