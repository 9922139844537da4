//! Account use-case service.
//!
//! # Responsibility
//! - Own the in-memory account set loaded from the credential store.
//! - Provide registration and authentication.
//!
//! # Invariants
//! - Identifiers are normalized before any comparison.
//! - Every successful registration is persisted before it is returned.
//! - Unknown identifier and wrong password produce the same error.

use crate::model::account::{normalize_identifier, Account};
use crate::repo::account_repo::AccountRepository;
use crate::repo::{RepoError, RepoResult};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for account use-cases.
#[derive(Debug)]
pub enum AccountServiceError {
    /// Normalized identifier is already registered.
    Conflict(String),
    /// Unknown identifier or wrong password.
    InvalidCredentials,
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for AccountServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Conflict(identifier) => write!(f, "account already registered: {identifier}"),
            Self::InvalidCredentials => write!(f, "invalid identifier or password"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AccountServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for AccountServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Credential store: the loaded account set plus its repository.
pub struct AccountService<R: AccountRepository> {
    repo: R,
    accounts: Vec<Account>,
}

impl<R: AccountRepository> AccountService<R> {
    /// Loads all persisted accounts through `repo`.
    pub fn load(repo: R) -> RepoResult<Self> {
        let accounts = repo.load_accounts()?;
        info!(
            "event=accounts_ready module=service status=ok count={}",
            accounts.len()
        );
        Ok(Self { repo, accounts })
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Finds an account by identifier after normalizing it.
    pub fn find(&self, identifier: &str) -> Option<&Account> {
        let identifier = normalize_identifier(identifier);
        self.accounts
            .iter()
            .find(|account| account.identifier == identifier)
    }

    /// Registers a new account and persists the full set.
    ///
    /// # Errors
    /// - `Conflict` when the normalized identifier exists; nothing is written.
    /// - `Repo` when saving fails; the in-memory set is left unchanged.
    pub fn register(
        &mut self,
        identifier: &str,
        plaintext: &str,
    ) -> Result<Account, AccountServiceError> {
        let account = Account::new(identifier, plaintext);
        if self.find(&account.identifier).is_some() {
            warn!("event=account_register module=service status=conflict");
            return Err(AccountServiceError::Conflict(account.identifier));
        }

        self.accounts.push(account.clone());
        if let Err(err) = self.repo.save_accounts(&self.accounts) {
            self.accounts.pop();
            return Err(err.into());
        }

        info!(
            "event=account_register module=service status=ok count={}",
            self.accounts.len()
        );
        Ok(account)
    }

    /// Checks `plaintext` against the stored digest for `identifier`.
    pub fn authenticate(
        &self,
        identifier: &str,
        plaintext: &str,
    ) -> Result<Account, AccountServiceError> {
        match self.find(identifier) {
            Some(account) if account.verify(plaintext) => {
                info!("event=account_login module=service status=ok");
                Ok(account.clone())
            }
            _ => {
                warn!("event=account_login module=service status=rejected");
                Err(AccountServiceError::InvalidCredentials)
            }
        }
    }
}
