//! Account repository contract and JSON file implementation.
//!
//! # Responsibility
//! - Load and overwrite the shared credential file.
//!
//! # Invariants
//! - An absent credential file is an empty account set.
//! - Loaded accounts are validated and identifiers must be unique.

use crate::model::account::Account;
use crate::repo::{RepoError, RepoResult};
use crate::store::{read_json_array, write_json_array, DataDir};
use log::{debug, error};
use std::collections::HashSet;

/// Repository interface for the credential store.
pub trait AccountRepository {
    fn load_accounts(&self) -> RepoResult<Vec<Account>>;
    fn save_accounts(&self, accounts: &[Account]) -> RepoResult<()>;
}

/// Credential store backed by `users.json` in a data directory.
pub struct JsonAccountRepository<'dir> {
    dir: &'dir DataDir,
}

impl<'dir> JsonAccountRepository<'dir> {
    pub fn new(dir: &'dir DataDir) -> Self {
        Self { dir }
    }
}

impl AccountRepository for JsonAccountRepository<'_> {
    fn load_accounts(&self) -> RepoResult<Vec<Account>> {
        let path = self.dir.credentials_path();
        let accounts = read_json_array::<Account>(&path).inspect_err(|err| {
            error!(
                "event=accounts_load module=repo status=error error_code=read_failed error={err}"
            );
        })?;

        validate_accounts(&accounts)?;

        debug!(
            "event=accounts_load module=repo status=ok count={}",
            accounts.len()
        );
        Ok(accounts)
    }

    fn save_accounts(&self, accounts: &[Account]) -> RepoResult<()> {
        write_json_array(&self.dir.credentials_path(), accounts).inspect_err(|err| {
            error!(
                "event=accounts_save module=repo status=error error_code=write_failed error={err}"
            );
        })?;
        debug!(
            "event=accounts_save module=repo status=ok count={}",
            accounts.len()
        );
        Ok(())
    }
}

fn validate_accounts(accounts: &[Account]) -> RepoResult<()> {
    let mut seen = HashSet::with_capacity(accounts.len());
    for account in accounts {
        account
            .validate()
            .map_err(|err| RepoError::InvalidData(err.to_string()))?;
        if !seen.insert(account.identifier.as_str()) {
            return Err(RepoError::InvalidData(format!(
                "duplicate account identifier `{}`",
                account.identifier
            )));
        }
    }
    Ok(())
}
