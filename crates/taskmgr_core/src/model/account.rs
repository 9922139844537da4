//! Account domain model.
//!
//! # Responsibility
//! - Define the registered identity record kept in the credential file.
//! - Own identifier normalization and password verification.
//!
//! # Invariants
//! - `identifier` is always normalized via [`normalize_identifier`].
//! - `credential_digest` is the unsalted SHA-256 hex digest of the password.
//! - Accounts are never mutated after registration.

use crate::digest::{digest, is_digest};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Registered account: a normalized identifier plus its password digest.
///
/// Serialized as `{"identifier": ..., "credentialDigest": ...}`. Legacy
/// files written with `email` / `password` keys still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Normalized login identifier (an email address in practice).
    #[serde(alias = "email")]
    pub identifier: String,
    /// Lowercase hex SHA-256 digest of the plaintext password.
    #[serde(alias = "password")]
    pub credential_digest: String,
}

/// Validation errors for persisted account records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountValidationError {
    /// Identifier differs from its normalized form.
    UnnormalizedIdentifier(String),
    /// Digest is not a lowercase hex SHA-256 value.
    MalformedDigest { identifier: String },
}

impl Display for AccountValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnnormalizedIdentifier(identifier) => {
                write!(f, "account identifier `{identifier}` is not normalized")
            }
            Self::MalformedDigest { identifier } => {
                write!(f, "account `{identifier}` has a malformed password digest")
            }
        }
    }
}

impl Error for AccountValidationError {}

impl Account {
    /// Builds an account from raw registration input.
    ///
    /// The identifier is normalized and the password is digested; the
    /// plaintext is not retained.
    pub fn new(identifier: &str, plaintext: &str) -> Self {
        Self {
            identifier: normalize_identifier(identifier),
            credential_digest: digest(plaintext),
        }
    }

    /// Returns whether `plaintext` hashes to this account's digest.
    pub fn verify(&self, plaintext: &str) -> bool {
        digest(plaintext) == self.credential_digest
    }

    /// Checks invariants of a record read back from storage.
    pub fn validate(&self) -> Result<(), AccountValidationError> {
        if normalize_identifier(&self.identifier) != self.identifier {
            return Err(AccountValidationError::UnnormalizedIdentifier(
                self.identifier.clone(),
            ));
        }
        if !is_digest(&self.credential_digest) {
            return Err(AccountValidationError::MalformedDigest {
                identifier: self.identifier.clone(),
            });
        }
        Ok(())
    }
}

/// Normalizes a raw identifier: surrounding whitespace trimmed, lowercased.
pub fn normalize_identifier(raw: &str) -> String {
    raw.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::{normalize_identifier, Account, AccountValidationError};

    #[test]
    fn normalize_identifier_trims_and_lowercases() {
        assert_eq!(normalize_identifier("  A@B.Com \n"), "a@b.com");
        assert_eq!(normalize_identifier(""), "");
    }

    #[test]
    fn new_account_normalizes_and_verifies() {
        let account = Account::new(" U@Test.com", "pw1");
        assert_eq!(account.identifier, "u@test.com");
        assert!(account.verify("pw1"));
        assert!(!account.verify("pw2"));
        assert!(!account.verify(""));
        account.validate().unwrap();
    }

    #[test]
    fn validate_rejects_unnormalized_identifier() {
        let mut account = Account::new("a@b.com", "pw");
        account.identifier = "A@b.com".to_string();
        assert_eq!(
            account.validate().unwrap_err(),
            AccountValidationError::UnnormalizedIdentifier("A@b.com".to_string())
        );
    }

    #[test]
    fn validate_rejects_plaintext_looking_digest() {
        let mut account = Account::new("a@b.com", "pw");
        account.credential_digest = "pw".to_string();
        assert!(matches!(
            account.validate(),
            Err(AccountValidationError::MalformedDigest { .. })
        ));
    }
}
